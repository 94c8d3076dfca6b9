pub mod check;
pub mod errors;
pub mod locale;
pub mod price;
