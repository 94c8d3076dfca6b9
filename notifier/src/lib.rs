pub(crate) mod client;
pub mod desktop;
pub mod errors;
pub mod log;
pub mod multi;
pub mod traits;

pub use client::DiscordNotifier;
