use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    #[error("Provided string has no digits to be converted to float: {0:?}")]
    NoNumericContent(String),
    #[error("Invalid price format was used: {0:?}")]
    MalformedNumber(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Decimal and grouping separators must differ, both are {0:?}")]
    SameSeparators(char),
    #[error("Only '.' and ',' can be used as separators, got {0:?}")]
    UnsupportedSeparator(char),
    #[error("Unknown locale: {0}")]
    UnknownLocale(String),
}
