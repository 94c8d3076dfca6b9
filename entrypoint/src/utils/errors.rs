use common::errors::{LocaleError, PriceError};
use crawler::errors::CrawlerError;
use notifier::errors::NotifierError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error(transparent)]
    Crawler(#[from] CrawlerError),
    #[error(transparent)]
    Price(#[from] PriceError),
    #[error(transparent)]
    Notifier(#[from] NotifierError),
    #[error(transparent)]
    Locale(#[from] LocaleError),
    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("Target price must be a finite number of zero or more, got {0}")]
    InvalidTargetPrice(f64),
    #[error("Missing argument: {0}")]
    MissingArgument(String),
    #[error("Failed to serialize price report")]
    Report(#[from] serde_json::Error),
}

impl WatchError {
    /// Fatal errors will fail the same way on every scheduled run.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WatchError::Price(PriceError::MalformedNumber(_))
                | WatchError::Crawler(
                    CrawlerError::InvalidSelector(_)
                        | CrawlerError::XPathNeedsBrowser(_)
                        | CrawlerError::UnprotectedClientInvalidHeader
                        | CrawlerError::ProtectedClientLaunch(_)
                )
                | WatchError::Locale(_)
                | WatchError::InvalidSchedule(_)
                | WatchError::InvalidTargetPrice(_)
                | WatchError::MissingArgument(_)
                | WatchError::Report(_)
        )
    }
}
