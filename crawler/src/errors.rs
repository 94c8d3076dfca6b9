use reqwest::header::{InvalidHeaderName, InvalidHeaderValue};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrawlerError {
    #[error("Unprotected crawler general error")]
    UnprotectedClientGeneralError(#[from] reqwest::Error),
    #[error("Unprotected crawler failed to create header")]
    UnprotectedClientInvalidHeader,
    #[error("Protected crawler general error: {0}")]
    ProtectedClientGeneralError(#[from] anyhow::Error),
    #[error("Protected crawler failed to launch the browser: {0}")]
    ProtectedClientLaunch(String),
    #[error("Page {url} answered with status {status}")]
    UnexpectedStatus { url: String, status: u16 },
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),
    #[error("XPath selector {0} needs the browser fetcher")]
    XPathNeedsBrowser(String),
    #[error("Couldn't find element by provided selector: {0}")]
    ElementNotFound(String),
    #[error("Element found by selector {0} has no text")]
    EmptyElement(String),
}

impl From<InvalidHeaderName> for CrawlerError {
    fn from(_err: InvalidHeaderName) -> Self {
        Self::UnprotectedClientInvalidHeader
    }
}

impl From<InvalidHeaderValue> for CrawlerError {
    fn from(_err: InvalidHeaderValue) -> Self {
        Self::UnprotectedClientInvalidHeader
    }
}
