use async_trait::async_trait;

use crate::errors::CrawlerError;

pub struct CrawlerResponse {
    pub body: String,
}

/// Title of the loaded page and the text of the element the selector matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageElement {
    pub title: String,
    pub text: String,
}

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_text(&self, address: &str, selector: &str)
    -> Result<PageElement, CrawlerError>;
}
