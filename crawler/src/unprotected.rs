use std::{str::FromStr, sync::OnceLock, time::Duration};

use async_trait::async_trait;
use reqwest::{
    Client, ClientBuilder,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::{debug, error, info};

use crate::{
    errors::CrawlerError,
    html::{extract_page_element, parse_selector},
    request::{Request, RequestBuilder},
    traits::{CrawlerResponse, PageElement, PageFetcher},
};

const PAGE_TIMEOUT_SECONDS: u64 = 30;

const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) price_watch/0.1";

static REQWEST_CLIENT: OnceLock<Client> = OnceLock::new();

/// Plain HTTP fetcher, pages that need JavaScript to render the price are
/// not supported.
#[derive(Debug, Default, Clone)]
pub struct UnprotectedCrawler {
    headers: Vec<(String, String)>,
}

impl UnprotectedCrawler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sends `headers` with every request. They are checked here so a bad
    /// name or value fails before the first page load.
    pub fn with_headers(headers: Vec<(String, String)>) -> Result<Self, CrawlerError> {
        header_map(&headers)?;

        Ok(Self { headers })
    }

    fn create_client() -> &'static Client {
        REQWEST_CLIENT.get_or_init(|| {
            ClientBuilder::new()
                .gzip(true)
                .http1_ignore_invalid_headers_in_responses(true)
                .timeout(Duration::from_secs(PAGE_TIMEOUT_SECONDS))
                .user_agent(USER_AGENT)
                .build()
                .expect("Valid base reqwest to be built")
        })
    }

    pub async fn make_web_request(&self, request: Request) -> Result<CrawlerResponse, CrawlerError> {
        let client = Self::create_client();

        let mut request_builder = client.get(request.url.clone());

        if let Some(headers) = request.headers {
            request_builder = request_builder.headers(header_map(&headers)?);
        }

        info!("Sending request to {}", request.url);

        let response = request_builder.send().await?;

        debug!("{response:?}");

        let status = response.status();

        if !status.is_success() {
            error!("Request to {} failed with {}", request.url, status);
            return Err(CrawlerError::UnexpectedStatus {
                url: request.url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;

        Ok(CrawlerResponse { body })
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, CrawlerError> {
    let mut header_map = HeaderMap::new();

    for (key, value) in headers.iter() {
        header_map.append(HeaderName::from_str(key)?, HeaderValue::from_str(value)?);
    }

    Ok(header_map)
}

#[async_trait]
impl PageFetcher for UnprotectedCrawler {
    async fn fetch_text(
        &self,
        address: &str,
        selector: &str,
    ) -> Result<PageElement, CrawlerError> {
        // no point loading the page with a selector that can never match
        parse_selector(selector)?;

        let mut builder = RequestBuilder::new().set_url(address);

        if !self.headers.is_empty() {
            builder = builder.set_headers(&self.headers);
        }

        let response = self.make_web_request(builder.build()).await?;

        extract_page_element(&response.body, selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn builds_repeated_headers() {
        let headers = vec![
            header("Accept-Language", "pt-BR"),
            header("Cookie", "region=sp"),
            header("Cookie", "currency=BRL"),
        ];

        let map = header_map(&headers).unwrap();

        assert_eq!(map.get("accept-language").unwrap(), "pt-BR");
        assert_eq!(map.get_all("cookie").iter().count(), 2);
    }

    #[test]
    fn rejects_bad_headers_up_front() {
        let bad_name = UnprotectedCrawler::with_headers(vec![header("Accept Language", "pt-BR")]);
        let bad_value = UnprotectedCrawler::with_headers(vec![header("Cookie", "a\nb")]);

        assert!(matches!(
            bad_name,
            Err(CrawlerError::UnprotectedClientInvalidHeader)
        ));
        assert!(matches!(
            bad_value,
            Err(CrawlerError::UnprotectedClientInvalidHeader)
        ));
        assert!(UnprotectedCrawler::with_headers(vec![header("Accept-Language", "pt-BR")]).is_ok());
    }

    #[tokio::test]
    async fn xpath_fails_before_any_request() {
        let crawler = UnprotectedCrawler::new();

        let result = crawler
            .fetch_text("http://127.0.0.1:9/item", "//span[@id='price']")
            .await;

        assert!(matches!(result, Err(CrawlerError::XPathNeedsBrowser(_))));
    }
}
