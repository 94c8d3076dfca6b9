use std::{
    sync::Arc,
    thread::sleep,
    time::{Duration, Instant},
};

use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptionsBuilder, Tab};
use serde_json::Value;
use tracing::{debug, error, info};

use crate::{
    errors::CrawlerError,
    html::{collapse_whitespace, is_xpath},
    traits::{PageElement, PageFetcher},
};

const RENDER_TIMEOUT: Duration = Duration::from_secs(10);
const RENDER_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Headless Chrome fetcher. Runs the page's JavaScript and accepts both CSS
/// and XPath selectors.
pub struct ProtectedCrawler {
    browser: Arc<Browser>,
}

impl ProtectedCrawler {
    pub fn new() -> Result<Self, CrawlerError> {
        let browser = Self::create_browser()?;

        Ok(Self {
            browser: Arc::new(browser),
        })
    }

    fn create_browser() -> Result<Browser, CrawlerError> {
        let launch_opts = LaunchOptionsBuilder::default()
            .headless(true)
            .build()
            .map_err(|err| CrawlerError::ProtectedClientLaunch(err.to_string()))?;

        let browser = Browser::new(launch_opts);

        Ok(browser?)
    }

    fn load_element(
        browser: &Browser,
        address: &str,
        selector: &str,
    ) -> Result<PageElement, CrawlerError> {
        let tab = browser.new_tab()?;

        info!("Opening {} in headless browser", address);

        let result = Self::read_element(&tab, address, selector);

        if let Err(err) = tab.close(true) {
            debug!("Failed to close tab for {}: {}", address, err);
        }

        result
    }

    fn read_element(tab: &Tab, address: &str, selector: &str) -> Result<PageElement, CrawlerError> {
        tab.navigate_to(address)?.wait_until_navigated()?;

        let script = element_text_script(selector);
        let started = Instant::now();

        // prices rendered by scripts can show up after the load event
        let raw_text = loop {
            let value = tab.evaluate(&script, false)?.value;

            if let Some(text) = element_text(value, selector)? {
                break text;
            }

            if started.elapsed() >= RENDER_TIMEOUT {
                error!("Failed to find element '{}' in page", selector);
                return Err(CrawlerError::ElementNotFound(selector.into()));
            }

            sleep(RENDER_POLL_INTERVAL);
        };

        let text = collapse_whitespace(&raw_text);

        if text.is_empty() {
            error!("Element '{}' has no text", selector);
            return Err(CrawlerError::EmptyElement(selector.into()));
        }

        let title = collapse_whitespace(&tab.get_title()?);

        debug!("Found '{}' on page '{}'", text, title);

        Ok(PageElement { title, text })
    }
}

/// Script resolving to the element's text, `null` while it is missing and
/// `false` when the browser rejects the selector.
fn element_text_script(selector: &str) -> String {
    let quoted = Value::from(selector).to_string();

    let lookup = if is_xpath(selector) {
        format!(
            "document.evaluate({quoted}, document, null, XPathResult.FIRST_ORDERED_NODE_TYPE, null).singleNodeValue"
        )
    } else {
        format!("document.querySelector({quoted})")
    };

    format!(
        "(() => {{ let node; try {{ node = {lookup}; }} catch (_) {{ return false; }} return node === null ? null : node.textContent; }})()"
    )
}

fn element_text(value: Option<Value>, selector: &str) -> Result<Option<String>, CrawlerError> {
    match value {
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Bool(false)) => {
            error!("Browser rejected selector '{}'", selector);
            Err(CrawlerError::InvalidSelector(selector.into()))
        }
        _ => Ok(None),
    }
}

#[async_trait]
impl PageFetcher for ProtectedCrawler {
    async fn fetch_text(
        &self,
        address: &str,
        selector: &str,
    ) -> Result<PageElement, CrawlerError> {
        let browser = Arc::clone(&self.browser);
        let address = address.to_string();
        let selector = selector.to_string();

        tokio::task::spawn_blocking(move || Self::load_element(&browser, &address, &selector))
            .await
            .map_err(anyhow::Error::from)?
    }
}
