use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, error};

use crate::{errors::CrawlerError, traits::PageElement};

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("title").expect("Selector should parse as nothing has changed")
});

/// Finds the first element matching the CSS `selector` in `body` and returns
/// its text together with the page title.
pub fn extract_page_element(body: &str, selector: &str) -> Result<PageElement, CrawlerError> {
    let element_selector = parse_selector(selector)?;
    let document = Html::parse_document(body);

    let Some(element) = document.select(&element_selector).next() else {
        error!("Failed to find element '{}' in page", selector);
        return Err(CrawlerError::ElementNotFound(selector.into()));
    };

    let text = element_to_text(element);

    if text.is_empty() {
        error!("Element '{}' has no text: {}", selector, element.html());
        return Err(CrawlerError::EmptyElement(selector.into()));
    }

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(element_to_text)
        .unwrap_or_default();

    debug!("Found '{}' on page '{}'", text, title);

    Ok(PageElement { title, text })
}

pub fn parse_selector(selector: &str) -> Result<Selector, CrawlerError> {
    if is_xpath(selector) {
        error!("Selector '{}' is an XPath, only CSS is read from plain HTML", selector);
        return Err(CrawlerError::XPathNeedsBrowser(selector.into()));
    }

    let Ok(parsed) = Selector::parse(selector) else {
        error!("Failed to parse selector '{}'", selector);
        return Err(CrawlerError::InvalidSelector(selector.into()));
    };

    Ok(parsed)
}

/// XPath expressions start at a path (`/`, `//`) or a parenthesized group.
pub fn is_xpath(selector: &str) -> bool {
    selector.trim_start().starts_with(['/', '('])
}

/// Text nodes are concatenated as is, runs of whitespace collapse to one space.
pub(crate) fn element_to_text(element: ElementRef) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<&str>>().join(" ")
}
