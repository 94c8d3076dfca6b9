use std::{
    collections::VecDeque,
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use crawler::{
    errors::CrawlerError,
    traits::{PageElement, PageFetcher},
};
use notifier::{
    errors::NotifierError,
    traits::{Notification, Notifier},
};

pub(crate) fn element(title: &str, text: &str) -> PageElement {
    PageElement {
        title: title.into(),
        text: text.into(),
    }
}

/// Hands out the queued responses in order, then reports the element missing.
#[derive(Clone, Default)]
pub(crate) struct FakeFetcher {
    responses: Arc<Mutex<VecDeque<Result<PageElement, CrawlerError>>>>,
    calls: Arc<AtomicUsize>,
}

impl FakeFetcher {
    pub(crate) fn new(responses: Vec<Result<PageElement, CrawlerError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageFetcher for FakeFetcher {
    async fn fetch_text(
        &self,
        _address: &str,
        selector: &str,
    ) -> Result<PageElement, CrawlerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CrawlerError::ElementNotFound(selector.into())))
    }
}

#[derive(Clone, Default)]
pub(crate) struct FakeNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    fail: bool,
}

impl FakeNotifier {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub(crate) fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        if self.fail {
            return Err(NotifierError::UnsupportedPlatform("test".into()));
        }

        self.sent.lock().unwrap().push(notification.clone());

        Ok(())
    }
}
