use async_trait::async_trait;
use tracing::error;

use crate::{
    errors::NotifierError,
    traits::{Notification, Notifier},
};

/// Sends every notification to all wrapped notifiers.
///
/// A failing notifier does not stop the others, the first error is returned
/// once all of them were attempted.
pub struct MultiNotifier {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl MultiNotifier {
    pub fn new(notifiers: Vec<Box<dyn Notifier>>) -> Self {
        Self { notifiers }
    }

    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

#[async_trait]
impl Notifier for MultiNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        let mut first_error = None;

        for notifier in &self.notifiers {
            if let Err(err) = notifier.notify(notification).await {
                error!("Notification failed: {err}");
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
