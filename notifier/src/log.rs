use async_trait::async_trait;
use tracing::info;

use crate::{
    errors::NotifierError,
    traits::{Notification, Notifier},
};

/// Writes notifications to the log only, for headless machines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        info!("{}: {}", notification.title, notification.message);

        Ok(())
    }
}
