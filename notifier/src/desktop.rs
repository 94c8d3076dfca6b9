use std::env::consts::OS;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, error};

use crate::{
    errors::NotifierError,
    traits::{Notification, Notifier},
};

const APP_NAME: &str = "price_watch";

/// Shows a desktop notification through the platform's notification command:
/// `notify-send` on Linux and the BSDs, `osascript` on macOS.
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl DesktopNotifier {
    pub fn new() -> Self {
        Self
    }

    fn build_command(notification: &Notification) -> Result<Command, NotifierError> {
        match OS {
            "macos" => {
                let script = format!(
                    "display notification \"{}\" with title \"{}\"",
                    escape_applescript(&notification.message),
                    escape_applescript(&notification.title)
                );

                let mut command = Command::new("osascript");
                command.arg("-e").arg(script);

                Ok(command)
            }
            "linux" | "freebsd" | "openbsd" | "netbsd" | "dragonfly" => {
                let mut command = Command::new("notify-send");
                command
                    .arg(format!("--app-name={APP_NAME}"))
                    .arg(&notification.title)
                    .arg(&notification.message);

                Ok(command)
            }
            other => Err(NotifierError::UnsupportedPlatform(other.into())),
        }
    }
}

#[async_trait]
impl Notifier for DesktopNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifierError> {
        let mut command = Self::build_command(notification)?;

        debug!("{command:?}");

        let status = command.status().await?;

        if !status.success() {
            error!("Desktop notification command failed: {}", status);
            return Err(NotifierError::DesktopExitStatus(status.to_string()));
        }

        Ok(())
    }
}

fn escape_applescript(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
