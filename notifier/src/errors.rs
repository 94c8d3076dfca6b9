use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Discord webhook call failed")]
    Discord(#[from] serenity::Error),
    #[error("Failed to run desktop notification command")]
    DesktopCommand(#[from] std::io::Error),
    #[error("Desktop notification command exited with {0}")]
    DesktopExitStatus(String),
    #[error("Desktop notifications are not supported on {0}")]
    UnsupportedPlatform(String),
}
