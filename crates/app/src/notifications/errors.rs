//! Notification errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification request failed")]
    Http(#[source] reqwest::Error),

    #[error("notification provider rejected the message with status {0}")]
    Rejected(u16),

    #[error("notification provider timed out")]
    Timeout,
}

impl From<reqwest::Error> for NotificationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(error)
        }
    }
}
