//! Auth service errors.

use sqlx::Error;
use thiserror::Error;

use crate::auth::SessionTokenError;

#[derive(Debug, Error)]
pub enum AuthServiceError {
    #[error("session not found")]
    NotFound,

    #[error("session expired")]
    Expired,

    #[error("malformed session token")]
    Token(#[from] SessionTokenError),

    #[error("timed out waiting for storage")]
    Timeout,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for AuthServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::PoolTimedOut => Self::Timeout,
            error => Self::Sql(error),
        }
    }
}
