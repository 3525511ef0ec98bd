//! Payments errors.

use thiserror::Error;

use crate::domain::carts::CartsServiceError;

#[derive(Debug, Error)]
pub enum PaymentsError {
    #[error("payments are not configured")]
    NotConfigured,

    #[error("cart not found")]
    CartNotFound,

    #[error("cart has nothing to pay for")]
    EmptyCart,

    #[error("cart total is too large to charge")]
    AmountOverflow,

    #[error("invalid checkout session id")]
    InvalidSessionId,

    #[error("checkout session not found")]
    SessionNotFound,

    #[error("could not read cart")]
    Cart(#[source] CartsServiceError),

    #[error("payment gateway request failed")]
    Gateway(#[source] reqwest::Error),

    #[error("payment gateway rejected the request with status {status}")]
    Rejected { status: u16 },

    #[error("payment gateway timed out")]
    Timeout,
}

impl From<reqwest::Error> for PaymentsError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout
        } else {
            Self::Gateway(error)
        }
    }
}

impl From<CartsServiceError> for PaymentsError {
    fn from(error: CartsServiceError) -> Self {
        match error {
            CartsServiceError::CartNotFound => Self::CartNotFound,
            CartsServiceError::Timeout => Self::Timeout,
            error => Self::Cart(error),
        }
    }
}
