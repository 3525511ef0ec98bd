//! Orders service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::orders::{assembly::AssemblyError, models::OrderStatus, status::TransitionError};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("order not found")]
    OrderNotFound,

    #[error("restaurant has no part in this order")]
    SubOrderNotFound,

    #[error("cart cannot be turned into an order")]
    InvalidState(#[source] AssemblyError),

    #[error("cannot change a {from} order")]
    InvalidTransition { from: OrderStatus },

    #[error("order was modified concurrently")]
    Conflict,

    #[error("timed out waiting for storage")]
    Timeout,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for OrdersServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::PoolTimedOut => Self::Timeout,
            error => Self::Sql(error),
        }
    }
}

impl From<AssemblyError> for OrdersServiceError {
    fn from(error: AssemblyError) -> Self {
        Self::InvalidState(error)
    }
}

impl From<TransitionError> for OrdersServiceError {
    fn from(error: TransitionError) -> Self {
        match error {
            TransitionError::SubOrderNotFound => Self::SubOrderNotFound,
            TransitionError::InvalidTransition { from } => Self::InvalidTransition { from },
        }
    }
}
