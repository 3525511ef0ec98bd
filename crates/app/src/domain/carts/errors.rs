//! Carts service errors.

use sqlx::Error;
use thiserror::Error;

use crate::domain::carts::pricing::CartError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("user not found")]
    UserNotFound,

    #[error("food not found")]
    FoodNotFound,

    #[error("cart not found")]
    CartNotFound,

    #[error("item not found in cart")]
    ItemNotFound,

    #[error("quantity must be a positive integer")]
    InvalidQuantity,

    #[error("cart total is out of range")]
    InvalidTotal,

    #[error("cart was modified concurrently")]
    Conflict,

    #[error("timed out waiting for storage")]
    Timeout,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CartsServiceError {
    fn from(error: Error) -> Self {
        match error {
            Error::PoolTimedOut => Self::Timeout,
            error => Self::Sql(error),
        }
    }
}

impl From<CartError> for CartsServiceError {
    fn from(error: CartError) -> Self {
        match error {
            CartError::ItemNotFound => Self::ItemNotFound,
            CartError::UnknownFood(_) => Self::FoodNotFound,
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::TotalOverflow => Self::InvalidTotal,
        }
    }
}
