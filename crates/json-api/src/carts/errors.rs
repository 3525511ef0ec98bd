//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use platter_app::domain::carts::CartsServiceError;

pub(crate) fn into_status_error(error: CartsServiceError) -> StatusError {
    match error {
        CartsServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        CartsServiceError::FoodNotFound => StatusError::not_found().brief("Food not found"),
        CartsServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CartsServiceError::ItemNotFound => StatusError::not_found().brief("Item not found in cart"),
        CartsServiceError::InvalidQuantity => {
            StatusError::bad_request().brief("Quantity must be a positive integer")
        }
        CartsServiceError::InvalidTotal => {
            StatusError::bad_request().brief("Cart total is out of range")
        }
        CartsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified concurrently, please retry")
        }
        CartsServiceError::Timeout => {
            warn!("timed out updating cart");

            StatusError::gateway_timeout()
        }
        CartsServiceError::Sql(source) => {
            error!("failed to update cart: {source}");

            StatusError::internal_server_error()
        }
    }
}
