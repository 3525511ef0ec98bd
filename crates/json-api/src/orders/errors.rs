//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use platter_app::domain::orders::OrdersServiceError;

pub(crate) fn into_status_error(error: OrdersServiceError) -> StatusError {
    match error {
        OrdersServiceError::UserNotFound => StatusError::not_found().brief("User not found"),
        OrdersServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        OrdersServiceError::OrderNotFound => StatusError::not_found().brief("Order not found"),
        OrdersServiceError::SubOrderNotFound => {
            StatusError::not_found().brief("Restaurant has no part in this order")
        }
        OrdersServiceError::InvalidState(source) => {
            StatusError::bad_request().brief(format!("Cart cannot be ordered: {source}"))
        }
        OrdersServiceError::InvalidTransition { from } => {
            StatusError::bad_request().brief(format!("Cannot change a {from} order"))
        }
        OrdersServiceError::Conflict => {
            StatusError::conflict().brief("Order was modified concurrently, please retry")
        }
        OrdersServiceError::Timeout => {
            warn!("timed out handling order");

            StatusError::gateway_timeout()
        }
        OrdersServiceError::Sql(source) => {
            error!("failed to handle order: {source}");

            StatusError::internal_server_error()
        }
    }
}
