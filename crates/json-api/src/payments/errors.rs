//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use platter_app::payments::PaymentsError;

pub(crate) fn into_status_error(error: PaymentsError) -> StatusError {
    match error {
        PaymentsError::NotConfigured => {
            StatusError::service_unavailable().brief("Payments are not available")
        }
        PaymentsError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        PaymentsError::SessionNotFound => {
            StatusError::not_found().brief("Checkout session not found")
        }
        PaymentsError::EmptyCart => StatusError::bad_request().brief("Cart has nothing to pay for"),
        PaymentsError::AmountOverflow => {
            StatusError::bad_request().brief("Cart total is too large to charge")
        }
        PaymentsError::InvalidSessionId => {
            StatusError::bad_request().brief("Invalid checkout session id")
        }
        PaymentsError::Rejected { status } => {
            warn!(status, "payment gateway rejected request");

            StatusError::bad_gateway().brief("Payment gateway rejected the request")
        }
        PaymentsError::Gateway(source) => {
            error!("payment gateway request failed: {source}");

            StatusError::bad_gateway()
        }
        PaymentsError::Timeout => {
            warn!("timed out waiting for payment gateway");

            StatusError::gateway_timeout()
        }
        PaymentsError::Cart(source) => {
            error!("failed to read cart for checkout: {source}");

            StatusError::internal_server_error()
        }
    }
}
