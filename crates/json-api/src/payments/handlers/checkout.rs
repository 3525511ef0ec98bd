//! Create Checkout Session Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    payments::{errors::into_status_error, models::CheckoutSessionResponse},
    state::State,
};

/// Create Checkout Session Handler
///
/// Opens a checkout session for the caller's current cart total. The amount is read from the
/// stored cart; nothing in the request can change it.
#[endpoint(
    tags("payments"),
    summary = "Create Checkout Session",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Checkout session created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart has nothing to pay for"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
        (status_code = StatusCode::BAD_GATEWAY, description = "Payment gateway failed"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Payments not configured"),
    ),
)]
#[tracing::instrument(name = "payments.checkout", skip(depot))]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<CheckoutSessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let session = state
        .app
        .payments
        .create_checkout_session(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(session.into()))
}
