//! Create Order Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderEnvelope},
    state::State,
};

/// Create Order Handler
///
/// Turns the caller's cart into an order with one part per restaurant, then deletes the cart.
/// The SMS confirmation is sent after the order is stored and never fails the request.
#[endpoint(
    tags("orders"),
    summary = "Create Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order placed"),
        (status_code = StatusCode::BAD_REQUEST, description = "Cart is empty or has invalid items"),
        (status_code = StatusCode::NOT_FOUND, description = "User or cart not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart modified during checkout"),
    ),
)]
#[tracing::instrument(name = "orders.create", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let order = state
        .app
        .orders
        .create_order(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderEnvelope::new("Order placed", order)))
}
