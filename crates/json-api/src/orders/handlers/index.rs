//! List My Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersEnvelope},
    state::State,
};

/// List My Orders Handler
///
/// Returns the caller's orders, newest first.
#[endpoint(
    tags("orders"),
    summary = "List My Orders",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "The caller's orders")),
)]
#[tracing::instrument(name = "orders.index", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let orders = state
        .app
        .orders
        .list_user_orders(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersEnvelope::new("Orders retrieved", orders)))
}
