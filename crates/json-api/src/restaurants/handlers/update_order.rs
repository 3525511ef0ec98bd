//! Update Restaurant Order Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::orders::models::{OrderStatus, OrderUuid};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderEnvelope},
    state::State,
};

/// Update Restaurant Order Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateOrderRequest {
    /// One of `pending`, `confirmed`, `delivered` or `cancelled`
    pub status: String,
}

/// Update Restaurant Order Handler
///
/// Sets the status of the calling restaurant's part of an order. The order status itself is only
/// refreshed through `PATCH /order/update/status`.
#[endpoint(
    tags("restaurants"),
    summary = "Update Restaurant Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Status updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown status or cancelled order"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found for this restaurant"),
    ),
)]
#[tracing::instrument(name = "restaurants.update_order", skip_all, fields(order_uuid = %*order))]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<UpdateOrderRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let restaurant = depot.restaurant_or_403()?;

    let status: OrderStatus = json
        .into_inner()
        .status
        .parse()
        .map_err(|error| StatusError::bad_request().brief(format!("{error}")))?;

    let order = state
        .app
        .orders
        .set_sub_order_status(restaurant, OrderUuid::from_uuid(order.into_inner()), status)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderEnvelope::new("Order status updated", order)))
}
