//! Cancel Restaurant Order Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use platter_app::domain::{catalog::models::RestaurantUuid, orders::models::OrderUuid};

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderEnvelope},
    state::State,
};

/// Cancel Restaurant Order Handler
///
/// Cancels one restaurant's part of the caller's order. Only pending parts can be cancelled; the
/// order's own status is left as is.
#[endpoint(
    tags("orders"),
    summary = "Cancel Restaurant Order",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Restaurant order cancelled"),
        (status_code = StatusCode::BAD_REQUEST, description = "Restaurant order is no longer pending"),
        (status_code = StatusCode::NOT_FOUND, description = "Order or restaurant order not found"),
    ),
)]
#[tracing::instrument(
    name = "orders.cancel_restaurant",
    skip_all,
    fields(order_uuid = %*order, restaurant_uuid = %*restaurant)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    restaurant: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let order = state
        .app
        .orders
        .cancel_sub_order(
            user,
            OrderUuid::from_uuid(order.into_inner()),
            RestaurantUuid::from_uuid(restaurant.into_inner()),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderEnvelope::new("Restaurant order cancelled", order)))
}
