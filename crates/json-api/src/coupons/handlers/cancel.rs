//! Cancel Coupon Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::models::CartEnvelope, coupons::errors::into_status_error, extensions::*, state::State,
};

/// Cancel Coupon Handler
///
/// Removes the applied coupon and restores the undiscounted total.
#[endpoint(
    tags("coupons"),
    summary = "Cancel Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon removed"),
        (status_code = StatusCode::BAD_REQUEST, description = "No coupon is applied"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
#[tracing::instrument(name = "coupons.cancel", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let cart = state
        .app
        .coupons
        .remove_coupon(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(true, "Coupon removed", cart)))
}
