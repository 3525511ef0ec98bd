//! Apply Coupon Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    carts::models::CartEnvelope, coupons::errors::into_status_error, extensions::*, state::State,
};

/// Apply Coupon Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ApplyCouponRequest {
    pub code: String,
}

/// Apply Coupon Handler
///
/// Applies a coupon to the caller's cart. Only one coupon can be applied at a time.
#[endpoint(
    tags("coupons"),
    summary = "Apply Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon applied"),
        (status_code = StatusCode::BAD_REQUEST, description = "Coupon rejected, with the reason"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
#[tracing::instrument(name = "coupons.apply", skip(json, depot))]
pub(crate) async fn handler(
    json: JsonBody<ApplyCouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;
    let code = json.into_inner().code;

    let cart = state
        .app
        .coupons
        .apply_coupon(user, code.trim())
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(true, "Coupon applied", cart)))
}
