//! Update Coupon Handler

use std::sync::Arc;

use salvo::{oapi::extract::JsonBody, prelude::*};

use crate::{
    coupons::{
        errors::into_status_error,
        models::{CouponEnvelope, CouponRequest},
    },
    extensions::*,
    state::State,
};

/// Update Coupon Handler
///
/// Replaces the rule behind an existing code. Carts that already carry the coupon keep the
/// discount they were given.
#[endpoint(
    tags("coupons"),
    summary = "Update Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Coupon updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid coupon rule"),
        (status_code = StatusCode::NOT_FOUND, description = "Coupon not found"),
    ),
)]
#[tracing::instrument(name = "coupons.update", skip(json, depot))]
pub(crate) async fn handler(
    json: JsonBody<CouponRequest>,
    depot: &mut Depot,
) -> Result<Json<CouponEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let (code, update) = json.into_inner().into_update();

    let coupon = state
        .app
        .coupons
        .update_coupon(&code, update)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponEnvelope::new("Coupon updated", coupon)))
}
