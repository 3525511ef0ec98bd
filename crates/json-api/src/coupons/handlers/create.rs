//! Create Coupon Handler

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

/// Create Coupon Handler
#[endpoint(
    tags("coupons"),
    summary = "Create Coupon",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Coupon created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid coupon rule"),
        (status_code = StatusCode::CONFLICT, description = "Code already in use"),
    ),
)]
#[tracing::instrument(name = "coupons.create", skip(json, depot, res))]
pub(crate) async fn handler(
    json: JsonBody<CouponRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CouponEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let coupon = state
        .app
        .coupons
        .create_coupon(json.into_inner().into_coupon())
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(CouponEnvelope::new("Coupon created", coupon)))
}
