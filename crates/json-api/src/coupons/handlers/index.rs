//! List Coupons Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    coupons::{errors::into_status_error, models::CouponsEnvelope},
    extensions::*,
    state::State,
};

/// List Coupons Handler
#[endpoint(
    tags("coupons"),
    summary = "List Coupons",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "Every coupon rule")),
)]
#[tracing::instrument(name = "coupons.index", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CouponsEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let coupons = state
        .app
        .coupons
        .list_coupons()
        .await
        .map_err(into_status_error)?;

    Ok(Json(CouponsEnvelope {
        success: true,
        message: "Coupons retrieved".to_string(),
        coupons: coupons.into_iter().map(Into::into).collect(),
    }))
}
