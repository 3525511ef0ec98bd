//! Get Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{
        errors::into_status_error,
        models::{CartDetailEnvelope, CartDetailResponse},
    },
    extensions::*,
    state::State,
};

/// Get Cart Handler
///
/// Returns the caller's cart with every item resolved to its food and restaurant.
#[endpoint(
    tags("carts"),
    summary = "Get Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Cart found"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart not found"),
    ),
)]
#[tracing::instrument(name = "carts.get", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<CartDetailEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let detail = state
        .app
        .carts
        .get_cart(user)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartDetailEnvelope {
        success: true,
        message: "Cart retrieved".to_string(),
        cart: CartDetailResponse::from(detail),
    }))
}
