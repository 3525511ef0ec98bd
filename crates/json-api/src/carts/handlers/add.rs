//! Add Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::catalog::models::FoodUuid;

use crate::{
    carts::{errors::into_status_error, models::CartEnvelope},
    extensions::*,
    state::State,
};

/// Add Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AddItemRequest {
    pub food_uuid: Uuid,

    /// Number of portions; must be at least one
    pub quantity: u32,
}

/// Add Cart Item Handler
///
/// Adds a food to the caller's cart, creating the cart if needed. A food that is already in the
/// cart is left untouched and reported with `success: false`.
#[endpoint(
    tags("carts"),
    summary = "Add Item to Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item added, or already in the cart"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid quantity"),
        (status_code = StatusCode::NOT_FOUND, description = "User or food not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart modified concurrently"),
    ),
)]
#[tracing::instrument(name = "carts.add", skip(json, depot))]
pub(crate) async fn handler(
    json: JsonBody<AddItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;
    let request = json.into_inner();

    let outcome = state
        .app
        .carts
        .add_item(user, FoodUuid::from_uuid(request.food_uuid), request.quantity)
        .await
        .map_err(into_status_error)?;

    let message = if outcome.added {
        "Item added to cart"
    } else {
        "Item already in cart"
    };

    Ok(Json(CartEnvelope::new(outcome.added, message, outcome.cart)))
}
