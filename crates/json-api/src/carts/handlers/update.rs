//! Update Cart Item Handler

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

/// Update Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateItemRequest {
    pub food_uuid: Uuid,

    /// New quantity; zero removes the item
    pub quantity: u32,
}

/// Update Cart Item Handler
#[endpoint(
    tags("carts"),
    summary = "Update Cart Item Quantity",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Quantity updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart modified concurrently"),
    ),
)]
#[tracing::instrument(name = "carts.update", skip(json, depot))]
pub(crate) async fn handler(
    json: JsonBody<UpdateItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;
    let request = json.into_inner();

    let cart = state
        .app
        .carts
        .update_quantity(user, FoodUuid::from_uuid(request.food_uuid), request.quantity)
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(true, "Cart updated", cart)))
}
