//! List Restaurants Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    restaurants::{errors::into_status_error, models::RestaurantsEnvelope},
    state::State,
};

/// List Restaurants Handler
#[endpoint(
    tags("restaurants"),
    summary = "List Restaurants",
    responses((status_code = StatusCode::OK, description = "Every restaurant")),
)]
#[tracing::instrument(name = "restaurants.index", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<RestaurantsEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let restaurants = state
        .app
        .catalog
        .list_restaurants()
        .await
        .map_err(into_status_error)?;

    Ok(Json(RestaurantsEnvelope {
        success: true,
        message: "Restaurants retrieved".to_string(),
        restaurants: restaurants.into_iter().map(Into::into).collect(),
    }))
}
