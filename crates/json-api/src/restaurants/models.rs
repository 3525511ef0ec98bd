//! Restaurant responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::catalog::models::Restaurant;

/// Restaurant Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestaurantResponse {
    pub uuid: Uuid,
    pub name: String,
    pub location: String,
    pub description: String,
    pub mobile: String,
    pub image: Option<String>,
    pub categories: Vec<String>,

    /// Typical preparation time, e.g. `30 min`
    pub making_time: String,

    /// Whether the restaurant is taking orders
    pub is_open: bool,
}

impl From<Restaurant> for RestaurantResponse {
    fn from(restaurant: Restaurant) -> Self {
        Self {
            uuid: restaurant.uuid.into_uuid(),
            name: restaurant.name,
            location: restaurant.location,
            description: restaurant.description,
            mobile: restaurant.mobile,
            image: restaurant.image,
            categories: restaurant.categories,
            making_time: restaurant.making_time,
            is_open: restaurant.is_open,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestaurantsEnvelope {
    pub success: bool,
    pub message: String,
    pub restaurants: Vec<RestaurantResponse>,
}
