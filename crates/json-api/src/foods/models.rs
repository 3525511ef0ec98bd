//! Food responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::catalog::models::Food;

/// Food Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FoodResponse {
    pub uuid: Uuid,
    pub restaurant_uuid: Uuid,
    pub name: String,
    pub description: String,

    /// Current menu price in whole currency units
    pub price: u64,
    pub categories: Vec<String>,
    pub image: Option<String>,
}

impl From<Food> for FoodResponse {
    fn from(food: Food) -> Self {
        Self {
            uuid: food.uuid.into_uuid(),
            restaurant_uuid: food.restaurant_uuid.into_uuid(),
            name: food.name,
            description: food.description,
            price: food.price,
            categories: food.categories,
            image: food.image,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FoodEnvelope {
    pub success: bool,
    pub message: String,
    pub food: FoodResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct FoodsEnvelope {
    pub success: bool,
    pub message: String,
    pub foods: Vec<FoodResponse>,
}
