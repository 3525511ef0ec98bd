//! Order storage records.

use serde::{Deserialize, Serialize};

use crate::domain::{
    catalog::models::{FoodUuid, RestaurantUuid},
    orders::models::{OrderItem, OrderStatus, RestaurantOrder},
};

/// JSONB document stored in `orders.document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OrderDocument {
    pub restaurants: Vec<RestaurantOrderRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RestaurantOrderRecord {
    pub restaurant_uuid: RestaurantUuid,
    pub items: Vec<OrderItemRecord>,
    pub restaurant_total: u64,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct OrderItemRecord {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
    pub price: u64,
}

impl From<&[RestaurantOrder]> for OrderDocument {
    fn from(restaurants: &[RestaurantOrder]) -> Self {
        Self {
            restaurants: restaurants
                .iter()
                .map(|sub_order| RestaurantOrderRecord {
                    restaurant_uuid: sub_order.restaurant_uuid,
                    items: sub_order
                        .items
                        .iter()
                        .map(|item| OrderItemRecord {
                            food_uuid: item.food_uuid,
                            quantity: item.quantity,
                            price: item.price,
                        })
                        .collect(),
                    restaurant_total: sub_order.restaurant_total,
                    status: sub_order.status,
                })
                .collect(),
        }
    }
}

impl From<RestaurantOrderRecord> for RestaurantOrder {
    fn from(record: RestaurantOrderRecord) -> Self {
        Self {
            restaurant_uuid: record.restaurant_uuid,
            items: record
                .items
                .into_iter()
                .map(|item| OrderItem {
                    food_uuid: item.food_uuid,
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            restaurant_total: record.restaurant_total,
            status: record.status,
        }
    }
}
