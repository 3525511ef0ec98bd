//! Order responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::orders::models::{Order, OrderItem, RestaurantOrder};

/// Order Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderResponse {
    pub uuid: Uuid,
    pub user_uuid: Uuid,

    /// One part per restaurant, in the order they were first added to the cart
    pub restaurants: Vec<RestaurantOrderResponse>,

    /// Amount charged, including any coupon discount
    pub total: u64,

    /// Aggregate status; refreshed by `PATCH /order/update/status`
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            uuid: order.uuid.into_uuid(),
            user_uuid: order.user_uuid.into_uuid(),
            restaurants: order
                .restaurants
                .into_iter()
                .map(RestaurantOrderResponse::from)
                .collect(),
            total: order.total,
            status: order.status.to_string(),
            created_at: order.created_at.to_string(),
            updated_at: order.updated_at.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RestaurantOrderResponse {
    pub restaurant_uuid: Uuid,
    pub items: Vec<OrderItemResponse>,

    /// Undiscounted sum of this restaurant's items
    pub restaurant_total: u64,
    pub status: String,
}

impl From<RestaurantOrder> for RestaurantOrderResponse {
    fn from(sub_order: RestaurantOrder) -> Self {
        Self {
            restaurant_uuid: sub_order.restaurant_uuid.into_uuid(),
            items: sub_order
                .items
                .into_iter()
                .map(OrderItemResponse::from)
                .collect(),
            restaurant_total: sub_order.restaurant_total,
            status: sub_order.status.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderItemResponse {
    pub food_uuid: Uuid,
    pub quantity: u32,

    /// Unit price when the order was placed
    pub price: u64,
}

impl From<OrderItem> for OrderItemResponse {
    fn from(item: OrderItem) -> Self {
        Self {
            food_uuid: item.food_uuid.into_uuid(),
            quantity: item.quantity,
            price: item.price,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrderEnvelope {
    pub success: bool,
    pub message: String,
    pub order: OrderResponse,
}

impl OrderEnvelope {
    pub(crate) fn new(message: &str, order: Order) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            order: order.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct OrdersEnvelope {
    pub success: bool,
    pub message: String,
    pub orders: Vec<OrderResponse>,
}

impl OrdersEnvelope {
    pub(crate) fn new(message: &str, orders: Vec<Order>) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            orders: orders.into_iter().map(OrderResponse::from).collect(),
        }
    }
}
