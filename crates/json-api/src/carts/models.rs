//! Cart responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::carts::models::{Cart, CartDetail, CartItem, CartItemDetail};

use crate::{foods::models::FoodResponse, restaurants::models::RestaurantResponse};

/// Cart Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartResponse {
    /// The user owning the cart
    pub user_uuid: Uuid,

    /// The items in the cart, in the order they were added
    pub items: Vec<CartItemResponse>,

    /// Live-priced total, after any coupon discount
    pub total: u64,

    /// Whether a coupon discount is included in the total
    pub coupon_applied: bool,

    /// The date and time the cart was last updated
    pub updated_at: String,
}

impl From<Cart> for CartResponse {
    fn from(cart: Cart) -> Self {
        Self {
            user_uuid: cart.user_uuid.into_uuid(),
            items: cart.items.into_iter().map(CartItemResponse::from).collect(),
            total: cart.total,
            coupon_applied: cart.coupon_applied,
            updated_at: cart.updated_at.to_string(),
        }
    }
}

/// Cart Item Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemResponse {
    pub food_uuid: Uuid,
    pub quantity: u32,
}

impl From<CartItem> for CartItemResponse {
    fn from(item: CartItem) -> Self {
        Self {
            food_uuid: item.food_uuid.into_uuid(),
            quantity: item.quantity,
        }
    }
}

/// Envelope for cart mutations.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartEnvelope {
    /// Whether the request changed the cart
    pub success: bool,
    pub message: String,
    pub cart: CartResponse,
}

impl CartEnvelope {
    pub(crate) fn new(success: bool, message: &str, cart: Cart) -> Self {
        Self {
            success,
            message: message.to_string(),
            cart: cart.into(),
        }
    }
}

/// Cart with every item resolved to its food and restaurant.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartDetailResponse {
    pub user_uuid: Uuid,
    pub items: Vec<CartItemDetailResponse>,
    pub total: u64,
    pub coupon_applied: bool,
}

impl From<CartDetail> for CartDetailResponse {
    fn from(detail: CartDetail) -> Self {
        Self {
            user_uuid: detail.cart.user_uuid.into_uuid(),
            items: detail
                .items
                .into_iter()
                .map(CartItemDetailResponse::from)
                .collect(),
            total: detail.cart.total,
            coupon_applied: detail.cart.coupon_applied,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartItemDetailResponse {
    pub quantity: u32,
    pub food: FoodResponse,
    pub restaurant: RestaurantResponse,
}

impl From<CartItemDetail> for CartItemDetailResponse {
    fn from(item: CartItemDetail) -> Self {
        Self {
            quantity: item.quantity,
            food: item.food.into(),
            restaurant: item.restaurant.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CartDetailEnvelope {
    pub success: bool,
    pub message: String,
    pub cart: CartDetailResponse,
}
