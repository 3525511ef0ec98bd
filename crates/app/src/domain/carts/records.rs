//! Cart storage records.

use serde::{Deserialize, Serialize};

use crate::domain::{
    carts::models::{Cart, CartItem},
    catalog::models::FoodUuid,
};

/// JSONB document stored in `carts.document`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CartDocument {
    pub items: Vec<CartItemRecord>,
    pub total: u64,
    pub coupon_applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct CartItemRecord {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
}

impl From<&Cart> for CartDocument {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartItemRecord {
                    food_uuid: item.food_uuid,
                    quantity: item.quantity,
                })
                .collect(),
            total: cart.total,
            coupon_applied: cart.coupon_applied,
        }
    }
}

impl From<CartItemRecord> for CartItem {
    fn from(record: CartItemRecord) -> Self {
        CartItem::new(record.food_uuid, record.quantity)
    }
}
