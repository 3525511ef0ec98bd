//! Order Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        catalog::models::{FoodUuid, RestaurantUuid},
        users::models::UserUuid,
    },
    uuids::TypedUuid,
};

pub type OrderUuid = TypedUuid<Order>;

/// Status shared by orders and their per-restaurant sub-orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    /// Confirmed and delivered sub-orders are committed to and can no longer be cancelled.
    #[must_use]
    pub const fn is_committed(self) -> bool {
        matches!(self, Self::Confirmed | Self::Delivered)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(UnknownOrderStatus(value.to_string())),
        }
    }
}

/// An ordered food with the price it had when the order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderItem {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
    pub price: u64,
}

/// The part of an order fulfilled by one restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestaurantOrder {
    pub restaurant_uuid: RestaurantUuid,
    pub items: Vec<OrderItem>,

    /// Undiscounted sum of the items; coupons only ever apply to the order total.
    pub restaurant_total: u64,
    pub status: OrderStatus,
}

/// Order Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub uuid: OrderUuid,
    pub user_uuid: UserUuid,
    pub restaurants: Vec<RestaurantOrder>,

    /// The cart total at checkout, including any coupon discount.
    pub total: u64,

    /// Aggregate of the sub-order statuses, refreshed only on request.
    pub status: OrderStatus,
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Order {
    #[must_use]
    pub fn restaurant_order(&self, restaurant: RestaurantUuid) -> Option<&RestaurantOrder> {
        self.restaurants
            .iter()
            .find(|sub_order| sub_order.restaurant_uuid == restaurant)
    }

    #[must_use]
    pub fn involves(&self, restaurant: RestaurantUuid) -> bool {
        self.restaurant_order(restaurant).is_some()
    }

    /// Undiscounted value of all sub-orders.
    #[must_use]
    pub fn subtotal(&self) -> u64 {
        self.restaurants
            .iter()
            .map(|sub_order| sub_order.restaurant_total)
            .fold(0, u64::saturating_add)
    }
}
