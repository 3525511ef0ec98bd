//! Live cart pricing.
//!
//! Cart totals are always derived from the catalog's current prices, never from prices cached on
//! the cart items.

use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::domain::{
    carts::models::CartItem,
    catalog::models::{Food, FoodUuid},
};

/// Errors raised by pure cart bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("item is not in the cart")]
    ItemNotFound,

    #[error("food {0} has no catalog price")]
    UnknownFood(FoodUuid),

    #[error("quantity must be at least one")]
    InvalidQuantity,

    #[error("cart total overflowed")]
    TotalOverflow,
}

/// Current catalog prices keyed by food.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceList(FxHashMap<FoodUuid, u64>);

impl PriceList {
    #[must_use]
    pub fn from_foods<'a>(foods: impl IntoIterator<Item = &'a Food>) -> Self {
        foods
            .into_iter()
            .map(|food| (food.uuid, food.price))
            .collect()
    }

    pub fn insert(&mut self, food: FoodUuid, price: u64) {
        self.0.insert(food, price);
    }

    #[must_use]
    pub fn contains(&self, food: FoodUuid) -> bool {
        self.0.contains_key(&food)
    }

    /// Current price of a single food.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::UnknownFood`] when the catalog no longer lists the food.
    pub fn price_of(&self, food: FoodUuid) -> Result<u64, CartError> {
        self.0
            .get(&food)
            .copied()
            .ok_or(CartError::UnknownFood(food))
    }

    /// Undiscounted sum of `quantity × price` over the given items.
    ///
    /// # Errors
    ///
    /// Returns an error when a food is missing from the list or the sum overflows.
    pub fn subtotal<'a>(
        &self,
        items: impl IntoIterator<Item = &'a CartItem>,
    ) -> Result<u64, CartError> {
        items.into_iter().try_fold(0_u64, |total, item| {
            let line = self
                .price_of(item.food_uuid)?
                .checked_mul(u64::from(item.quantity))
                .ok_or(CartError::TotalOverflow)?;

            total.checked_add(line).ok_or(CartError::TotalOverflow)
        })
    }
}

impl FromIterator<(FoodUuid, u64)> for PriceList {
    fn from_iter<I: IntoIterator<Item = (FoodUuid, u64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
