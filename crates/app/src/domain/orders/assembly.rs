//! Turning a cart into an order.

use jiff::Timestamp;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::domain::{
    carts::models::Cart,
    catalog::models::{Food, FoodUuid, RestaurantUuid},
    orders::models::{Order, OrderItem, OrderStatus, OrderUuid, RestaurantOrder},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    #[error("cart has no items")]
    EmptyCart,

    #[error("food {0} is no longer in the catalog")]
    UnknownFood(FoodUuid),

    #[error("food {0} has a non-positive price or quantity")]
    InvalidItem(FoodUuid),

    #[error("order total overflowed")]
    TotalOverflow,
}

/// Build an order with one pending sub-order per restaurant in the cart.
///
/// Restaurants appear in the order their first item was added, and items keep their cart order
/// inside each sub-order. Every item is priced from `foods` and that price is frozen on the
/// order. The order total is the cart total as is, discount included. Nothing is produced if any
/// item fails validation.
///
/// # Errors
///
/// Returns an error for an empty cart, a food missing from `foods`, or an item with a zero price
/// or quantity.
pub fn assemble(
    uuid: OrderUuid,
    cart: &Cart,
    foods: &FxHashMap<FoodUuid, Food>,
    created_at: Timestamp,
) -> Result<Order, AssemblyError> {
    if cart.items.is_empty() {
        return Err(AssemblyError::EmptyCart);
    }

    let mut partitions: Vec<(RestaurantUuid, SmallVec<[OrderItem; 4]>)> = Vec::new();

    for item in &cart.items {
        let food = foods
            .get(&item.food_uuid)
            .ok_or(AssemblyError::UnknownFood(item.food_uuid))?;

        if food.price == 0 || item.quantity == 0 {
            return Err(AssemblyError::InvalidItem(item.food_uuid));
        }

        let order_item = OrderItem {
            food_uuid: item.food_uuid,
            quantity: item.quantity,
            price: food.price,
        };

        match partitions
            .iter_mut()
            .find(|(restaurant, _)| *restaurant == food.restaurant_uuid)
        {
            Some((_, items)) => items.push(order_item),
            None => partitions.push((food.restaurant_uuid, SmallVec::from_elem(order_item, 1))),
        }
    }

    let restaurants = partitions
        .into_iter()
        .map(|(restaurant_uuid, items)| {
            let restaurant_total = items.iter().try_fold(0_u64, |total, item| {
                item.price
                    .checked_mul(u64::from(item.quantity))
                    .and_then(|line| total.checked_add(line))
                    .ok_or(AssemblyError::TotalOverflow)
            })?;

            Ok(RestaurantOrder {
                restaurant_uuid,
                items: items.into_vec(),
                restaurant_total,
                status: OrderStatus::Pending,
            })
        })
        .collect::<Result<Vec<_>, AssemblyError>>()?;

    Ok(Order {
        uuid,
        user_uuid: cart.user_uuid,
        restaurants,
        total: cart.total,
        status: OrderStatus::Pending,
        version: 0,
        created_at,
        updated_at: created_at,
    })
}
