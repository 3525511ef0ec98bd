//! Order status transitions.
//!
//! Each sub-order moves `Pending → Confirmed → Delivered`, and can be cancelled while it is
//! still pending. The order's own status is an aggregate of its sub-orders that is only
//! refreshed when [`Order::recompute_status`] is called; sub-order writes never touch it.

use thiserror::Error;

use crate::domain::{
    catalog::models::RestaurantUuid,
    orders::models::{Order, OrderStatus, RestaurantOrder},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("order has no sub-order for this restaurant")]
    SubOrderNotFound,

    #[error("cannot change a {from} order")]
    InvalidTransition { from: OrderStatus },
}

impl Order {
    fn restaurant_order_mut(
        &mut self,
        restaurant: RestaurantUuid,
    ) -> Result<&mut RestaurantOrder, TransitionError> {
        self.restaurants
            .iter_mut()
            .find(|sub_order| sub_order.restaurant_uuid == restaurant)
            .ok_or(TransitionError::SubOrderNotFound)
    }

    /// Overwrite a sub-order's status. Any status may follow any other except `Cancelled`,
    /// which is terminal.
    ///
    /// # Errors
    ///
    /// Fails when the restaurant has no sub-order or the sub-order is cancelled.
    pub fn set_sub_order_status(
        &mut self,
        restaurant: RestaurantUuid,
        status: OrderStatus,
    ) -> Result<(), TransitionError> {
        let sub_order = self.restaurant_order_mut(restaurant)?;

        if sub_order.status == OrderStatus::Cancelled {
            return Err(TransitionError::InvalidTransition {
                from: OrderStatus::Cancelled,
            });
        }

        sub_order.status = status;

        Ok(())
    }

    /// Cancel one restaurant's part of the order.
    ///
    /// # Errors
    ///
    /// Fails when the restaurant has no sub-order, or it is confirmed, delivered or already
    /// cancelled.
    pub fn cancel_sub_order(&mut self, restaurant: RestaurantUuid) -> Result<(), TransitionError> {
        let sub_order = self.restaurant_order_mut(restaurant)?;

        if sub_order.status != OrderStatus::Pending {
            return Err(TransitionError::InvalidTransition {
                from: sub_order.status,
            });
        }

        sub_order.status = OrderStatus::Cancelled;

        Ok(())
    }

    /// Cancel every sub-order that is not yet confirmed or delivered.
    ///
    /// Afterwards the order becomes `Cancelled` if every sub-order is cancelled, or `Delivered`
    /// if every sub-order is confirmed or delivered. Any other mix leaves the order status as it
    /// was.
    ///
    /// # Errors
    ///
    /// Fails when the order itself is confirmed or delivered.
    pub fn cancel(&mut self) -> Result<(), TransitionError> {
        if self.status.is_committed() {
            return Err(TransitionError::InvalidTransition { from: self.status });
        }

        for sub_order in &mut self.restaurants {
            if !sub_order.status.is_committed() {
                sub_order.status = OrderStatus::Cancelled;
            }
        }

        if self.all_sub_orders(|status| status == OrderStatus::Cancelled) {
            self.status = OrderStatus::Cancelled;
        } else if self.all_sub_orders(OrderStatus::is_committed) {
            self.status = OrderStatus::Delivered;
        }

        Ok(())
    }

    /// Refresh the aggregate status from the sub-orders.
    ///
    /// All pending gives `Pending`, all delivered gives `Delivered`, and all confirmed or
    /// delivered gives `Confirmed`. Any other mix, cancellations included, leaves it unchanged.
    pub fn recompute_status(&mut self) {
        if self.all_sub_orders(|status| status == OrderStatus::Pending) {
            self.status = OrderStatus::Pending;
        } else if self.all_sub_orders(|status| status == OrderStatus::Delivered) {
            self.status = OrderStatus::Delivered;
        } else if self.all_sub_orders(OrderStatus::is_committed) {
            self.status = OrderStatus::Confirmed;
        }
    }

    fn all_sub_orders(&self, predicate: impl Fn(OrderStatus) -> bool) -> bool {
        self.restaurants
            .iter()
            .all(|sub_order| predicate(sub_order.status))
    }
}
