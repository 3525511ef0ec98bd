//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use crate::{
    auth::Principal,
    database::{Db, MAX_WRITE_ATTEMPTS},
    domain::{
        carts::repository::PgCartsRepository,
        catalog::{models::RestaurantUuid, repository::PgCatalogRepository},
        orders::{
            assembly::assemble,
            errors::OrdersServiceError,
            models::{Order, OrderStatus, OrderUuid},
            repository::PgOrdersRepository,
            status::TransitionError,
        },
        users::{
            models::{User, UserUuid},
            repository::PgUsersRepository,
        },
    },
    notifications::Notifier,
};

type Transition<'a> = &'a (dyn Fn(&mut Order) -> Result<(), TransitionError> + Sync);

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    carts_repository: PgCartsRepository,
    catalog_repository: PgCatalogRepository,
    users_repository: PgUsersRepository,
    notifier: Arc<dyn Notifier>,
}

impl std::fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            carts_repository: PgCartsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
            users_repository: PgUsersRepository::new(),
            notifier,
        }
    }

    /// Assemble, store and clear in one transaction. `None` means the cart changed meanwhile.
    async fn try_create_order(
        &self,
        user: UserUuid,
    ) -> Result<Option<(Order, User)>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let user = self
            .users_repository
            .find_user(&mut tx, user)
            .await?
            .ok_or(OrdersServiceError::UserNotFound)?;

        let cart = self
            .carts_repository
            .find_cart(&mut tx, user.uuid)
            .await?
            .ok_or(OrdersServiceError::CartNotFound)?;

        let foods: FxHashMap<_, _> = self
            .catalog_repository
            .get_foods(&mut tx, &cart.food_uuids())
            .await?
            .into_iter()
            .map(|food| (food.uuid, food))
            .collect();

        let mut order = assemble(OrderUuid::new(), &cart, &foods, Timestamp::now())?;

        self.orders_repository
            .create_order(&mut tx, &mut order)
            .await?;

        if !self.carts_repository.delete_cart(&mut tx, &cart).await? {
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some((order, user)))
    }

    /// Fire and forget; the order is already committed.
    fn dispatch_confirmation(&self, recipient: User, order: OrderUuid) {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(error) = notifier.send_order_confirmation(&recipient, order).await {
                warn!(order_uuid = %order, error = %error, "failed to send order confirmation");
            }
        });
    }

    async fn try_transition(
        &self,
        principal: Principal,
        order: OrderUuid,
        transition: Transition<'_>,
    ) -> Result<Option<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let mut order = self
            .orders_repository
            .find_order(&mut tx, order)
            .await?
            .filter(|order| is_visible_to(order, principal))
            .ok_or(OrdersServiceError::OrderNotFound)?;

        let before = order.clone();

        transition(&mut order)?;

        if order == before {
            return Ok(Some(order));
        }

        if !self.orders_repository.save_order(&mut tx, &mut order).await? {
            return Ok(None);
        }

        tx.commit().await?;

        Ok(Some(order))
    }

    async fn transition(
        &self,
        principal: Principal,
        order: OrderUuid,
        transition: Transition<'_>,
    ) -> Result<Order, OrdersServiceError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if let Some(order) = self.try_transition(principal, order, transition).await? {
                return Ok(order);
            }

            debug!(order_uuid = %order, attempt, "order changed concurrently, retrying");
        }

        Err(OrdersServiceError::Conflict)
    }
}

/// Owners, restaurants with a sub-order and admins can see an order.
fn is_visible_to(order: &Order, principal: Principal) -> bool {
    if principal.is_admin() {
        return true;
    }

    if let Some(user) = principal.as_user() {
        return order.user_uuid == user;
    }

    principal
        .as_restaurant()
        .is_some_and(|restaurant| order.involves(restaurant))
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn create_order(&self, user: UserUuid) -> Result<Order, OrdersServiceError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if let Some((order, recipient)) = self.try_create_order(user).await? {
                info!(
                    user_uuid = %user,
                    order_uuid = %order.uuid,
                    restaurants = order.restaurants.len(),
                    total = order.total,
                    "created order"
                );

                self.dispatch_confirmation(recipient, order.uuid);

                return Ok(order);
            }

            debug!(user_uuid = %user, attempt, "cart changed during checkout, retrying");
        }

        Err(OrdersServiceError::Conflict)
    }

    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let order = self
            .orders_repository
            .find_order(&mut tx, order)
            .await?
            .filter(|order| is_visible_to(order, principal))
            .ok_or(OrdersServiceError::OrderNotFound)?;

        tx.commit().await?;

        Ok(order)
    }

    async fn list_user_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_user_orders(&mut tx, user).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_restaurant_orders(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_restaurant_orders(&mut tx, restaurant)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let orders = self.orders_repository.list_orders(&mut tx).await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn total_amount(&self) -> Result<u64, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let total = self.orders_repository.total_amount(&mut tx).await?;

        tx.commit().await?;

        Ok(total)
    }

    async fn set_sub_order_status(
        &self,
        restaurant: RestaurantUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let updated = self
            .transition(Principal::restaurant(restaurant), order, &|order: &mut Order| {
                order.set_sub_order_status(restaurant, status)
            })
            .await?;

        info!(order_uuid = %order, restaurant_uuid = %restaurant, %status, "updated sub-order status");

        Ok(updated)
    }

    async fn cancel_sub_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        restaurant: RestaurantUuid,
    ) -> Result<Order, OrdersServiceError> {
        let updated = self
            .transition(Principal::user(user), order, &|order: &mut Order| {
                order.cancel_sub_order(restaurant)
            })
            .await?;

        info!(order_uuid = %order, restaurant_uuid = %restaurant, "cancelled sub-order");

        Ok(updated)
    }

    async fn cancel_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        let updated = self
            .transition(Principal::user(user), order, &Order::cancel)
            .await?;

        info!(order_uuid = %order, status = %updated.status, "cancelled order");

        Ok(updated)
    }

    async fn recompute_status(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError> {
        self.transition(principal, order, &|order: &mut Order| {
            order.recompute_status();

            Ok(())
        })
        .await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the user's cart into an order and delete the cart.
    ///
    /// A confirmation is sent to the user's mobile number once the order is stored; sending
    /// failures are logged and never undo the order.
    async fn create_order(&self, user: UserUuid) -> Result<Order, OrdersServiceError>;

    /// Fetch an order the principal is allowed to see.
    async fn get_order(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// The user's orders, newest first.
    async fn list_user_orders(&self, user: UserUuid) -> Result<Vec<Order>, OrdersServiceError>;

    /// Orders with a sub-order for the restaurant, newest first.
    async fn list_restaurant_orders(
        &self,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<Order>, OrdersServiceError>;

    async fn list_orders(&self) -> Result<Vec<Order>, OrdersServiceError>;

    /// Sum of all order totals.
    async fn total_amount(&self) -> Result<u64, OrdersServiceError>;

    /// Overwrite the restaurant's sub-order status. The order status is left alone.
    async fn set_sub_order_status(
        &self,
        restaurant: RestaurantUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel one restaurant's pending part of the user's order.
    async fn cancel_sub_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
        restaurant: RestaurantUuid,
    ) -> Result<Order, OrdersServiceError>;

    /// Cancel everything in the user's order that is not yet confirmed or delivered.
    async fn cancel_order(&self, user: UserUuid, order: OrderUuid)
    -> Result<Order, OrdersServiceError>;

    /// Refresh the order status from its sub-orders.
    async fn recompute_status(
        &self,
        principal: Principal,
        order: OrderUuid,
    ) -> Result<Order, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;
    use tokio::sync::Notify;

    use crate::{
        domain::{carts::CartsService, coupons::CouponsService},
        notifications::{MockNotifier, NotificationError},
        test::{TestContext, helpers},
    };

    use super::*;

    #[tokio::test]
    async fn create_order_splits_cart_and_deletes_it() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx).await?;
        let dosa_point = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let chai_stop = helpers::create_restaurant(&ctx, "Chai Stop").await?;
        let dosa = helpers::create_food(&ctx, dosa_point, "Masala Dosa", 100).await?;
        let chai = helpers::create_food(&ctx, chai_stop, "Masala Chai", 50).await?;
        let thali = helpers::create_food(&ctx, dosa_point, "Thali", 300).await?;

        ctx.carts.add_item(user, dosa, 2).await?;
        ctx.carts.add_item(user, chai, 1).await?;
        ctx.carts.add_item(user, thali, 1).await?;
        ctx.coupons.apply_coupon(user, "ORDER500").await?;

        let order = ctx.orders.create_order(user).await?;

        assert_eq!(order.total, 450);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.restaurants.len(), 2);
        assert_eq!(order.subtotal(), 550);

        let dosa_order = order.restaurant_order(dosa_point).ok_or("missing sub-order")?;
        assert_eq!(dosa_order.restaurant_total, 500);
        assert_eq!(dosa_order.items.len(), 2);

        let result = ctx.carts.get_cart(user).await;
        assert!(
            matches!(result, Err(crate::domain::carts::CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );

        let mine = ctx.orders.list_user_orders(user).await?;
        assert_eq!(mine.len(), 1);
        assert_eq!(ctx.orders.list_restaurant_orders(chai_stop).await?.len(), 1);
        assert_eq!(ctx.orders.total_amount().await?, 450);

        Ok(())
    }

    #[tokio::test]
    async fn failed_confirmation_keeps_the_order() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let dosa_point = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, dosa_point, "Masala Dosa", 120).await?;

        ctx.carts.add_item(user, dosa, 1).await?;

        let attempted = Arc::new(Notify::new());
        let signal = Arc::clone(&attempted);

        let mut notifier = MockNotifier::new();

        notifier
            .expect_send_order_confirmation()
            .withf(move |recipient, _| recipient.uuid == user && recipient.name == "Asha")
            .times(1)
            .returning(move |_, _| {
                signal.notify_one();

                Err(NotificationError::Rejected(400))
            });

        let orders = PgOrdersService::new(Db::new(ctx.db.pool().clone()), Arc::new(notifier));

        let order = orders.create_order(user).await?;

        attempted.notified().await;

        let stored = orders.get_order(Principal::user(user), order.uuid).await?;

        assert_eq!(stored.uuid, order.uuid);
        assert_eq!(stored.total, 120);
        assert_eq!(orders.list_user_orders(user).await?.len(), 1);

        let cart = ctx.carts.get_cart(user).await;

        assert!(
            matches!(cart, Err(crate::domain::carts::CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {cart:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn create_order_without_cart_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;

        let result = ctx.orders.create_order(user).await;

        assert!(
            matches!(result, Err(OrdersServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn orders_are_hidden_from_other_principals() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx).await?;
        let stranger = helpers::create_user(&ctx).await?;
        let dosa_point = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let other_kitchen = helpers::create_restaurant(&ctx, "Other Kitchen").await?;
        let dosa = helpers::create_food(&ctx, dosa_point, "Masala Dosa", 120).await?;

        ctx.carts.add_item(user, dosa, 1).await?;
        let order = ctx.orders.create_order(user).await?;

        ctx.orders.get_order(Principal::user(user), order.uuid).await?;
        ctx.orders
            .get_order(Principal::restaurant(dosa_point), order.uuid)
            .await?;

        for principal in [Principal::user(stranger), Principal::restaurant(other_kitchen)] {
            let result = ctx.orders.get_order(principal, order.uuid).await;

            assert!(
                matches!(result, Err(OrdersServiceError::OrderNotFound)),
                "expected OrderNotFound, got {result:?}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn restaurant_updates_converge_after_recompute() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx).await?;
        let dosa_point = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let chai_stop = helpers::create_restaurant(&ctx, "Chai Stop").await?;
        let dosa = helpers::create_food(&ctx, dosa_point, "Masala Dosa", 120).await?;
        let chai = helpers::create_food(&ctx, chai_stop, "Masala Chai", 30).await?;

        ctx.carts.add_item(user, dosa, 1).await?;
        ctx.carts.add_item(user, chai, 1).await?;
        let order = ctx.orders.create_order(user).await?;

        let order_after_first = ctx
            .orders
            .set_sub_order_status(dosa_point, order.uuid, OrderStatus::Delivered)
            .await?;
        assert_eq!(order_after_first.status, OrderStatus::Pending);

        ctx.orders
            .set_sub_order_status(chai_stop, order.uuid, OrderStatus::Confirmed)
            .await?;

        let recomputed = ctx
            .orders
            .recompute_status(Principal::user(user), order.uuid)
            .await?;

        assert_eq!(recomputed.status, OrderStatus::Confirmed);

        Ok(())
    }

    #[tokio::test]
    async fn cancel_order_with_confirmed_part_leaves_status() -> TestResult {
        let ctx = TestContext::new().await;

        let user = helpers::create_user(&ctx).await?;
        let dosa_point = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let chai_stop = helpers::create_restaurant(&ctx, "Chai Stop").await?;
        let dosa = helpers::create_food(&ctx, dosa_point, "Masala Dosa", 120).await?;
        let chai = helpers::create_food(&ctx, chai_stop, "Masala Chai", 30).await?;

        ctx.carts.add_item(user, dosa, 1).await?;
        ctx.carts.add_item(user, chai, 1).await?;
        let order = ctx.orders.create_order(user).await?;

        ctx.orders
            .set_sub_order_status(chai_stop, order.uuid, OrderStatus::Confirmed)
            .await?;

        let cancelled = ctx.orders.cancel_order(user, order.uuid).await?;

        assert_eq!(cancelled.status, OrderStatus::Pending);
        assert_eq!(
            cancelled
                .restaurant_order(dosa_point)
                .map(|sub_order| sub_order.status),
            Some(OrderStatus::Cancelled)
        );
        assert_eq!(
            cancelled
                .restaurant_order(chai_stop)
                .map(|sub_order| sub_order.status),
            Some(OrderStatus::Confirmed)
        );

        let result = ctx
            .orders
            .cancel_sub_order(user, order.uuid, chai_stop)
            .await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::InvalidTransition {
                    from: OrderStatus::Confirmed
                })
            ),
            "expected InvalidTransition, got {result:?}"
        );

        Ok(())
    }
}
