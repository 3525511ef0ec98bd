//! Carts service.

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::{debug, info, warn};

use crate::{
    database::{Db, MAX_WRITE_ATTEMPTS},
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{AddItemOutcome, Cart, CartDetail, CartItem, CartItemDetail},
            pricing::{CartError, PriceList},
            repository::PgCartsRepository,
        },
        catalog::{
            models::{FoodUuid, RestaurantUuid},
            repository::PgCatalogRepository,
        },
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts_repository: PgCartsRepository,
    catalog_repository: PgCatalogRepository,
    users_repository: PgUsersRepository,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts_repository: PgCartsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    /// One read-modify-write attempt. `None` means a concurrent writer won the race.
    async fn try_add_item(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<Option<AddItemOutcome>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        self.users_repository
            .find_user(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::UserNotFound)?;

        let food = self
            .catalog_repository
            .find_food(&mut tx, food)
            .await?
            .ok_or(CartsServiceError::FoodNotFound)?;

        let mut cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .unwrap_or_else(|| Cart::new(user));

        if cart.contains(food.uuid) {
            return Ok(Some(AddItemOutcome { cart, added: false }));
        }

        let mut prices = load_prices(&self.catalog_repository, &mut tx, &cart).await?;

        prune_delisted(&mut cart, &prices)?;

        prices.insert(food.uuid, food.price);

        cart.add_item(CartItem::new(food.uuid, quantity), &prices)?;

        if !self.carts_repository.save_cart(&mut tx, &mut cart).await? {
            return Ok(None);
        }

        tx.commit().await?;

        info!(user_uuid = %user, food_uuid = %food.uuid, total = cart.total, "added item to cart");

        Ok(Some(AddItemOutcome { cart, added: true }))
    }

    async fn try_change_item(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<Option<Cart>, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        if !cart.contains(food) {
            return Err(CartsServiceError::ItemNotFound);
        }

        let prices = load_prices(&self.catalog_repository, &mut tx, &cart).await?;

        // A delisted food has already left the cart; removing it again is a no-op.
        if prune_delisted(&mut cart, &prices)?.contains(&food) {
            if quantity > 0 {
                return Err(CartsServiceError::FoodNotFound);
            }
        } else {
            cart.update_quantity(food, quantity, &prices)?;
        }

        if !self.carts_repository.save_cart(&mut tx, &mut cart).await? {
            return Ok(None);
        }

        tx.commit().await?;

        info!(user_uuid = %user, food_uuid = %food, quantity, total = cart.total, "changed cart item");

        Ok(Some(cart))
    }

    async fn change_item(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if let Some(cart) = self.try_change_item(user, food, quantity).await? {
                return Ok(cart);
            }

            debug!(user_uuid = %user, attempt, "cart changed concurrently, retrying");
        }

        Err(CartsServiceError::Conflict)
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    async fn add_item(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<AddItemOutcome, CartsServiceError> {
        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if let Some(outcome) = self.try_add_item(user, food, quantity).await? {
                return Ok(outcome);
            }

            debug!(user_uuid = %user, attempt, "cart changed concurrently, retrying");
        }

        Err(CartsServiceError::Conflict)
    }

    async fn remove_item(&self, user: UserUuid, food: FoodUuid) -> Result<Cart, CartsServiceError> {
        self.change_item(user, food, 0).await
    }

    async fn update_quantity(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError> {
        self.change_item(user, food, quantity).await
    }

    async fn get_cart(&self, user: UserUuid) -> Result<CartDetail, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        let foods: FxHashMap<_, _> = self
            .catalog_repository
            .get_foods(&mut tx, &cart.food_uuids())
            .await?
            .into_iter()
            .map(|food| (food.uuid, food))
            .collect();

        let restaurant_uuids: Vec<RestaurantUuid> =
            foods.values().map(|food| food.restaurant_uuid).collect();

        let restaurants: FxHashMap<_, _> = self
            .catalog_repository
            .get_restaurants(&mut tx, &restaurant_uuids)
            .await?
            .into_iter()
            .map(|restaurant| (restaurant.uuid, restaurant))
            .collect();

        tx.commit().await?;

        // Shown as the next write will store it.
        prune_delisted(&mut cart, &PriceList::from_foods(foods.values()))?;

        let mut items = Vec::with_capacity(cart.items.len());

        for item in &cart.items {
            let Some(food) = foods.get(&item.food_uuid) else {
                continue;
            };

            let Some(restaurant) = restaurants.get(&food.restaurant_uuid) else {
                warn!(user_uuid = %user, restaurant_uuid = %food.restaurant_uuid, "cart references a restaurant that no longer exists");

                continue;
            };

            items.push(CartItemDetail {
                quantity: item.quantity,
                food: food.clone(),
                restaurant: restaurant.clone(),
            });
        }

        Ok(CartDetail { cart, items })
    }
}

/// Current catalog prices for every item already in the cart.
pub(crate) async fn load_prices(
    catalog: &PgCatalogRepository,
    tx: &mut Transaction<'_, Postgres>,
    cart: &Cart,
) -> Result<PriceList, sqlx::Error> {
    let foods = catalog.get_foods(tx, &cart.food_uuids()).await?;

    Ok(PriceList::from_foods(&foods))
}

/// Drop foods the catalog no longer lists so they cannot block repricing.
pub(crate) fn prune_delisted(
    cart: &mut Cart,
    prices: &PriceList,
) -> Result<Vec<FoodUuid>, CartError> {
    let delisted = cart.prune_delisted(prices)?;

    for food in &delisted {
        warn!(user_uuid = %cart.user_uuid, food_uuid = %food, "dropped delisted food from cart");
    }

    Ok(delisted)
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a food to the user's cart, creating the cart on first use.
    ///
    /// A food already in the cart is not incremented; the outcome reports `added: false`.
    async fn add_item(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<AddItemOutcome, CartsServiceError>;

    /// Remove a food from the user's cart.
    async fn remove_item(&self, user: UserUuid, food: FoodUuid) -> Result<Cart, CartsServiceError>;

    /// Change the quantity of a food already in the cart. Zero removes it.
    async fn update_quantity(
        &self,
        user: UserUuid,
        food: FoodUuid,
        quantity: u32,
    ) -> Result<Cart, CartsServiceError>;

    /// Retrieve the user's cart with foods and restaurants resolved.
    async fn get_cart(&self, user: UserUuid) -> Result<CartDetail, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    #[tokio::test]
    async fn add_item_creates_cart_lazily() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;

        let outcome = ctx.carts.add_item(user, dosa, 2).await?;

        assert!(outcome.added);
        assert_eq!(outcome.cart.total, 240);
        assert_eq!(outcome.cart.version, 1);

        let detail = ctx.carts.get_cart(user).await?;

        assert_eq!(detail.cart, outcome.cart);
        assert_eq!(detail.items.len(), 1);
        assert_eq!(detail.items.first().map(|i| i.restaurant.uuid), Some(restaurant));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_add_leaves_cart_unchanged() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;

        ctx.carts.add_item(user, dosa, 2).await?;
        let outcome = ctx.carts.add_item(user, dosa, 5).await?;

        assert!(!outcome.added);
        assert_eq!(outcome.cart.items, [CartItem::new(dosa, 2)]);
        assert_eq!(outcome.cart.version, 1);

        Ok(())
    }

    #[tokio::test]
    async fn add_unknown_food_returns_food_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;

        let result = ctx.carts.add_item(user, FoodUuid::new(), 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::FoodNotFound)),
            "expected FoodNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_for_unknown_user_returns_user_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;

        let result = ctx.carts.add_item(UserUuid::new(), dosa, 1).await;

        assert!(
            matches!(result, Err(CartsServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn totals_follow_live_catalog_prices() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;
        let vada = helpers::create_food(&ctx, restaurant, "Vada", 30).await?;

        ctx.carts.add_item(user, dosa, 1).await?;
        helpers::set_food_price(&ctx, dosa, 150).await?;

        let cart = ctx.carts.update_quantity(user, vada, 2).await;

        assert!(
            matches!(cart, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound, got {cart:?}"
        );

        let outcome = ctx.carts.add_item(user, vada, 2).await?;

        assert_eq!(outcome.cart.total, 210);

        Ok(())
    }

    #[tokio::test]
    async fn remove_item_on_missing_cart_returns_cart_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;

        let result = ctx.carts.remove_item(user, FoodUuid::new()).await;

        assert!(
            matches!(result, Err(CartsServiceError::CartNotFound)),
            "expected CartNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_adds_do_not_lose_items() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;
        let vada = helpers::create_food(&ctx, restaurant, "Vada", 30).await?;

        ctx.carts.add_item(user, dosa, 1).await?;

        let (first, second) = tokio::join!(
            ctx.carts.update_quantity(user, dosa, 3),
            ctx.carts.add_item(user, vada, 2),
        );

        first?;
        second?;

        let detail = ctx.carts.get_cart(user).await?;

        assert_eq!(detail.cart.items.len(), 2);
        assert_eq!(detail.cart.total, 420);

        Ok(())
    }

    #[tokio::test]
    async fn delisted_food_does_not_block_the_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;
        let vada = helpers::create_food(&ctx, restaurant, "Vada", 30).await?;
        let idli = helpers::create_food(&ctx, restaurant, "Idli", 40).await?;

        ctx.carts.add_item(user, dosa, 1).await?;
        ctx.carts.add_item(user, vada, 2).await?;
        helpers::delete_food(&ctx, dosa).await?;

        let detail = ctx.carts.get_cart(user).await?;

        assert_eq!(detail.cart.items, [CartItem::new(vada, 2)]);
        assert_eq!(detail.cart.total, 60);

        let cart = ctx.carts.update_quantity(user, vada, 3).await?;

        assert_eq!(cart.items, [CartItem::new(vada, 3)]);
        assert_eq!(cart.total, 90);

        let outcome = ctx.carts.add_item(user, idli, 1).await?;

        assert_eq!(outcome.cart.total, 130);

        let updated = ctx.carts.update_quantity(user, dosa, 2).await;

        assert!(
            matches!(updated, Err(CartsServiceError::ItemNotFound)),
            "expected ItemNotFound once pruned, got {updated:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn removing_a_delisted_food_succeeds() -> TestResult {
        let ctx = TestContext::new().await;
        let user = helpers::create_user(&ctx).await?;
        let restaurant = helpers::create_restaurant(&ctx, "Dosa Point").await?;
        let dosa = helpers::create_food(&ctx, restaurant, "Masala Dosa", 120).await?;
        let vada = helpers::create_food(&ctx, restaurant, "Vada", 30).await?;

        ctx.carts.add_item(user, dosa, 1).await?;
        ctx.carts.add_item(user, vada, 1).await?;
        helpers::delete_food(&ctx, dosa).await?;

        let cart = ctx.carts.remove_item(user, dosa).await?;

        assert_eq!(cart.items, [CartItem::new(vada, 1)]);
        assert_eq!(cart.total, 30);

        let updated = ctx.carts.update_quantity(user, vada, 0).await?;

        assert!(updated.items.is_empty());

        Ok(())
    }
}
