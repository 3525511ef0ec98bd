//! Cart Models

use jiff::Timestamp;

use crate::domain::{
    carts::pricing::{CartError, PriceList},
    catalog::models::{Food, FoodUuid, Restaurant},
    users::models::UserUuid,
};

/// Cart Model
///
/// A user has at most one cart. It is created lazily on the first added item and deleted once
/// an order has been placed from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    pub user_uuid: UserUuid,
    pub items: Vec<CartItem>,

    /// Live-priced sum of the items, minus the coupon discount when one is applied.
    pub total: u64,
    pub coupon_applied: bool,

    /// Optimistic concurrency token; zero until the cart is first stored.
    pub version: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// CartItem Model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartItem {
    pub food_uuid: FoodUuid,
    pub quantity: u32,
}

impl CartItem {
    #[must_use]
    pub const fn new(food_uuid: FoodUuid, quantity: u32) -> Self {
        Self {
            food_uuid,
            quantity,
        }
    }
}

/// Result of adding an item to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemOutcome {
    pub cart: Cart,

    /// `false` when the food was already in the cart and nothing changed.
    pub added: bool,
}

/// A cart with each item resolved to its food and restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartDetail {
    pub cart: Cart,
    pub items: Vec<CartItemDetail>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemDetail {
    pub quantity: u32,
    pub food: Food,
    pub restaurant: Restaurant,
}

impl Cart {
    /// An empty, not yet persisted cart.
    #[must_use]
    pub fn new(user_uuid: UserUuid) -> Self {
        let now = Timestamp::now();

        Self {
            user_uuid,
            items: Vec::new(),
            total: 0,
            coupon_applied: false,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.version > 0
    }

    #[must_use]
    pub fn contains(&self, food: FoodUuid) -> bool {
        self.items.iter().any(|item| item.food_uuid == food)
    }

    #[must_use]
    pub fn food_uuids(&self) -> Vec<FoodUuid> {
        self.items.iter().map(|item| item.food_uuid).collect()
    }

    /// Undiscounted total at current prices.
    ///
    /// # Errors
    ///
    /// Returns an error when an item's food has no price or the sum overflows.
    pub fn subtotal(&self, prices: &PriceList) -> Result<u64, CartError> {
        prices.subtotal(&self.items)
    }

    /// Append an item unless its food is already present.
    ///
    /// Adding clears any applied coupon. A duplicate food leaves the cart untouched and reports
    /// `Ok(false)`; quantities are never incremented.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero quantity or when repricing fails.
    pub fn add_item(&mut self, item: CartItem, prices: &PriceList) -> Result<bool, CartError> {
        if item.quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        if self.contains(item.food_uuid) {
            return Ok(false);
        }

        let total = prices.subtotal(self.items.iter().chain([&item]))?;

        self.items.push(item);
        self.total = total;
        self.coupon_applied = false;

        Ok(true)
    }

    /// Remove an item and reprice the rest.
    ///
    /// The coupon flag is only reset once the cart is empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] when the food is not in the cart.
    pub fn remove_item(&mut self, food: FoodUuid, prices: &PriceList) -> Result<(), CartError> {
        if !self.contains(food) {
            return Err(CartError::ItemNotFound);
        }

        let total = prices.subtotal(self.items.iter().filter(|item| item.food_uuid != food))?;

        self.items.retain(|item| item.food_uuid != food);
        self.total = total;

        if self.items.is_empty() {
            self.coupon_applied = false;
        }

        Ok(())
    }

    /// Set an item's quantity and reprice. A quantity of zero removes the item.
    ///
    /// Unlike removal, a non-zero update keeps the coupon flag as it is.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ItemNotFound`] when the food is not in the cart.
    pub fn update_quantity(
        &mut self,
        food: FoodUuid,
        quantity: u32,
        prices: &PriceList,
    ) -> Result<(), CartError> {
        if quantity == 0 {
            return self.remove_item(food, prices);
        }

        let mut items = self.items.clone();

        let item = items
            .iter_mut()
            .find(|item| item.food_uuid == food)
            .ok_or(CartError::ItemNotFound)?;

        item.quantity = quantity;

        self.total = prices.subtotal(&items)?;
        self.items = items;

        Ok(())
    }

    /// Drop items whose food the catalog no longer lists, repricing what is left.
    ///
    /// Returns the dropped foods. Like removal, the coupon flag is only reset once the cart is
    /// empty. Nothing changes when every food is still listed.
    ///
    /// # Errors
    ///
    /// Returns an error when repricing the remaining items overflows.
    pub fn prune_delisted(&mut self, prices: &PriceList) -> Result<Vec<FoodUuid>, CartError> {
        let delisted: Vec<FoodUuid> = self
            .items
            .iter()
            .map(|item| item.food_uuid)
            .filter(|food| !prices.contains(*food))
            .collect();

        if delisted.is_empty() {
            return Ok(delisted);
        }

        let total = prices.subtotal(
            self.items
                .iter()
                .filter(|item| prices.contains(item.food_uuid)),
        )?;

        self.items.retain(|item| prices.contains(item.food_uuid));
        self.total = total;

        if self.items.is_empty() {
            self.coupon_applied = false;
        }

        Ok(delisted)
    }

    /// Take a coupon discount off the current total, never going below zero.
    pub fn apply_discount(&mut self, discount: u64) {
        self.total = self.total.saturating_sub(discount);
        self.coupon_applied = true;
    }

    /// Drop the coupon and restore the undiscounted total from current prices.
    ///
    /// # Errors
    ///
    /// Returns an error when repricing fails.
    pub fn clear_coupon(&mut self, prices: &PriceList) -> Result<(), CartError> {
        self.total = self.subtotal(prices)?;
        self.coupon_applied = false;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    struct Menu {
        a: FoodUuid,
        b: FoodUuid,
        c: FoodUuid,
        prices: PriceList,
    }

    fn menu() -> Menu {
        let (a, b, c) = (FoodUuid::new(), FoodUuid::new(), FoodUuid::new());

        Menu {
            a,
            b,
            c,
            prices: [(a, 100), (b, 50), (c, 300)].into_iter().collect(),
        }
    }

    fn cart() -> Cart {
        Cart::new(UserUuid::new())
    }

    #[test]
    fn add_item_totals_items_at_current_prices() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        assert!(cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?);
        assert!(cart.add_item(CartItem::new(menu.b, 1), &menu.prices)?);

        assert_eq!(cart.total, 250);
        assert_eq!(cart.items.len(), 2);

        Ok(())
    }

    #[test]
    fn add_item_uses_live_prices_for_existing_items() -> TestResult {
        let mut menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;

        menu.prices.insert(menu.a, 150);

        cart.add_item(CartItem::new(menu.b, 1), &menu.prices)?;

        assert_eq!(cart.total, 350);

        Ok(())
    }

    #[test]
    fn duplicate_add_is_a_no_op() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;
        let before = cart.clone();

        for quantity in [1, 2, 7] {
            let added = cart.add_item(CartItem::new(menu.a, quantity), &menu.prices)?;

            assert!(!added, "duplicate add should report nothing added");
        }

        assert_eq!(cart, before);
        assert_eq!(cart.items, [CartItem::new(menu.a, 2)]);

        Ok(())
    }

    #[test]
    fn add_item_rejects_zero_quantity() {
        let menu = menu();
        let mut cart = cart();

        let result = cart.add_item(CartItem::new(menu.a, 0), &menu.prices);

        assert_eq!(result, Err(CartError::InvalidQuantity));
        assert!(cart.items.is_empty());
    }

    #[test]
    fn add_item_clears_applied_coupon() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.c, 2), &menu.prices)?;
        cart.apply_discount(100);

        cart.add_item(CartItem::new(menu.b, 1), &menu.prices)?;

        assert!(!cart.coupon_applied);
        assert_eq!(cart.total, 650);

        Ok(())
    }

    #[test]
    fn remove_item_reprices_remaining_items() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;
        cart.add_item(CartItem::new(menu.b, 1), &menu.prices)?;

        cart.remove_item(menu.a, &menu.prices)?;

        assert_eq!(cart.items, [CartItem::new(menu.b, 1)]);
        assert_eq!(cart.total, 50);

        Ok(())
    }

    #[test]
    fn remove_item_keeps_coupon_flag_while_items_remain() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;
        cart.add_item(CartItem::new(menu.b, 1), &menu.prices)?;
        cart.apply_discount(100);

        cart.remove_item(menu.b, &menu.prices)?;

        assert!(cart.coupon_applied);

        cart.remove_item(menu.a, &menu.prices)?;

        assert!(!cart.coupon_applied);
        assert_eq!(cart.total, 0);

        Ok(())
    }

    #[test]
    fn remove_missing_item_returns_item_not_found() {
        let menu = menu();
        let mut cart = cart();

        assert_eq!(
            cart.remove_item(menu.a, &menu.prices),
            Err(CartError::ItemNotFound)
        );
    }

    #[test]
    fn update_quantity_reprices_and_keeps_coupon_flag() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.c, 2), &menu.prices)?;
        cart.apply_discount(100);

        cart.update_quantity(menu.c, 3, &menu.prices)?;

        assert_eq!(cart.total, 900);
        assert!(cart.coupon_applied);

        Ok(())
    }

    #[test]
    fn update_quantity_to_zero_removes_item() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;
        cart.apply_discount(50);

        cart.update_quantity(menu.a, 0, &menu.prices)?;

        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);
        assert!(!cart.coupon_applied);

        Ok(())
    }

    #[test]
    fn update_quantity_of_missing_item_returns_item_not_found() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;

        assert_eq!(
            cart.update_quantity(menu.b, 4, &menu.prices),
            Err(CartError::ItemNotFound)
        );
        assert_eq!(cart.total, 200);

        Ok(())
    }

    #[test]
    fn recomputing_the_subtotal_is_idempotent() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 2), &menu.prices)?;
        cart.add_item(CartItem::new(menu.c, 1), &menu.prices)?;

        let first = cart.subtotal(&menu.prices)?;
        let second = cart.subtotal(&menu.prices)?;

        assert_eq!(first, second);
        assert_eq!(first, cart.total);

        Ok(())
    }

    #[test]
    fn discount_never_drives_total_below_zero() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.b, 1), &menu.prices)?;
        cart.apply_discount(200);

        assert_eq!(cart.total, 0);
        assert!(cart.coupon_applied);

        Ok(())
    }

    #[test]
    fn clear_coupon_restores_undiscounted_total() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.c, 2), &menu.prices)?;
        cart.apply_discount(200);

        cart.clear_coupon(&menu.prices)?;

        assert_eq!(cart.total, 600);
        assert!(!cart.coupon_applied);

        Ok(())
    }

    #[test]
    fn prune_delisted_drops_missing_foods_and_reprices() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 1), &menu.prices)?;
        cart.add_item(CartItem::new(menu.b, 2), &menu.prices)?;
        cart.apply_discount(50);

        let still_listed: PriceList = [(menu.b, 50)].into_iter().collect();

        let dropped = cart.prune_delisted(&still_listed)?;

        assert_eq!(dropped, [menu.a]);
        assert_eq!(cart.items, [CartItem::new(menu.b, 2)]);
        assert_eq!(cart.total, 100);
        assert!(cart.coupon_applied, "flag survives while items remain");

        cart.update_quantity(menu.b, 3, &still_listed)?;

        assert_eq!(cart.total, 150);

        Ok(())
    }

    #[test]
    fn prune_delisted_resets_coupon_when_cart_empties() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.a, 1), &menu.prices)?;
        cart.apply_discount(10);

        let dropped = cart.prune_delisted(&PriceList::default())?;

        assert_eq!(dropped, [menu.a]);
        assert!(cart.items.is_empty());
        assert_eq!(cart.total, 0);
        assert!(!cart.coupon_applied);

        Ok(())
    }

    #[test]
    fn prune_delisted_leaves_fully_listed_cart_alone() -> TestResult {
        let menu = menu();
        let mut cart = cart();

        cart.add_item(CartItem::new(menu.c, 1), &menu.prices)?;
        cart.apply_discount(100);

        let before = cart.clone();

        assert!(cart.prune_delisted(&menu.prices)?.is_empty());
        assert_eq!(cart, before);

        Ok(())
    }
}
