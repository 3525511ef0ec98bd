//! Coupons service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    database::{Db, MAX_WRITE_ATTEMPTS},
    domain::{
        carts::{
            models::Cart,
            repository::PgCartsRepository,
            service::{load_prices, prune_delisted},
        },
        catalog::repository::PgCatalogRepository,
        coupons::{
            errors::CouponsServiceError,
            evaluation::evaluate,
            models::{Coupon, CouponUpdate},
            repository::PgCouponsRepository,
        },
        users::{models::UserUuid, repository::PgUsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCouponsService {
    db: Db,
    coupons_repository: PgCouponsRepository,
    carts_repository: PgCartsRepository,
    catalog_repository: PgCatalogRepository,
    users_repository: PgUsersRepository,
}

impl PgCouponsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            coupons_repository: PgCouponsRepository::new(),
            carts_repository: PgCartsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
            users_repository: PgUsersRepository::new(),
        }
    }

    async fn try_apply_coupon(
        &self,
        user: UserUuid,
        code: &str,
    ) -> Result<Option<Cart>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CouponsServiceError::CartNotFound)?;

        let prices = load_prices(&self.catalog_repository, &mut tx, &cart).await?;

        prune_delisted(&mut cart, &prices)?;

        let coupon = self.coupons_repository.find_coupon(&mut tx, code).await?;
        let prior_orders = self.users_repository.count_orders(&mut tx, user).await?;

        let discount = evaluate(&cart, coupon.as_ref(), prior_orders)?;

        cart.apply_discount(discount);

        if !self.carts_repository.save_cart(&mut tx, &mut cart).await? {
            return Ok(None);
        }

        tx.commit().await?;

        info!(user_uuid = %user, code, discount, total = cart.total, "applied coupon");

        Ok(Some(cart))
    }

    async fn try_remove_coupon(&self, user: UserUuid) -> Result<Option<Cart>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let mut cart = self
            .carts_repository
            .find_cart(&mut tx, user)
            .await?
            .ok_or(CouponsServiceError::CartNotFound)?;

        if !cart.coupon_applied {
            return Err(CouponsServiceError::NotApplied);
        }

        let prices = load_prices(&self.catalog_repository, &mut tx, &cart).await?;

        prune_delisted(&mut cart, &prices)?;
        cart.clear_coupon(&prices)?;

        if !self.carts_repository.save_cart(&mut tx, &mut cart).await? {
            return Ok(None);
        }

        tx.commit().await?;

        info!(user_uuid = %user, total = cart.total, "removed coupon");

        Ok(Some(cart))
    }
}

#[async_trait]
impl CouponsService for PgCouponsService {
    async fn apply_coupon(&self, user: UserUuid, code: &str) -> Result<Cart, CouponsServiceError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if let Some(cart) = self.try_apply_coupon(user, code).await? {
                return Ok(cart);
            }

            debug!(user_uuid = %user, attempt, "cart changed concurrently, retrying");
        }

        Err(CouponsServiceError::Conflict)
    }

    async fn remove_coupon(&self, user: UserUuid) -> Result<Cart, CouponsServiceError> {
        for attempt in 1..=MAX_WRITE_ATTEMPTS {
            if let Some(cart) = self.try_remove_coupon(user).await? {
                return Ok(cart);
            }

            debug!(user_uuid = %user, attempt, "cart changed concurrently, retrying");
        }

        Err(CouponsServiceError::Conflict)
    }

    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError> {
        let mut tx = self.db.begin().await?;

        let coupons = self.coupons_repository.list_coupons(&mut tx).await?;

        tx.commit().await?;

        Ok(coupons)
    }

    async fn create_coupon(&self, coupon: Coupon) -> Result<Coupon, CouponsServiceError> {
        coupon.validate()?;

        let mut tx = self.db.begin().await?;

        let created = self
            .coupons_repository
            .create_coupon(&mut tx, &coupon)
            .await?;

        tx.commit().await?;

        info!(code = %created.code, "created coupon");

        Ok(created)
    }

    async fn update_coupon(
        &self,
        code: &str,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponsServiceError> {
        update.validate()?;

        let mut tx = self.db.begin().await?;

        let updated = self
            .coupons_repository
            .update_coupon(&mut tx, code, &update)
            .await?
            .ok_or(CouponsServiceError::CouponNotFound)?;

        tx.commit().await?;

        info!(code, "updated coupon");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Apply a coupon code to the user's cart.
    async fn apply_coupon(&self, user: UserUuid, code: &str) -> Result<Cart, CouponsServiceError>;

    /// Remove the applied coupon and restore the undiscounted total.
    async fn remove_coupon(&self, user: UserUuid) -> Result<Cart, CouponsServiceError>;

    /// List every coupon rule.
    async fn list_coupons(&self) -> Result<Vec<Coupon>, CouponsServiceError>;

    /// Create a coupon rule.
    async fn create_coupon(&self, coupon: Coupon) -> Result<Coupon, CouponsServiceError>;

    /// Replace the rule behind an existing code.
    async fn update_coupon(
        &self,
        code: &str,
        update: CouponUpdate,
    ) -> Result<Coupon, CouponsServiceError>;
}
