//! Coupons Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::coupons::models::{Coupon, CouponUpdate},
};

const LIST_COUPONS_SQL: &str = include_str!("sql/list_coupons.sql");
const FIND_COUPON_SQL: &str = include_str!("sql/find_coupon.sql");
const CREATE_COUPON_SQL: &str = include_str!("sql/create_coupon.sql");
const UPDATE_COUPON_SQL: &str = include_str!("sql/update_coupon.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCouponsRepository;

impl PgCouponsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_coupons(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(LIST_COUPONS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(FIND_COUPON_SQL)
            .bind(code)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        coupon: &Coupon,
    ) -> Result<Coupon, sqlx::Error> {
        query_as::<Postgres, Coupon>(CREATE_COUPON_SQL)
            .bind(&coupon.code)
            .bind(amount_to_i64(coupon.discount)?)
            .bind(coupon.is_percentage)
            .bind(amount_to_i64(coupon.min_cart_total)?)
            .bind(coupon.first_order_only)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_coupon(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        update: &CouponUpdate,
    ) -> Result<Option<Coupon>, sqlx::Error> {
        query_as::<Postgres, Coupon>(UPDATE_COUPON_SQL)
            .bind(code)
            .bind(amount_to_i64(update.discount)?)
            .bind(update.is_percentage)
            .bind(amount_to_i64(update.min_cart_total)?)
            .bind(update.first_order_only)
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Coupon {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            code: row.try_get("code")?,
            discount: try_get_amount(row, "discount")?,
            is_percentage: row.try_get("is_percentage")?,
            min_cart_total: try_get_amount(row, "min_cart_total")?,
            first_order_only: row.try_get("first_order_only")?,
        })
    }
}
