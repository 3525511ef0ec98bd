//! Carts Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::domain::{
    carts::{models::Cart, records::CartDocument},
    users::models::UserUuid,
};

const FIND_CART_SQL: &str = include_str!("sql/find_cart.sql");
const INSERT_CART_SQL: &str = include_str!("sql/insert_cart.sql");
const UPDATE_CART_SQL: &str = include_str!("sql/update_cart.sql");
const DELETE_CART_SQL: &str = include_str!("sql/delete_cart.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCartsRepository;

impl PgCartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn find_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Option<Cart>, sqlx::Error> {
        query_as::<Postgres, Cart>(FIND_CART_SQL)
            .bind(user.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Store the cart if nobody else changed it since it was read.
    ///
    /// Returns `false` when a concurrent writer got there first; the caller should roll back and
    /// retry from a fresh read. On success the cart's version and timestamps are refreshed.
    pub(crate) async fn save_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &mut Cart,
    ) -> Result<bool, sqlx::Error> {
        let document = Json(CartDocument::from(&*cart));

        let row = if cart.is_persisted() {
            query(UPDATE_CART_SQL)
                .bind(cart.user_uuid.into_uuid())
                .bind(document)
                .bind(cart.version)
                .fetch_optional(&mut **tx)
                .await?
        } else {
            query(INSERT_CART_SQL)
                .bind(cart.user_uuid.into_uuid())
                .bind(document)
                .fetch_optional(&mut **tx)
                .await?
        };

        let Some(row) = row else {
            return Ok(false);
        };

        cart.version = row.try_get("version")?;
        cart.created_at = row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff();
        cart.updated_at = row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff();

        Ok(true)
    }

    /// Delete the cart at the version it was read at. Returns `false` if it changed meanwhile.
    pub(crate) async fn delete_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        cart: &Cart,
    ) -> Result<bool, sqlx::Error> {
        let rows_affected = query(DELETE_CART_SQL)
            .bind(cart.user_uuid.into_uuid())
            .bind(cart.version)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected == 1)
    }
}

impl<'r> FromRow<'r, PgRow> for Cart {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(document) = row.try_get::<Json<CartDocument>, _>("document")?;

        Ok(Self {
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            items: document.items.into_iter().map(Into::into).collect(),
            total: document.total,
            coupon_applied: document.coupon_applied,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
