//! Orders Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as, types::Json};

use crate::{
    database::{amount_to_i64, try_get_amount},
    domain::{
        catalog::models::RestaurantUuid,
        orders::{
            models::{Order, OrderStatus, OrderUuid},
            records::OrderDocument,
        },
        users::models::UserUuid,
    },
};

const CREATE_ORDER_SQL: &str = include_str!("sql/create_order.sql");
const LINK_USER_ORDER_SQL: &str = include_str!("sql/link_user_order.sql");
const LINK_RESTAURANT_ORDER_SQL: &str = include_str!("sql/link_restaurant_order.sql");
const FIND_ORDER_SQL: &str = include_str!("sql/find_order.sql");
const UPDATE_ORDER_SQL: &str = include_str!("sql/update_order.sql");
const LIST_USER_ORDERS_SQL: &str = include_str!("sql/list_user_orders.sql");
const LIST_RESTAURANT_ORDERS_SQL: &str = include_str!("sql/list_restaurant_orders.sql");
const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const TOTAL_AMOUNT_SQL: &str = include_str!("sql/total_amount.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgOrdersRepository;

impl PgOrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert a freshly assembled order and link it to its user and restaurants.
    pub(crate) async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &mut Order,
    ) -> Result<(), sqlx::Error> {
        query(CREATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(order.user_uuid.into_uuid())
            .bind(Json(OrderDocument::from(order.restaurants.as_slice())))
            .bind(amount_to_i64(order.total)?)
            .bind(order.status.as_str())
            .bind(SqlxTimestamp::from(order.created_at))
            .execute(&mut **tx)
            .await?;

        query(LINK_USER_ORDER_SQL)
            .bind(order.user_uuid.into_uuid())
            .bind(order.uuid.into_uuid())
            .execute(&mut **tx)
            .await?;

        for sub_order in &order.restaurants {
            query(LINK_RESTAURANT_ORDER_SQL)
                .bind(sub_order.restaurant_uuid.into_uuid())
                .bind(order.uuid.into_uuid())
                .execute(&mut **tx)
                .await?;
        }

        order.version = 1;

        Ok(())
    }

    pub(crate) async fn find_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: OrderUuid,
    ) -> Result<Option<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(FIND_ORDER_SQL)
            .bind(order.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Store status changes if nobody else changed the order since it was read.
    ///
    /// Returns `false` when a concurrent writer got there first.
    pub(crate) async fn save_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        order: &mut Order,
    ) -> Result<bool, sqlx::Error> {
        let row = query(UPDATE_ORDER_SQL)
            .bind(order.uuid.into_uuid())
            .bind(Json(OrderDocument::from(order.restaurants.as_slice())))
            .bind(order.status.as_str())
            .bind(order.version)
            .fetch_optional(&mut **tx)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };

        order.version = row.try_get("version")?;
        order.updated_at = row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff();

        Ok(true)
    }

    pub(crate) async fn list_user_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_USER_ORDERS_SQL)
            .bind(user.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurant_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurant: RestaurantUuid,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_RESTAURANT_ORDERS_SQL)
            .bind(restaurant.into_uuid())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_orders(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Order>, sqlx::Error> {
        query_as::<Postgres, Order>(LIST_ORDERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn total_amount(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<u64, sqlx::Error> {
        let row = query(TOTAL_AMOUNT_SQL).fetch_one(&mut **tx).await?;

        try_get_amount(&row, "total_amount")
    }
}

impl<'r> FromRow<'r, PgRow> for Order {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let Json(document) = row.try_get::<Json<OrderDocument>, _>("document")?;

        let status = row
            .try_get::<String, _>("status")?
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            uuid: OrderUuid::from_uuid(row.try_get("uuid")?),
            user_uuid: UserUuid::from_uuid(row.try_get("user_uuid")?),
            restaurants: document.restaurants.into_iter().map(Into::into).collect(),
            total: try_get_amount(row, "total")?,
            status,
            version: row.try_get("version")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
