//! Catalog Repository

use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};
use uuid::Uuid;

use crate::{
    database::try_get_amount,
    domain::catalog::models::{Food, FoodSearch, FoodUuid, PriceSort, Restaurant, RestaurantUuid},
};

const LIST_FOODS_SQL: &str = include_str!("sql/list_foods.sql");
const GET_FOOD_SQL: &str = include_str!("sql/get_food.sql");
const GET_FOODS_SQL: &str = include_str!("sql/get_foods.sql");
const SEARCH_FOODS_SQL: &str = include_str!("sql/search_foods.sql");
const LIST_RESTAURANTS_SQL: &str = include_str!("sql/list_restaurants.sql");
const GET_RESTAURANTS_SQL: &str = include_str!("sql/get_restaurants.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCatalogRepository;

impl PgCatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_foods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Food>, sqlx::Error> {
        query_as::<Postgres, Food>(LIST_FOODS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn search_foods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        search: &FoodSearch,
    ) -> Result<Vec<Food>, sqlx::Error> {
        query_as::<Postgres, Food>(SEARCH_FOODS_SQL)
            .bind(search.name.as_deref().map(escape_like))
            .bind(search.category.as_deref())
            .bind(search.sort.map(PriceSort::as_str))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn find_food(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        food: FoodUuid,
    ) -> Result<Option<Food>, sqlx::Error> {
        query_as::<Postgres, Food>(GET_FOOD_SQL)
            .bind(food.into_uuid())
            .fetch_optional(&mut **tx)
            .await
    }

    /// Fetch the given foods. Unknown uuids are silently absent from the result.
    pub(crate) async fn get_foods(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        foods: &[FoodUuid],
    ) -> Result<Vec<Food>, sqlx::Error> {
        let uuids: Vec<Uuid> = foods.iter().copied().map(FoodUuid::into_uuid).collect();

        query_as::<Postgres, Food>(GET_FOODS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_restaurants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        query_as::<Postgres, Restaurant>(LIST_RESTAURANTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_restaurants(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        restaurants: &[RestaurantUuid],
    ) -> Result<Vec<Restaurant>, sqlx::Error> {
        let uuids: Vec<Uuid> = restaurants
            .iter()
            .copied()
            .map(RestaurantUuid::into_uuid)
            .collect();

        query_as::<Postgres, Restaurant>(GET_RESTAURANTS_SQL)
            .bind(uuids)
            .fetch_all(&mut **tx)
            .await
    }
}

/// Escape `ILIKE` wildcards so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

impl<'r> FromRow<'r, PgRow> for Food {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: FoodUuid::from_uuid(row.try_get("uuid")?),
            restaurant_uuid: RestaurantUuid::from_uuid(row.try_get("restaurant_uuid")?),
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            price: try_get_amount(row, "price")?,
            categories: row.try_get("categories")?,
            image: row.try_get("image")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for Restaurant {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: RestaurantUuid::from_uuid(row.try_get("uuid")?),
            name: row.try_get("name")?,
            location: row.try_get("location")?,
            description: row.try_get("description")?,
            mobile: row.try_get("mobile")?,
            image: row.try_get("image")?,
            categories: row.try_get("categories")?,
            making_time: row.try_get("making_time")?,
            is_open: row.try_get("is_open")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_keeps_wildcards_literal() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("paneer"), "paneer");
    }
}
