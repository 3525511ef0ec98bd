//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Food, FoodSearch, FoodUuid, Restaurant},
        repository::PgCatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    repository: PgCatalogRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn list_foods(&self) -> Result<Vec<Food>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let foods = self.repository.list_foods(&mut tx).await?;

        tx.commit().await?;

        Ok(foods)
    }

    async fn search_foods(&self, search: FoodSearch) -> Result<Vec<Food>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let foods = self.repository.search_foods(&mut tx, &search).await?;

        tx.commit().await?;

        Ok(foods)
    }

    async fn get_food(&self, food: FoodUuid) -> Result<Food, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let food = self
            .repository
            .find_food(&mut tx, food)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(food)
    }

    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let restaurants = self.repository.list_restaurants(&mut tx).await?;

        tx.commit().await?;

        Ok(restaurants)
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List every food on every menu.
    async fn list_foods(&self) -> Result<Vec<Food>, CatalogServiceError>;

    /// Find foods by name and category, optionally ordered by price.
    async fn search_foods(&self, search: FoodSearch) -> Result<Vec<Food>, CatalogServiceError>;

    /// Retrieve a single food.
    async fn get_food(&self, food: FoodUuid) -> Result<Food, CatalogServiceError>;

    /// List all restaurants.
    async fn list_restaurants(&self) -> Result<Vec<Restaurant>, CatalogServiceError>;
}
