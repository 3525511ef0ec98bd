//! Get Food Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use platter_app::domain::catalog::models::FoodUuid;

use crate::{
    extensions::*,
    foods::{errors::into_status_error, models::FoodEnvelope},
    state::State,
};

/// Get Food Handler
#[endpoint(
    tags("foods"),
    summary = "Get Food",
    responses(
        (status_code = StatusCode::OK, description = "Food found"),
        (status_code = StatusCode::NOT_FOUND, description = "Food not found"),
    ),
)]
#[tracing::instrument(name = "foods.get", skip_all, fields(food_uuid = %*food))]
pub(crate) async fn handler(
    food: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<FoodEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let food = state
        .app
        .catalog
        .get_food(FoodUuid::from_uuid(food.into_inner()))
        .await
        .map_err(into_status_error)?;

    Ok(Json(FoodEnvelope {
        success: true,
        message: "Food retrieved".to_string(),
        food: food.into(),
    }))
}

#[cfg(test)]
mod tests {
    use platter_app::domain::catalog::{
        CatalogServiceError, MockCatalogService, models::RestaurantUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, make_food, service};

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        service(
            Mocks {
                catalog,
                ..Mocks::default()
            },
            None,
            Router::with_path("food/{food}").get(handler),
        )
    }

    #[tokio::test]
    async fn test_get_food_returns_food() -> TestResult {
        let uuid = FoodUuid::new();
        let restaurant = RestaurantUuid::new();
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_food()
            .once()
            .withf(move |food| *food == uuid)
            .return_once(move |_| Ok(make_food(uuid, restaurant, 150)));

        let mut res = TestClient::get(format!("http://example.com/food/{uuid}"))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: FoodEnvelope = res.take_json().await?;

        assert_eq!(body.food.uuid, uuid.into_uuid());
        assert_eq!(body.food.restaurant_uuid, restaurant.into_uuid());
        assert_eq!(body.food.price, 150);

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_food_returns_404() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_get_food()
            .once()
            .return_once(|_| Err(CatalogServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/food/{}", Uuid::now_v7()))
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_uuid_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_get_food().never();

        let res = TestClient::get("http://example.com/food/not-a-uuid")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
