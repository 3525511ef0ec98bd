//! List Foods Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    foods::{errors::into_status_error, models::FoodsEnvelope},
    state::State,
};

/// List Foods Handler
#[endpoint(
    tags("foods"),
    summary = "List Foods",
    responses((status_code = StatusCode::OK, description = "Every food on every menu")),
)]
#[tracing::instrument(name = "foods.index", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<FoodsEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let foods = state
        .app
        .catalog
        .list_foods()
        .await
        .map_err(into_status_error)?;

    Ok(Json(FoodsEnvelope {
        success: true,
        message: "Foods retrieved".to_string(),
        foods: foods.into_iter().map(Into::into).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use platter_app::domain::catalog::{
        CatalogServiceError, MockCatalogService,
        models::{FoodUuid, RestaurantUuid},
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
            Router::with_path("food").get(handler),
        )
    }

    #[tokio::test]
    async fn test_list_foods_is_public() -> TestResult {
        let restaurant = RestaurantUuid::new();
        let mut catalog = MockCatalogService::new();

        catalog.expect_list_foods().once().return_once(move || {
            Ok(vec![
                make_food(FoodUuid::new(), restaurant, 120),
                make_food(FoodUuid::new(), restaurant, 80),
            ])
        });

        let mut res = TestClient::get("http://example.com/food")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: FoodsEnvelope = res.take_json().await?;

        assert_eq!(body.foods.len(), 2);
        assert_eq!(body.foods[1].price, 80);

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_timeout_returns_504() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_list_foods()
            .once()
            .return_once(|| Err(CatalogServiceError::Timeout));

        let res = TestClient::get("http://example.com/food")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::GATEWAY_TIMEOUT));

        Ok(())
    }
}
