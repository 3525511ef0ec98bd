//! Search Foods Handler

use std::sync::Arc;

use platter_app::domain::catalog::models::{FoodSearch, PriceSort};
use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    foods::{errors::into_status_error, models::FoodsEnvelope},
    state::State,
};

/// Search Foods Handler
///
/// Matches foods whose name contains `search` and which carry `category`, both compared
/// case-insensitively. `sort` orders the matches by price, `asc` or `desc`.
#[endpoint(
    tags("foods"),
    summary = "Search Foods",
    responses(
        (status_code = StatusCode::OK, description = "Matching foods"),
        (status_code = StatusCode::BAD_REQUEST, description = "Unknown sort order"),
    ),
)]
#[tracing::instrument(name = "foods.search", skip_all)]
pub(crate) async fn handler(
    search: QueryParam<String, false>,
    category: QueryParam<String, false>,
    sort: QueryParam<String, false>,
    depot: &mut Depot,
) -> Result<Json<FoodsEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let sort = sort.into_inner();
    let sort = sort
        .as_deref()
        .map(str::trim)
        .filter(|sort| !sort.is_empty())
        .map(str::parse::<PriceSort>)
        .transpose()
        .map_err(|error| StatusError::bad_request().brief(error.to_string()))?;

    let foods = state
        .app
        .catalog
        .search_foods(FoodSearch::new(
            search.into_inner(),
            category.into_inner(),
            sort,
        ))
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
        MockCatalogService,
        models::{FoodUuid, RestaurantUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        errors::ErrorEnvelope,
        test_helpers::{Mocks, make_food, service},
    };

    use super::*;

    fn make_service(catalog: MockCatalogService) -> Service {
        service(
            Mocks {
                catalog,
                ..Mocks::default()
            },
            None,
            Router::with_path("food/search").get(handler),
        )
    }

    #[tokio::test]
    async fn test_query_is_passed_through_as_search() -> TestResult {
        let restaurant = RestaurantUuid::new();
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_search_foods()
            .once()
            .withf(|search| {
                *search
                    == FoodSearch {
                        name: Some("naan".to_string()),
                        category: Some("Breads".to_string()),
                        sort: Some(PriceSort::Ascending),
                    }
            })
            .return_once(move |_| {
                Ok(vec![
                    make_food(FoodUuid::new(), restaurant, 50),
                    make_food(FoodUuid::new(), restaurant, 60),
                ])
            });

        let mut res =
            TestClient::get("http://example.com/food/search?search=naan&category=Breads&sort=asc")
                .send(&make_service(catalog))
                .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: FoodsEnvelope = res.take_json().await?;
        let prices: Vec<u64> = body.foods.iter().map(|food| food.price).collect();

        assert_eq!(prices, [50, 60]);

        Ok(())
    }

    #[tokio::test]
    async fn test_no_filters_searches_everything() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog
            .expect_search_foods()
            .once()
            .withf(|search| *search == FoodSearch::default())
            .return_once(|_| Ok(vec![]));

        let res = TestClient::get("http://example.com/food/search?search=")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_sort_returns_400() -> TestResult {
        let mut catalog = MockCatalogService::new();

        catalog.expect_search_foods().never();

        let mut res = TestClient::get("http://example.com/food/search?sort=cheapest")
            .send(&make_service(catalog))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        let body: ErrorEnvelope = res.take_json().await?;

        assert!(!body.success, "errors report success: false");
        assert_eq!(body.message, "unknown sort order: cheapest");

        Ok(())
    }
}
