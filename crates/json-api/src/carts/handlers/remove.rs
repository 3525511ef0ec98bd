//! Remove Cart Item Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::catalog::models::FoodUuid;

use crate::{
    carts::{errors::into_status_error, models::CartEnvelope},
    extensions::*,
    state::State,
};

/// Remove Cart Item Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct RemoveItemRequest {
    pub food_uuid: Uuid,
}

/// Remove Cart Item Handler
///
/// Removes a food from the caller's cart and reprices what is left. An applied coupon stays
/// flagged while items remain.
#[endpoint(
    tags("carts"),
    summary = "Remove Item from Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Item removed"),
        (status_code = StatusCode::NOT_FOUND, description = "Cart or item not found"),
        (status_code = StatusCode::CONFLICT, description = "Cart modified concurrently"),
    ),
)]
#[tracing::instrument(name = "carts.remove", skip(json, depot))]
pub(crate) async fn handler(
    json: JsonBody<RemoveItemRequest>,
    depot: &mut Depot,
) -> Result<Json<CartEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_or_403()?;

    let cart = state
        .app
        .carts
        .remove_item(user, FoodUuid::from_uuid(json.into_inner().food_uuid))
        .await
        .map_err(into_status_error)?;

    Ok(Json(CartEnvelope::new(true, "Item removed from cart", cart)))
}

#[cfg(test)]
mod tests {
    use platter_app::domain::carts::{CartsServiceError, MockCartsService};
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_USER_UUID, as_user, make_cart, service};

    use super::*;

    fn make_service(carts: MockCartsService) -> Service {
        service(
            Mocks {
                carts,
                ..Mocks::default()
            },
            as_user(),
            Router::with_path("cart/remove").delete(handler),
        )
    }

    #[tokio::test]
    async fn test_remove_item_returns_repriced_cart() -> TestResult {
        let kept = FoodUuid::new();
        let removed = FoodUuid::new();
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .withf(move |user, food| *user == TEST_USER_UUID && *food == removed)
            .return_once(move |_, _| Ok(make_cart(&[(kept, 1)], 80)));

        let mut res = TestClient::delete("http://example.com/cart/remove")
            .json(&json!({ "food_uuid": removed.into_uuid() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: CartEnvelope = res.take_json().await?;

        assert!(body.success);
        assert_eq!(body.cart.total, 80);
        assert_eq!(body.cart.items.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_cart_returns_404() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::CartNotFound));

        let res = TestClient::delete("http://example.com/cart/remove")
            .json(&json!({ "food_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_modification_returns_409() -> TestResult {
        let mut carts = MockCartsService::new();

        carts
            .expect_remove_item()
            .once()
            .return_once(|_, _| Err(CartsServiceError::Conflict));

        let res = TestClient::delete("http://example.com/cart/remove")
            .json(&json!({ "food_uuid": Uuid::now_v7() }))
            .send(&make_service(carts))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));

        Ok(())
    }
}
