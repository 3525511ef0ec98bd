//! List Restaurant Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersEnvelope},
    state::State,
};

/// List Restaurant Orders Handler
///
/// Returns every order the calling restaurant has a part in, newest first. Other restaurants'
/// parts are included so the kitchen can see the whole order.
#[endpoint(
    tags("restaurants"),
    summary = "List Restaurant Orders",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "Orders for the restaurant")),
)]
#[tracing::instrument(name = "restaurants.orders", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let restaurant = depot.restaurant_or_403()?;

    let orders = state
        .app
        .orders
        .list_restaurant_orders(restaurant)
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrdersEnvelope::new("Orders retrieved", orders)))
}

#[cfg(test)]
mod tests {
    use platter_app::{
        auth::Principal,
        domain::orders::{
            MockOrdersService,
            models::{OrderStatus, OrderUuid},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{
        Mocks, TEST_RESTAURANT_UUID, as_restaurant, as_user, make_order, service,
    };

    use super::*;

    fn make_service(orders: MockOrdersService, principal: Option<Principal>) -> Service {
        service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            principal,
            Router::with_path("restaurant/orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_lists_orders_for_the_calling_restaurant() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_list_restaurant_orders()
            .once()
            .withf(|restaurant| *restaurant == TEST_RESTAURANT_UUID)
            .return_once(move |_| Ok(vec![make_order(uuid, &[OrderStatus::Pending])]));

        let mut res = TestClient::get("http://example.com/restaurant/orders")
            .send(&make_service(orders, as_restaurant()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersEnvelope = res.take_json().await?;

        assert_eq!(body.orders.len(), 1);
        assert_eq!(body.orders[0].uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_users_cannot_list_restaurant_orders() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_restaurant_orders().never();

        let res = TestClient::get("http://example.com/restaurant/orders")
            .send(&make_service(orders, as_user()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
