//! Update Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use platter_app::domain::orders::models::OrderUuid;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderEnvelope},
    state::State,
};

/// Update Order Status Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateStatusRequest {
    pub order_uuid: Uuid,
}

/// Update Order Status Handler
///
/// Refreshes the order status from its restaurant parts. It becomes pending when every part is
/// pending, delivered when every part is delivered, and confirmed when every part is confirmed
/// or delivered. Any other mix, cancellations included, leaves it alone.
#[endpoint(
    tags("orders"),
    summary = "Refresh Order Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Order status refreshed"),
        (status_code = StatusCode::NOT_FOUND, description = "Order not found"),
    ),
)]
#[tracing::instrument(name = "orders.update_status", skip(json, depot))]
pub(crate) async fn handler(
    json: JsonBody<UpdateStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<OrderEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let principal = depot.principal_or_401()?;

    let order = state
        .app
        .orders
        .recompute_status(principal, OrderUuid::from_uuid(json.into_inner().order_uuid))
        .await
        .map_err(into_status_error)?;

    Ok(Json(OrderEnvelope::new("Order status updated", order)))
}

#[cfg(test)]
mod tests {
    use platter_app::domain::orders::{
        MockOrdersService, OrdersServiceError,
        models::{OrderStatus, OrderUuid},
    };
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, as_restaurant, make_order, service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            as_restaurant(),
            Router::with_path("order/update/status").patch(handler),
        )
    }

    #[tokio::test]
    async fn test_returns_recomputed_order() -> TestResult {
        let uuid = OrderUuid::new();
        let mut orders = MockOrdersService::new();

        orders
            .expect_recompute_status()
            .once()
            .withf(move |_, order| *order == uuid)
            .return_once(move |_, _| {
                let mut order =
                    make_order(uuid, &[OrderStatus::Delivered, OrderStatus::Delivered]);
                order.status = OrderStatus::Delivered;

                Ok(order)
            });

        let mut res = TestClient::patch("http://example.com/order/update/status")
            .json(&json!({ "order_uuid": uuid.into_uuid() }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrderEnvelope = res.take_json().await?;

        assert_eq!(body.order.status, "delivered");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_order_returns_404() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_recompute_status()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::OrderNotFound));

        let res = TestClient::patch("http://example.com/order/update/status")
            .json(&json!({ "order_uuid": Uuid::now_v7() }))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_order_uuid_returns_400() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_recompute_status().never();

        let res = TestClient::patch("http://example.com/order/update/status")
            .json(&json!({}))
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
