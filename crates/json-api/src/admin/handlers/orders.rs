//! List All Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrdersEnvelope},
    state::State,
};

/// List All Orders Handler
#[endpoint(
    tags("admin"),
    summary = "List All Orders",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "Every order, newest first")),
)]
#[tracing::instrument(name = "admin.orders", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<OrdersEnvelope>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let orders = state
        .app
        .orders
        .list_orders()
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

    use crate::test_helpers::{Mocks, as_admin, as_restaurant, make_order, service};

    use super::*;

    fn make_service(orders: MockOrdersService, principal: Option<Principal>) -> Service {
        service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            principal,
            Router::with_path("admin/orders").get(handler),
        )
    }

    #[tokio::test]
    async fn test_admin_lists_every_order() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().once().return_once(|| {
            Ok(vec![
                make_order(OrderUuid::new(), &[OrderStatus::Pending]),
                make_order(OrderUuid::new(), &[OrderStatus::Delivered]),
            ])
        });

        let mut res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(orders, as_admin()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: OrdersEnvelope = res.take_json().await?;

        assert_eq!(body.orders.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_restaurants_are_forbidden() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_list_orders().never();

        let res = TestClient::get("http://example.com/admin/orders")
            .send(&make_service(orders, as_restaurant()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
