//! Total Order Amount Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    admin::models::TotalAmountResponse, extensions::*, orders::errors::into_status_error,
    state::State,
};

/// Total Order Amount Handler
///
/// Sums the totals of every order ever placed, cancelled ones included.
#[endpoint(
    tags("admin"),
    summary = "Total Order Amount",
    security(("bearer_auth" = [])),
    responses((status_code = StatusCode::OK, description = "Sum of all order totals")),
)]
#[tracing::instrument(name = "admin.total_amount", skip(depot))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<TotalAmountResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.admin_or_403()?;

    let total_amount = state
        .app
        .orders
        .total_amount()
        .await
        .map_err(into_status_error)?;

    Ok(Json(TotalAmountResponse {
        success: true,
        message: "Total amount retrieved".to_string(),
        total_amount,
    }))
}

#[cfg(test)]
mod tests {
    use platter_app::domain::orders::{MockOrdersService, OrdersServiceError};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, as_admin, service};

    use super::*;

    fn make_service(orders: MockOrdersService) -> Service {
        service(
            Mocks {
                orders,
                ..Mocks::default()
            },
            as_admin(),
            Router::with_path("admin/orders/total-amount").get(handler),
        )
    }

    #[tokio::test]
    async fn test_returns_sum_of_order_totals() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders.expect_total_amount().once().return_once(|| Ok(12_450));

        let mut res = TestClient::get("http://example.com/admin/orders/total-amount")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: TotalAmountResponse = res.take_json().await?;

        assert_eq!(body.total_amount, 12_450);

        Ok(())
    }

    #[tokio::test]
    async fn test_storage_timeout_returns_504() -> TestResult {
        let mut orders = MockOrdersService::new();

        orders
            .expect_total_amount()
            .once()
            .return_once(|| Err(OrdersServiceError::Timeout));

        let res = TestClient::get("http://example.com/admin/orders/total-amount")
            .send(&make_service(orders))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::GATEWAY_TIMEOUT));

        Ok(())
    }
}
