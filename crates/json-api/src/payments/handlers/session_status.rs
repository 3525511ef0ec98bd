//! Checkout Session Status Handler

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use crate::{
    extensions::*,
    payments::{errors::into_status_error, models::SessionStatusResponse},
    state::State,
};

/// Checkout Session Status Handler
#[endpoint(
    tags("payments"),
    summary = "Get Checkout Session Status",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Session status"),
        (status_code = StatusCode::BAD_REQUEST, description = "Malformed session id"),
        (status_code = StatusCode::NOT_FOUND, description = "Session not found"),
    ),
)]
#[tracing::instrument(name = "payments.session_status", skip_all)]
pub(crate) async fn handler(
    session_id: QueryParam<String, true>,
    depot: &mut Depot,
) -> Result<Json<SessionStatusResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_or_403()?;

    let status = state
        .app
        .payments
        .get_session_status(&session_id.into_inner())
        .await
        .map_err(into_status_error)?;

    Ok(Json(status.into()))
}

#[cfg(test)]
mod tests {
    use platter_app::payments::{MockPaymentsService, PaymentsError, SessionStatus};
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, as_user, service};

    use super::*;

    fn make_service(payments: MockPaymentsService) -> Service {
        service(
            Mocks {
                payments,
                ..Mocks::default()
            },
            as_user(),
            Router::with_path("payment/session-status").get(handler),
        )
    }

    #[tokio::test]
    async fn test_reports_gateway_status() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_session_status()
            .once()
            .withf(|session_id| session_id == "cs_test_123")
            .return_once(|_| {
                Ok(SessionStatus {
                    status: Some("complete".to_string()),
                    customer_email: Some("diner@example.com".to_string()),
                })
            });

        let mut res = TestClient::get("http://example.com/payment/session-status?session_id=cs_test_123")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        let body: SessionStatusResponse = res.take_json().await?;

        assert_eq!(body.status.as_deref(), Some("complete"));
        assert_eq!(body.customer_email.as_deref(), Some("diner@example.com"));

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_session_id_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments.expect_get_session_status().never();

        let res = TestClient::get("http://example.com/payment/session-status")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_malformed_session_id_returns_400() -> TestResult {
        let mut payments = MockPaymentsService::new();

        payments
            .expect_get_session_status()
            .once()
            .return_once(|_| Err(PaymentsError::InvalidSessionId));

        let res = TestClient::get("http://example.com/payment/session-status?session_id=../etc")
            .send(&make_service(payments))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }
}
