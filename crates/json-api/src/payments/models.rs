//! Payment responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use platter_app::payments::{CheckoutSession, SessionStatus};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CheckoutSessionResponse {
    pub success: bool,
    pub message: String,
    pub session_id: String,

    /// Hosted checkout page to redirect the customer to
    pub url: Option<String>,
}

impl From<CheckoutSession> for CheckoutSessionResponse {
    fn from(session: CheckoutSession) -> Self {
        Self {
            success: true,
            message: "Checkout session created".to_string(),
            session_id: session.session_id,
            url: session.url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionStatusResponse {
    pub success: bool,
    pub message: String,

    /// Gateway status such as `open`, `complete` or `expired`
    pub status: Option<String>,
    pub customer_email: Option<String>,
}

impl From<SessionStatus> for SessionStatusResponse {
    fn from(status: SessionStatus) -> Self {
        Self {
            success: true,
            message: "Session status retrieved".to_string(),
            status: status.status,
            customer_email: status.customer_email,
        }
    }
}
