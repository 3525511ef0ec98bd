//! JSON error bodies.
//!
//! Handlers and hoops fail with a salvo [`StatusError`]. This hoop turns whatever error ends up
//! in the response into the same `{ "success": false, "message": ... }` shape the successful
//! envelopes use, keeping the status code.

use salvo::{http::ResBody, prelude::*};
use serde::{Deserialize, Serialize};

/// Error Envelope
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
}

impl ErrorEnvelope {
    fn from_status_error(error: &StatusError) -> Self {
        let message = if error.brief.is_empty() {
            error.name.clone()
        } else {
            error.brief.clone()
        };

        Self {
            success: false,
            message,
        }
    }

    fn from_status_code(code: StatusCode) -> Self {
        Self {
            success: false,
            message: code.canonical_reason().unwrap_or("Error").to_string(),
        }
    }
}

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    ctrl.call_next(req, depot, res).await;

    let envelope = match &res.body {
        ResBody::Error(error) => ErrorEnvelope::from_status_error(error),
        ResBody::None => match res.status_code {
            Some(code) if code.is_client_error() || code.is_server_error() => {
                ErrorEnvelope::from_status_code(code)
            }
            _ => return,
        },
        _ => return,
    };

    let status = res.status_code;

    res.body = ResBody::None;
    res.render(Json(envelope));

    if let Some(code) = status {
        res.status_code(code);
    }
}
