//! Auth middleware.
//!
//! Resolves the session token from the `token` cookie or an `Authorization: Bearer` header and
//! stores the authenticated [`Principal`](platter_app::auth::Principal) in the depot. Role checks
//! happen in the handlers.

use std::sync::Arc;

use platter_app::auth::AuthServiceError;
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{error, warn};

use crate::{extensions::*, state::State};

pub(crate) const SESSION_COOKIE: &str = "token";

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let Some(token) = extract_session_token(req) else {
        res.render(StatusError::unauthorized().brief("Missing session token"));
        ctrl.skip_rest();

        return;
    };

    let state = match depot.obtain_or_500::<Arc<State>>() {
        Ok(state) => state,
        Err(status) => {
            res.render(status);
            ctrl.skip_rest();

            return;
        }
    };

    let principal = match state.app.auth.authenticate(&token).await {
        Ok(principal) => principal,
        Err(AuthServiceError::NotFound | AuthServiceError::Token(_)) => {
            res.render(StatusError::unauthorized().brief("Invalid session token"));
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Expired) => {
            res.render(StatusError::unauthorized().brief("Session expired"));
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Timeout) => {
            warn!("timed out validating session token");

            res.render(StatusError::gateway_timeout());
            ctrl.skip_rest();

            return;
        }
        Err(AuthServiceError::Sql(source)) => {
            error!("failed to validate session token: {source}");

            res.render(StatusError::internal_server_error());
            ctrl.skip_rest();

            return;
        }
    };

    depot.insert_principal(principal);

    ctrl.call_next(req, depot, res).await;
}

fn extract_session_token(req: &Request) -> Option<String> {
    if let Some(cookie) = req.cookie(SESSION_COOKIE)
        && !cookie.value().trim().is_empty()
    {
        return Some(cookie.value().trim().to_string());
    }

    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
