//! Stripe Checkout client.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{
    domain::{carts::CartsService, users::models::UserUuid},
    payments::{CheckoutSession, PaymentsError, PaymentsService, SessionStatus},
};

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// Minor units per whole currency unit.
const MINOR_UNITS: u64 = 100;

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub secret_key: String,

    /// Front-end origin used for the success and cancel redirects.
    pub client_domain: String,

    /// ISO currency code, lowercase.
    pub currency: String,

    pub timeout: Duration,
}

pub struct StripePayments {
    config: StripeConfig,
    http: Client,
    carts: Arc<dyn CartsService>,
}

impl std::fmt::Debug for StripePayments {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripePayments")
            .field("client_domain", &self.config.client_domain)
            .field("currency", &self.config.currency)
            .finish_non_exhaustive()
    }
}

impl StripePayments {
    /// Build a client charging carts read through `carts`.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: StripeConfig, carts: Arc<dyn CartsService>) -> Result<Self, PaymentsError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            config,
            http,
            carts,
        })
    }

    fn checkout_form(&self, amount: u64) -> Vec<(&'static str, String)> {
        let domain = self.config.client_domain.trim_end_matches('/');

        vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            (
                "line_items[0][price_data][currency]",
                self.config.currency.clone(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                "Total Cart Amount".to_string(),
            ),
            ("line_items[0][price_data][unit_amount]", amount.to_string()),
            ("success_url", format!("{domain}/user/payment/success")),
            ("cancel_url", format!("{domain}/user/payment/cancel")),
        ]
    }
}

/// Stripe session ids are opaque but only ever use this alphabet.
fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id
            .bytes()
            .all(|byte| byte.is_ascii_alphanumeric() || byte == b'_')
}

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
    status: Option<String>,
    customer_details: Option<StripeCustomerDetails>,
}

#[derive(Debug, Deserialize)]
struct StripeCustomerDetails {
    email: Option<String>,
}

#[async_trait]
impl PaymentsService for StripePayments {
    async fn create_checkout_session(
        &self,
        user: UserUuid,
    ) -> Result<CheckoutSession, PaymentsError> {
        let detail = self.carts.get_cart(user).await?;

        if detail.cart.total == 0 {
            return Err(PaymentsError::EmptyCart);
        }

        let amount = detail
            .cart
            .total
            .checked_mul(MINOR_UNITS)
            .ok_or(PaymentsError::AmountOverflow)?;

        let response = self
            .http
            .post(format!("{STRIPE_API_BASE}/checkout/sessions"))
            .bearer_auth(&self.config.secret_key)
            .form(&self.checkout_form(amount))
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(PaymentsError::Rejected {
                status: status.as_u16(),
            });
        }

        let session: StripeSession = response.json().await?;

        info!(user_uuid = %user, session_id = %session.id, amount, "created checkout session");

        Ok(CheckoutSession {
            session_id: session.id,
            url: session.url,
        })
    }

    async fn get_session_status(&self, session_id: &str) -> Result<SessionStatus, PaymentsError> {
        if !is_valid_session_id(session_id) {
            return Err(PaymentsError::InvalidSessionId);
        }

        let response = self
            .http
            .get(format!("{STRIPE_API_BASE}/checkout/sessions/{session_id}"))
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Err(PaymentsError::SessionNotFound),
            status if !status.is_success() => {
                return Err(PaymentsError::Rejected {
                    status: status.as_u16(),
                });
            }
            _ => {}
        }

        let session: StripeSession = response.json().await?;

        debug!(session_id, status = ?session.status, "fetched checkout session");

        Ok(SessionStatus {
            status: session.status,
            customer_email: session.customer_details.and_then(|details| details.email),
        })
    }
}

/// Stand-in used when no gateway key is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledPayments;

#[async_trait]
impl PaymentsService for DisabledPayments {
    async fn create_checkout_session(
        &self,
        _user: UserUuid,
    ) -> Result<CheckoutSession, PaymentsError> {
        Err(PaymentsError::NotConfigured)
    }

    async fn get_session_status(&self, _session_id: &str) -> Result<SessionStatus, PaymentsError> {
        Err(PaymentsError::NotConfigured)
    }
}
