//! Payments
//!
//! Checkout is delegated to Stripe. The amount charged is always the user's current cart total
//! as stored, never a figure supplied by the client. Gateway results are reported back as is;
//! orders do not depend on them.

mod errors;
mod models;
mod stripe;

pub use errors::PaymentsError;
pub use models::*;
pub use stripe::{DisabledPayments, StripeConfig, StripePayments};

use async_trait::async_trait;
use mockall::automock;

use crate::domain::users::models::UserUuid;

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Open a checkout session charging the user's cart total.
    async fn create_checkout_session(
        &self,
        user: UserUuid,
    ) -> Result<CheckoutSession, PaymentsError>;

    /// Look up a checkout session as the gateway sees it.
    async fn get_session_status(&self, session_id: &str) -> Result<SessionStatus, PaymentsError>;
}
