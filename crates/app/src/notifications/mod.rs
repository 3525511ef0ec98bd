//! Order confirmation notifications.

mod errors;
mod logging;
mod twilio;

pub use errors::NotificationError;
pub use logging::LogNotifier;
pub use twilio::{TwilioConfig, TwilioNotifier};

use async_trait::async_trait;
use mockall::automock;

use crate::domain::{orders::models::OrderUuid, users::models::User};

#[automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Tell the customer that their order was placed, on their registered mobile number.
    async fn send_order_confirmation(
        &self,
        recipient: &User,
        order: OrderUuid,
    ) -> Result<(), NotificationError>;
}

fn confirmation_message(name: &str, order: OrderUuid) -> String {
    format!(
        "Hello {name},\n\nYour order {order} has been placed. We will let you know when it is on \
         its way."
    )
}
