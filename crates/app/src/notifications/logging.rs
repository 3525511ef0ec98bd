//! Notifier used when no SMS provider is configured.

use async_trait::async_trait;
use tracing::info;

use crate::{
    domain::{orders::models::OrderUuid, users::models::User},
    notifications::{NotificationError, Notifier, confirmation_message},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_order_confirmation(
        &self,
        recipient: &User,
        order: OrderUuid,
    ) -> Result<(), NotificationError> {
        info!(
            contact = %recipient.mobile,
            order_uuid = %order,
            message = %confirmation_message(&recipient.name, order),
            "order confirmation (not sent, no provider configured)"
        );

        Ok(())
    }
}
