//! Twilio SMS client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    domain::{orders::models::OrderUuid, users::models::User},
    notifications::{NotificationError, Notifier, confirmation_message},
};

const TWILIO_API_BASE: &str = "https://api.twilio.com/2010-04-01";

/// Credentials for the Twilio Messages API.
#[derive(Debug, Clone)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,

    /// Sender number in E.164 form.
    pub from_number: String,

    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct TwilioNotifier {
    config: TwilioConfig,
    http: Client,
}

impl TwilioNotifier {
    /// Build a notifier with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn new(config: TwilioConfig) -> Result<Self, NotificationError> {
        let http = Client::builder().timeout(config.timeout).build()?;

        Ok(Self { config, http })
    }

    fn messages_url(&self) -> String {
        format!(
            "{TWILIO_API_BASE}/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

#[async_trait]
impl Notifier for TwilioNotifier {
    async fn send_order_confirmation(
        &self,
        recipient: &User,
        order: OrderUuid,
    ) -> Result<(), NotificationError> {
        let body = confirmation_message(&recipient.name, order);

        let response = self
            .http
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("To", recipient.mobile.as_str()),
                ("From", self.config.from_number.as_str()),
                ("Body", body.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            return Err(NotificationError::Rejected(status.as_u16()));
        }

        debug!(order_uuid = %order, "sent order confirmation sms");

        Ok(())
    }
}
