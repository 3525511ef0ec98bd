//! Notifications Config

use std::time::Duration;

use clap::Args;

use platter_app::notifications::TwilioConfig;

/// Twilio SMS settings. Confirmations are only logged unless all three credentials are set.
#[derive(Debug, Args)]
pub struct NotificationsConfig {
    /// Twilio account SID
    #[arg(long, env = "TWILIO_ACCOUNT_SID")]
    pub twilio_account_sid: Option<String>,

    /// Twilio auth token
    #[arg(long, env = "TWILIO_AUTH_TOKEN", hide_env_values = true)]
    pub twilio_auth_token: Option<String>,

    /// Sender phone number, E.164
    #[arg(long, env = "TWILIO_FROM_NUMBER")]
    pub twilio_from_number: Option<String>,

    /// Seconds before an SMS request is abandoned
    #[arg(long, env = "NOTIFICATION_TIMEOUT_SECONDS", default_value_t = 5)]
    pub notification_timeout_seconds: u64,
}

impl NotificationsConfig {
    #[must_use]
    pub fn twilio_config(&self) -> Option<TwilioConfig> {
        Some(TwilioConfig {
            account_sid: self.twilio_account_sid.clone()?,
            auth_token: self.twilio_auth_token.clone()?,
            from_number: self.twilio_from_number.clone()?,
            timeout: Duration::from_secs(self.notification_timeout_seconds),
        })
    }
}
