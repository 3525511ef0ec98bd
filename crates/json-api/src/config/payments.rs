//! Payments Config

use std::time::Duration;

use clap::Args;

use platter_app::payments::StripeConfig;

/// Stripe checkout settings.
#[derive(Debug, Args)]
pub struct PaymentsConfig {
    /// Stripe secret key; payments are disabled without it
    #[arg(long, env = "STRIPE_SECRET_KEY", hide_env_values = true)]
    pub stripe_secret_key: Option<String>,

    /// Front-end origin for checkout redirects
    #[arg(long, env = "CLIENT_DOMAIN", default_value = "http://localhost:3000")]
    pub client_domain: String,

    /// ISO currency code charged at checkout
    #[arg(long, env = "PAYMENT_CURRENCY", default_value = "inr")]
    pub payment_currency: String,

    /// Seconds before a gateway request is abandoned
    #[arg(long, env = "PAYMENT_TIMEOUT_SECONDS", default_value_t = 10)]
    pub payment_timeout_seconds: u64,
}

impl PaymentsConfig {
    #[must_use]
    pub fn stripe_config(&self) -> Option<StripeConfig> {
        let secret_key = self.stripe_secret_key.clone()?;

        Some(StripeConfig {
            secret_key,
            client_domain: self.client_domain.trim_end_matches('/').to_string(),
            currency: self.payment_currency.to_ascii_lowercase(),
            timeout: Duration::from_secs(self.payment_timeout_seconds),
        })
    }
}
