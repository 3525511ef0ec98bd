//! Server configuration module

use clap::Parser;

use platter_app::context::AppSettings;

use crate::config::{
    db::DatabaseConfig, notifications::NotificationsConfig, observability::LoggingConfig,
    payments::PaymentsConfig, server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod notifications;
pub(crate) mod observability;
pub(crate) mod payments;
pub(crate) mod server;

/// Platter JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "platter-json", about = "Platter JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,

    /// SMS confirmation settings.
    #[command(flatten)]
    pub notifications: NotificationsConfig,

    /// Checkout settings.
    #[command(flatten)]
    pub payments: PaymentsConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }

    /// Settings for building the application services.
    #[must_use]
    pub fn app_settings(&self) -> AppSettings {
        AppSettings {
            database_url: self.database.database_url.clone(),
            pool: self.database.pool_settings(),
            twilio: self.notifications.twilio_config(),
            stripe: self.payments.stripe_config(),
        }
    }
}
