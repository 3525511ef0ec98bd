//! App Context

use std::sync::Arc;

use thiserror::Error;
use tracing::info;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, Db, PoolSettings},
    domain::{
        carts::{CartsService, PgCartsService},
        catalog::{CatalogService, PgCatalogService},
        coupons::{CouponsService, PgCouponsService},
        orders::{OrdersService, PgOrdersService},
    },
    notifications::{LogNotifier, NotificationError, Notifier, TwilioConfig, TwilioNotifier},
    payments::{DisabledPayments, PaymentsError, PaymentsService, StripeConfig, StripePayments},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("failed to set up notifications")]
    Notifications(#[source] NotificationError),

    #[error("failed to set up payments")]
    Payments(#[source] PaymentsError),
}

/// Everything needed to build the application services.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub database_url: String,
    pub pool: PoolSettings,

    /// SMS confirmations are only logged when this is `None`.
    pub twilio: Option<TwilioConfig>,

    /// Payment endpoints answer "not configured" when this is `None`.
    pub stripe: Option<StripeConfig>,
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub orders: Arc<dyn OrdersService>,
    pub payments: Arc<dyn PaymentsService>,
    pub auth: Arc<dyn AuthService>,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}

impl AppContext {
    /// Connect to the database and build every service.
    ///
    /// # Errors
    ///
    /// Returns an error when the database is unreachable or an HTTP collaborator cannot be
    /// built.
    pub async fn from_settings(settings: AppSettings) -> Result<Self, AppInitError> {
        let pool = database::connect(&settings.database_url, &settings.pool)
            .await
            .map_err(AppInitError::Database)?;

        let db = Db::new(pool.clone());

        let notifier: Arc<dyn Notifier> = match settings.twilio {
            Some(config) => {
                Arc::new(TwilioNotifier::new(config).map_err(AppInitError::Notifications)?)
            }
            None => {
                info!("twilio is not configured, order confirmations will only be logged");

                Arc::new(LogNotifier)
            }
        };

        let carts: Arc<dyn CartsService> = Arc::new(PgCartsService::new(db.clone()));

        let payments: Arc<dyn PaymentsService> = match settings.stripe {
            Some(config) => Arc::new(
                StripePayments::new(config, Arc::clone(&carts)).map_err(AppInitError::Payments)?,
            ),
            None => {
                info!("stripe is not configured, payment endpoints are disabled");

                Arc::new(DisabledPayments)
            }
        };

        Ok(Self {
            catalog: Arc::new(PgCatalogService::new(db.clone())),
            coupons: Arc::new(PgCouponsService::new(db.clone())),
            orders: Arc::new(PgOrdersService::new(db, notifier)),
            carts,
            payments,
            auth: Arc::new(PgAuthService::new(pool)),
        })
    }
}
