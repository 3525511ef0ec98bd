//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use platter_app::domain::catalog::CatalogServiceError;

pub(crate) fn into_status_error(error: CatalogServiceError) -> StatusError {
    match error {
        CatalogServiceError::NotFound => StatusError::not_found().brief("Food not found"),
        CatalogServiceError::Timeout => {
            warn!("timed out reading catalog");

            StatusError::gateway_timeout()
        }
        CatalogServiceError::Sql(source) => {
            error!("failed to read catalog: {source}");

            StatusError::internal_server_error()
        }
    }
}
