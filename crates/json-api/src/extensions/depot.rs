//! Depot helper extensions.

use std::any::Any;

use platter_app::{
    auth::Principal,
    domain::{catalog::models::RestaurantUuid, users::models::UserUuid},
};
use salvo::prelude::{Depot, StatusError};

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    fn insert_principal(&mut self, principal: Principal);

    fn principal_or_401(&self) -> Result<Principal, StatusError>;

    fn user_or_403(&self) -> Result<UserUuid, StatusError>;

    fn restaurant_or_403(&self) -> Result<RestaurantUuid, StatusError>;

    fn admin_or_403(&self) -> Result<Principal, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_principal(&mut self, principal: Principal) {
        self.inject(principal);
    }

    fn principal_or_401(&self) -> Result<Principal, StatusError> {
        self.obtain::<Principal>()
            .copied()
            .map_err(|_ignored| StatusError::unauthorized().brief("Not authenticated"))
    }

    fn user_or_403(&self) -> Result<UserUuid, StatusError> {
        self.principal_or_401()?
            .as_user()
            .ok_or_else(|| StatusError::forbidden().brief("Only users can do this"))
    }

    fn restaurant_or_403(&self) -> Result<RestaurantUuid, StatusError> {
        self.principal_or_401()?
            .as_restaurant()
            .ok_or_else(|| StatusError::forbidden().brief("Only restaurants can do this"))
    }

    fn admin_or_403(&self) -> Result<Principal, StatusError> {
        let principal = self.principal_or_401()?;

        if principal.is_admin() {
            Ok(principal)
        } else {
            Err(StatusError::forbidden().brief("Only admins can do this"))
        }
    }
}
