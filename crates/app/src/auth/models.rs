//! Auth data models.

use std::{fmt, str::FromStr};

use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{catalog::models::RestaurantUuid, users::models::UserUuid};

/// Kind of account a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    User,
    Restaurant,
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Restaurant => "restaurant",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "user" => Ok(Self::User),
            "restaurant" => Ok(Self::Restaurant),
            "admin" => Ok(Self::Admin),
            _ => Err(UnknownRole(value.to_string())),
        }
    }
}

/// The authenticated caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    pub uuid: Uuid,
    pub role: Role,
}

impl Principal {
    #[must_use]
    pub const fn user(user: UserUuid) -> Self {
        Self {
            uuid: user.into_uuid(),
            role: Role::User,
        }
    }

    #[must_use]
    pub const fn restaurant(restaurant: RestaurantUuid) -> Self {
        Self {
            uuid: restaurant.into_uuid(),
            role: Role::Restaurant,
        }
    }

    #[must_use]
    pub const fn admin(uuid: Uuid) -> Self {
        Self {
            uuid,
            role: Role::Admin,
        }
    }

    #[must_use]
    pub fn as_user(&self) -> Option<UserUuid> {
        (self.role == Role::User).then(|| UserUuid::from_uuid(self.uuid))
    }

    #[must_use]
    pub fn as_restaurant(&self) -> Option<RestaurantUuid> {
        (self.role == Role::Restaurant).then(|| RestaurantUuid::from_uuid(self.uuid))
    }

    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Session lookup result.
#[derive(Debug, Clone)]
pub(crate) struct ActiveSession {
    pub principal: Principal,
    pub expires_at: Option<Timestamp>,
}

/// New session persistence payload.
#[derive(Debug, Clone)]
pub(crate) struct NewSession {
    pub uuid: Uuid,
    pub principal: Principal,
    pub token_hash: String,
    pub expires_at: Option<Timestamp>,
}

/// Session issuance result with the one-time raw token.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub uuid: Uuid,
    pub token: String,
    pub principal: Principal,
    pub expires_at: Option<Timestamp>,
}
