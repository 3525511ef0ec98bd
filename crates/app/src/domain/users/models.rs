//! User Models

use crate::uuids::TypedUuid;

pub type UserUuid = TypedUuid<User>;

/// User Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub uuid: UserUuid,
    pub name: String,

    /// Contact number used for order confirmations.
    pub mobile: String,
}
