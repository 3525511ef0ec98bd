//! Users
//!
//! Registration and profile management happen elsewhere. Ordering only needs to know that a
//! user exists, how to reach them and how many orders they have placed.

pub mod models;
pub(crate) mod repository;
