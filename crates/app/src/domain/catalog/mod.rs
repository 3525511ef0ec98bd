//! Catalog
//!
//! Foods and restaurants are maintained elsewhere; this module only reads them for pricing,
//! ownership and display.

pub mod errors;
pub mod models;
pub(crate) mod repository;
pub mod service;

pub use errors::CatalogServiceError;
pub use service::*;
