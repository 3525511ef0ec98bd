//! Orders

pub mod assembly;
pub mod errors;
pub mod models;
pub(crate) mod records;
mod repository;
pub mod service;
pub mod status;

pub use errors::OrdersServiceError;
pub use service::*;
