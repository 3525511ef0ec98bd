//! Coupons

pub mod errors;
pub mod evaluation;
pub mod models;
mod repository;
pub mod service;

pub use errors::CouponsServiceError;
pub use service::*;
