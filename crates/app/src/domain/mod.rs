//! Platter Domain Concerns

pub mod carts;
pub mod catalog;
pub mod coupons;
pub mod orders;
pub mod users;
