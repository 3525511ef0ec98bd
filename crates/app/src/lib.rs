//! Ordering core: carts, coupons, orders and the services around them.

pub mod auth;
pub mod context;
pub mod database;
pub mod domain;
pub mod notifications;
pub mod payments;

#[cfg(test)]
mod test;

mod uuids;
