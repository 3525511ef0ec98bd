//! Coupon Handlers

pub(crate) mod apply;
pub(crate) mod cancel;
pub(crate) mod create;
pub(crate) mod index;
pub(crate) mod update;
