//! Order Handlers

pub(crate) mod cancel;
pub(crate) mod cancel_restaurant;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod update_status;
