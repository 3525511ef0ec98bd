//! Restaurant Handlers

pub(crate) mod index;
pub(crate) mod orders;
pub(crate) mod update_order;
