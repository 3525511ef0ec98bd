//! Admin Handlers

pub(crate) mod orders;
pub(crate) mod total_amount;
