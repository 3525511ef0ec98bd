//! Payment Handlers

pub(crate) mod checkout;
pub(crate) mod session_status;
