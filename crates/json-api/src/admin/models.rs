//! Admin responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct TotalAmountResponse {
    pub success: bool,
    pub message: String,

    /// Sum of every order total, in whole currency units
    pub total_amount: u64,
}
