//! Payment models.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutSession {
    pub session_id: String,

    /// Hosted checkout page, when the gateway returns one.
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStatus {
    /// Gateway status, e.g. `open`, `complete` or `expired`.
    pub status: Option<String>,
    pub customer_email: Option<String>,
}
