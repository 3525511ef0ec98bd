//! Coupons service errors.

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::domain::{
    carts::pricing::CartError,
    coupons::{
        evaluation::{CouponRejection, Ineligibility},
        models::InvalidCoupon,
    },
};

#[derive(Debug, Error)]
pub enum CouponsServiceError {
    #[error("cart not found")]
    CartNotFound,

    #[error("a coupon is already applied")]
    AlreadyApplied,

    #[error("invalid coupon code")]
    InvalidCode,

    #[error("not eligible for this coupon: {0}")]
    NotEligible(Ineligibility),

    #[error("coupon is not applicable to this cart")]
    NotApplicable,

    #[error("no coupon is applied")]
    NotApplied,

    #[error("coupon not found")]
    CouponNotFound,

    #[error("coupon already exists")]
    AlreadyExists,

    #[error("invalid coupon: {0}")]
    InvalidCoupon(#[from] InvalidCoupon),

    #[error("cart could not be repriced")]
    Pricing(#[source] CartError),

    #[error("cart was modified concurrently")]
    Conflict,

    #[error("timed out waiting for storage")]
    Timeout,

    #[error("storage error")]
    Sql(#[source] Error),
}

impl From<Error> for CouponsServiceError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::PoolTimedOut) {
            return Self::Timeout;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(ErrorKind::Other | _) | None => Self::Sql(error),
        }
    }
}

impl From<CouponRejection> for CouponsServiceError {
    fn from(rejection: CouponRejection) -> Self {
        match rejection {
            CouponRejection::AlreadyApplied => Self::AlreadyApplied,
            CouponRejection::InvalidCode => Self::InvalidCode,
            CouponRejection::NotEligible(reason) => Self::NotEligible(reason),
            CouponRejection::NotApplicable => Self::NotApplicable,
        }
    }
}

impl From<CartError> for CouponsServiceError {
    fn from(error: CartError) -> Self {
        Self::Pricing(error)
    }
}
