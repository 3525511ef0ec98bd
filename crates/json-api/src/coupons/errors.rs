//! Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use platter_app::domain::coupons::CouponsServiceError;

pub(crate) fn into_status_error(error: CouponsServiceError) -> StatusError {
    match error {
        CouponsServiceError::CartNotFound => StatusError::not_found().brief("Cart not found"),
        CouponsServiceError::CouponNotFound => StatusError::not_found().brief("Coupon not found"),
        CouponsServiceError::AlreadyApplied => {
            StatusError::bad_request().brief("A coupon is already applied to this cart")
        }
        CouponsServiceError::InvalidCode => StatusError::bad_request().brief("Invalid coupon code"),
        CouponsServiceError::NotEligible(reason) => {
            StatusError::bad_request().brief(format!("Not eligible for this coupon: {reason}"))
        }
        CouponsServiceError::NotApplicable => {
            StatusError::bad_request().brief("Coupon does not reduce this cart's total")
        }
        CouponsServiceError::NotApplied => {
            StatusError::bad_request().brief("No coupon is applied to this cart")
        }
        CouponsServiceError::InvalidCoupon(reason) => {
            StatusError::bad_request().brief(format!("Invalid coupon: {reason}"))
        }
        CouponsServiceError::Pricing(source) => {
            StatusError::bad_request().brief(format!("Cart could not be repriced: {source}"))
        }
        CouponsServiceError::AlreadyExists => {
            StatusError::conflict().brief("A coupon with this code already exists")
        }
        CouponsServiceError::Conflict => {
            StatusError::conflict().brief("Cart was modified concurrently, please retry")
        }
        CouponsServiceError::Timeout => {
            warn!("timed out handling coupon");

            StatusError::gateway_timeout()
        }
        CouponsServiceError::Sql(source) => {
            error!("failed to handle coupon: {source}");

            StatusError::internal_server_error()
        }
    }
}
