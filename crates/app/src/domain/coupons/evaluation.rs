//! Coupon eligibility rules.

use thiserror::Error;

use crate::domain::{carts::models::Cart, coupons::models::Coupon};

/// Why a coupon cannot be applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CouponRejection {
    #[error("a coupon is already applied to this cart")]
    AlreadyApplied,

    #[error("invalid coupon code")]
    InvalidCode,

    #[error("not eligible: {0}")]
    NotEligible(Ineligibility),

    #[error("coupon does not reduce this cart's total")]
    NotApplicable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Ineligibility {
    #[error("valid on the first order only")]
    FirstOrderOnly,

    #[error("cart total must be at least {minimum}")]
    MinimumTotal { minimum: u64 },
}

/// Decide whether `coupon` applies to `cart` and how much it takes off.
///
/// Checks run in a fixed order and the first failure wins: an already applied coupon, an
/// unknown code, the first-order rule, the minimum total, then a zero discount.
///
/// # Errors
///
/// Returns the first rejection that applies.
pub fn evaluate(
    cart: &Cart,
    coupon: Option<&Coupon>,
    prior_orders: u64,
) -> Result<u64, CouponRejection> {
    if cart.coupon_applied {
        return Err(CouponRejection::AlreadyApplied);
    }

    let coupon = coupon.ok_or(CouponRejection::InvalidCode)?;

    if coupon.first_order_only && prior_orders > 0 {
        return Err(CouponRejection::NotEligible(Ineligibility::FirstOrderOnly));
    }

    if cart.total < coupon.min_cart_total {
        return Err(CouponRejection::NotEligible(Ineligibility::MinimumTotal {
            minimum: coupon.min_cart_total,
        }));
    }

    match coupon.discount_for(cart.total) {
        0 => Err(CouponRejection::NotApplicable),
        discount => Ok(discount),
    }
}
