//! Coupon Models

use thiserror::Error;

/// Coupon Model
///
/// Coupons are rules, not vouchers: nothing is consumed when one is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coupon {
    pub code: String,

    /// Percentage points when `is_percentage`, otherwise a flat amount.
    pub discount: u64,
    pub is_percentage: bool,

    /// Smallest cart total the coupon can be applied to.
    pub min_cart_total: u64,

    /// Only users without any previous order may use it.
    pub first_order_only: bool,
}

/// Coupon Update Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CouponUpdate {
    pub discount: u64,
    pub is_percentage: bool,
    pub min_cart_total: u64,
    pub first_order_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidCoupon {
    #[error("coupon code must not be blank")]
    BlankCode,

    #[error("discount must be greater than zero")]
    ZeroDiscount,

    #[error("percentage discount cannot exceed 100")]
    PercentageTooLarge,
}

impl Coupon {
    /// Discount this coupon grants on the given total, before clamping at zero.
    #[must_use]
    pub fn discount_for(&self, total: u64) -> u64 {
        if !self.is_percentage {
            return self.discount;
        }

        let discount = u128::from(total) * u128::from(self.discount) / 100;

        u64::try_from(discount).unwrap_or(u64::MAX)
    }

    /// Check the coupon's rule is coherent.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), InvalidCoupon> {
        if self.code.trim().is_empty() {
            return Err(InvalidCoupon::BlankCode);
        }

        validate_discount(self.discount, self.is_percentage)
    }
}

impl CouponUpdate {
    /// # Errors
    ///
    /// Returns an error when the discount is zero or an over-large percentage.
    pub fn validate(&self) -> Result<(), InvalidCoupon> {
        validate_discount(self.discount, self.is_percentage)
    }
}

fn validate_discount(discount: u64, is_percentage: bool) -> Result<(), InvalidCoupon> {
    if discount == 0 {
        return Err(InvalidCoupon::ZeroDiscount);
    }

    if is_percentage && discount > 100 {
        return Err(InvalidCoupon::PercentageTooLarge);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(discount: u64, is_percentage: bool) -> Coupon {
        Coupon {
            code: "TEST".to_string(),
            discount,
            is_percentage,
            min_cart_total: 0,
            first_order_only: false,
        }
    }

    #[test]
    fn percentage_discount_rounds_down() {
        assert_eq!(coupon(50, true).discount_for(451), 225);
    }

    #[test]
    fn flat_discount_ignores_total() {
        assert_eq!(coupon(200, false).discount_for(50), 200);
    }

    #[test]
    fn validate_rejects_incoherent_rules() {
        assert_eq!(coupon(0, false).validate(), Err(InvalidCoupon::ZeroDiscount));
        assert_eq!(
            coupon(101, true).validate(),
            Err(InvalidCoupon::PercentageTooLarge)
        );
        assert_eq!(
            Coupon {
                code: "  ".to_string(),
                ..coupon(10, false)
            }
            .validate(),
            Err(InvalidCoupon::BlankCode)
        );
        assert_eq!(coupon(101, false).validate(), Ok(()));
    }
}
