//! Coupon requests and responses.

use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use platter_app::domain::coupons::models::{Coupon, CouponUpdate};

/// Coupon rule as stored.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponResponse {
    pub code: String,

    /// Percentage points when `is_percentage`, otherwise a flat amount
    pub discount: u64,
    pub is_percentage: bool,
    pub min_cart_total: u64,
    pub first_order_only: bool,
}

impl From<Coupon> for CouponResponse {
    fn from(coupon: Coupon) -> Self {
        Self {
            code: coupon.code,
            discount: coupon.discount,
            is_percentage: coupon.is_percentage,
            min_cart_total: coupon.min_cart_total,
            first_order_only: coupon.first_order_only,
        }
    }
}

/// Create or update a coupon rule.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponRequest {
    pub code: String,
    pub discount: u64,

    #[serde(default)]
    pub is_percentage: bool,

    #[serde(default)]
    pub min_cart_total: u64,

    #[serde(default)]
    pub first_order_only: bool,
}

impl CouponRequest {
    pub(crate) fn into_coupon(self) -> Coupon {
        Coupon {
            code: self.code.trim().to_string(),
            discount: self.discount,
            is_percentage: self.is_percentage,
            min_cart_total: self.min_cart_total,
            first_order_only: self.first_order_only,
        }
    }

    pub(crate) fn into_update(self) -> (String, CouponUpdate) {
        let update = CouponUpdate {
            discount: self.discount,
            is_percentage: self.is_percentage,
            min_cart_total: self.min_cart_total,
            first_order_only: self.first_order_only,
        };

        (self.code.trim().to_string(), update)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponEnvelope {
    pub success: bool,
    pub message: String,
    pub coupon: CouponResponse,
}

impl CouponEnvelope {
    pub(crate) fn new(message: &str, coupon: Coupon) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            coupon: coupon.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CouponsEnvelope {
    pub success: bool,
    pub message: String,
    pub coupons: Vec<CouponResponse>,
}
