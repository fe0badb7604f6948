//! Percentage discount coupons.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::CouponId;
use super::price::Price;

/// A coupon returned by `POST /coupons/apply` or listed by the admin API.
///
/// The API sends `discount` as a number, but coupons created from the admin
/// form store it as a numeric string; both deserialize.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CouponId>,
    pub code: String,
    #[serde(rename = "discount")]
    pub discount_percent: Decimal,
}

impl Coupon {
    /// Create a coupon without a server id.
    #[must_use]
    pub fn new(code: impl Into<String>, discount_percent: Decimal) -> Self {
        Self {
            id: None,
            code: code.into(),
            discount_percent,
        }
    }

    /// Discount this coupon takes off a subtotal, clamped to the subtotal.
    ///
    /// Percentages outside 0..=100 are clamped so the total never goes
    /// negative.
    #[must_use]
    pub fn discount_on(&self, subtotal: Price) -> Price {
        let percent = self
            .discount_percent
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        Price::new(subtotal.amount() * percent / Decimal::ONE_HUNDRED)
    }

    /// Label shown next to an applied coupon, e.g. `SAVE10 - 10% OFF`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}% OFF", self.code, self.discount_percent.normalize())
    }
}
