//! Coupon management endpoints.

use everaura_core::{Coupon, CouponId};
use everaura_storefront::api::ApiError;
use reqwest::Method;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use super::AdminClient;

/// Body of `POST /coupons`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCoupon {
    pub code: String,
    /// Percentage off, sent as a numeric string like the dashboard form does
    pub discount: Decimal,
}

impl AdminClient {
    /// Every coupon, active or not.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_coupons(&self) -> Result<Vec<Coupon>, ApiError> {
        let url = self.rest().endpoint(&["coupons"])?;
        let request = self.rest().request(Method::GET, url);
        self.rest().send_json(request).await
    }

    /// Create a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the API rejects the coupon (e.g. a duplicate code)
    /// or the request fails.
    #[instrument(skip(self), fields(code = %coupon.code))]
    pub async fn create_coupon(&self, coupon: &NewCoupon) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["coupons"])?;
        let request = self.rest().request(Method::POST, url).json(coupon);
        self.rest().send_empty(request).await
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_coupon(&self, id: &CouponId) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["coupons", id.as_str()])?;
        let request = self.rest().request(Method::DELETE, url);
        self.rest().send_empty(request).await
    }
}
