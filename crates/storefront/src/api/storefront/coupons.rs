//! Coupon validation.

use everaura_core::Coupon;
use reqwest::Method;
use serde_json::json;
use tracing::instrument;

use super::StorefrontApi;
use crate::api::ApiError;

impl StorefrontApi {
    /// Ask the API to validate a coupon code.
    ///
    /// The API decides whether the code exists and is active; the returned
    /// coupon carries the discount to apply.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Status` with the server's reason if the code is
    /// rejected, or another error if the request fails.
    #[instrument(skip(self))]
    pub async fn apply_coupon(&self, code: &str) -> Result<Coupon, ApiError> {
        let url = self.rest().endpoint(&["coupons", "apply"])?;
        let request = self
            .rest()
            .request(Method::POST, url)
            .json(&json!({ "code": code }));

        self.rest().send_json(request).await
    }
}
