//! Coupon management.

use everaura_core::{Coupon, CouponId};
use rust_decimal::Decimal;
use tracing::{info, instrument};

use super::refused;
use crate::client::{AdminClient, NewCoupon};
use crate::error::{AdminError, Result};

/// Admin coupon tab.
pub struct CouponManager<'a> {
    client: &'a AdminClient,
}

impl<'a> CouponManager<'a> {
    #[must_use]
    pub const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list(&self) -> Result<Vec<Coupon>> {
        Ok(self.client.list_coupons().await?)
    }

    /// Create a percentage coupon.
    ///
    /// # Errors
    ///
    /// Returns `AdminError::BadRequest` if the code is blank, the discount is
    /// outside (0, 100], or the API refuses the coupon.
    #[instrument(skip(self))]
    pub async fn create(&self, code: &str, discount: Decimal) -> Result<()> {
        let coupon = validate_coupon(code, discount)?;
        self.client
            .create_coupon(&coupon)
            .await
            .map_err(|e| refused(e, "Failed to create coupon"))?;
        info!(code = %coupon.code, "Coupon created");
        Ok(())
    }

    /// Delete a coupon.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &CouponId) -> Result<()> {
        self.client
            .delete_coupon(id)
            .await
            .map_err(|e| refused(e, "Failed to delete coupon."))
    }
}

fn validate_coupon(code: &str, discount: Decimal) -> Result<NewCoupon> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AdminError::BadRequest(
            "Please enter a coupon code.".to_string(),
        ));
    }
    if discount <= Decimal::ZERO || discount > Decimal::ONE_HUNDRED {
        return Err(AdminError::BadRequest(
            "Discount must be more than 0% and at most 100%.".to_string(),
        ));
    }
    Ok(NewCoupon {
        code: code.to_string(),
        discount: discount.normalize(),
    })
}
