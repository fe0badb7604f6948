//! Admin services.
//!
//! Each service borrows the [`AdminClient`](crate::client::AdminClient) and
//! implements one dashboard tab, validating form input before it reaches the
//! API.

pub mod coupons;
pub mod orders;
pub mod products;
pub mod testimonials;

pub use coupons::CouponManager;
pub use orders::OrderDesk;
pub use products::{ProductDraft, ProductManager, sort_by_rsn};
pub use testimonials::TestimonialModeration;

use everaura_storefront::api::ApiError;

use crate::error::AdminError;

/// Turn an API refusal into a bad-request error carrying the server's reason
/// (or `fallback`). Server-side failures and transport errors pass through.
fn refused(err: ApiError, fallback: &str) -> AdminError {
    match err.status() {
        Some(status) if (400..500).contains(&status) => {
            AdminError::BadRequest(err.user_message_or(fallback))
        }
        _ => AdminError::Api(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_refused_keeps_server_reason() {
        let err = ApiError::from_response(
            StatusCode::CONFLICT,
            r#"{"error":"Coupon code already exists"}"#,
        );
        assert!(matches!(
            refused(err, "Failed to create coupon"),
            AdminError::BadRequest(m) if m == "Coupon code already exists"
        ));
    }

    #[test]
    fn test_refused_uses_fallback_for_html_body() {
        let err = ApiError::from_response(StatusCode::FORBIDDEN, "<html>Forbidden</html>");
        assert!(matches!(
            refused(err, "Failed to create coupon"),
            AdminError::BadRequest(m) if m == "Failed to create coupon"
        ));
    }
}
