//! Unified error handling with Sentry integration.
//!
//! Every storefront service returns `Result<T, StorefrontError>`. Callers show
//! [`StorefrontError::user_message`] to the shopper; [`StorefrontError::capture`]
//! reports unexpected failures to Sentry.

use thiserror::Error;

use crate::api::ApiError;
use crate::storage::StorageError;

/// Service-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Store API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Client-side storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input rejected before any request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The action needs a logged-in shopper.
    #[error("Not logged in")]
    NotLoggedIn,

    /// The API rejected the stored token; the shopper has been logged out.
    #[error("Session expired")]
    SessionExpired,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,
}

impl StorefrontError {
    /// Text to show the shopper.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(err) => err.user_message(),
            Self::Storage(_) => "Could not save your changes locally.".to_string(),
            Self::Validation(message) => message.clone(),
            Self::NotFound(what) => format!("{what} was not found."),
            Self::NotLoggedIn => "Please log in to continue.".to_string(),
            Self::SessionExpired => "Your session has expired. Please log in again.".to_string(),
            Self::EmptyCart => "Your cart is empty.".to_string(),
        }
    }

    /// Whether this is a failure worth reporting, as opposed to the shopper
    /// doing something the store refuses.
    #[must_use]
    pub const fn is_unexpected(&self) -> bool {
        match self {
            Self::Api(ApiError::Status { status, .. }) => *status >= 500,
            Self::Api(_) | Self::Storage(_) => true,
            Self::Validation(_)
            | Self::NotFound(_)
            | Self::NotLoggedIn
            | Self::SessionExpired
            | Self::EmptyCart => false,
        }
    }

    /// Report to Sentry if unexpected, and log either way.
    pub fn capture(&self) {
        if self.is_unexpected() {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Storefront error"
            );
        } else {
            tracing::info!(error = %self, "Storefront request refused");
        }
    }
}


pub type Result<T> = std::result::Result<T, StorefrontError>;

/// Tag later Sentry events with the logged-in shopper.
pub fn set_sentry_user(email: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            email: Some(email.to_string()),
            ..Default::default()
        }));
    });
}

/// Forget the shopper on logout.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

/// Record a shopper action so a later Sentry report shows what led up to it.
///
/// ```rust,ignore
/// add_breadcrumb("cart", "Added item", Some(&[("product_id", "p1")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_error_display() {
        let err = StorefrontError::NotFound("Product p1".to_string());
        assert_eq!(err.to_string(), "Not found: Product p1");

        let err = StorefrontError::Validation("Please enter a coupon code.".to_string());
        assert_eq!(err.to_string(), "Validation error: Please enter a coupon code.");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            StorefrontError::Validation("Please enter a coupon code.".to_string()).user_message(),
            "Please enter a coupon code."
        );
        let api = ApiError::from_response(StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(
            StorefrontError::Api(api).user_message(),
            "Server error: 502 (Bad Gateway)"
        );
    }

    #[test]
    fn test_unexpected_classification() {
        let server = ApiError::from_response(StatusCode::INTERNAL_SERVER_ERROR, "");
        let client = ApiError::from_response(StatusCode::BAD_REQUEST, "");
        assert!(StorefrontError::Api(server).is_unexpected());
        assert!(!StorefrontError::Api(client).is_unexpected());
        assert!(!StorefrontError::EmptyCart.is_unexpected());
    }
}
