//! REST clients for the Everaura store API.
//!
//! # Architecture
//!
//! - [`RestClient`] is the shared transport: base URL, default headers, and
//!   the non-2xx / decode error mapping. The admin crate builds on it too.
//! - [`StorefrontApi`] is the shopper-facing client. Product listings are
//!   cached with `moka` (5 minute TTL by default).
//! - The API is the source of truth; nothing here syncs or retries.
//!
//! # Example
//!
//! ```rust,ignore
//! use everaura_storefront::api::{ProductQuery, StorefrontApi};
//!
//! let api = StorefrontApi::new(&config)?;
//! let rings = api.fetch_products(&ProductQuery::category("Rings")).await?;
//! ```

mod rest;
mod storefront;

pub use rest::RestClient;
pub use storefront::{
    ContactResponse, CreateOrderRequest, CreateOrderResponse, ProductQuery, StorefrontApi,
    VerifiedLogin,
};

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the store API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("API error: {status} - {}", .message.as_deref().unwrap_or(.reason.as_str()))]
    Status {
        status: u16,
        /// The `error` field of a JSON body, when present.
        message: Option<String>,
        /// Canonical reason phrase for the status.
        reason: String,
        /// Whether the body was JSON at all.
        json_body: bool,
    },

    /// API answered 2xx but reported failure in the body.
    #[error("Request rejected: {0}")]
    Rejected(String),

    /// Response body did not match the expected shape.
    #[error("JSON parse error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A header value (token, admin key) was not valid ASCII.
    #[error("Invalid header value for {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// Build the error for a non-success response from its status and body.
    #[must_use]
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
        let message = parsed
            .as_ref()
            .and_then(|json| json.get("error"))
            .and_then(serde_json::Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .map(str::to_owned);

        Self::Status {
            status: status.as_u16(),
            message,
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            json_body: parsed.is_some(),
        }
    }

    /// HTTP status, if the API answered at all.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the API rejected the bearer token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Status { status: 401, .. })
    }

    /// Message the server gave for this failure, if any.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Status { message, .. } => message.as_deref(),
            Self::Rejected(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// User-facing text: the server's message, or `fallback` when it gave none.
    ///
    /// Network and decode failures use their own generic text.
    #[must_use]
    pub fn user_message_or(&self, fallback: &str) -> String {
        match self {
            Self::Status { message, .. } => message.clone().unwrap_or_else(|| fallback.to_string()),
            Self::Rejected(message) => message.clone(),
            _ => self.user_message(),
        }
    }

    /// User-facing text for this failure.
    ///
    /// Status errors without a server message fall back to
    /// `Server error: <code>` for JSON bodies and
    /// `Server error: <code> (<reason>)` for anything else.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            }
            | Self::Rejected(message) => message.clone(),
            Self::Status {
                status,
                message: None,
                json_body: true,
                ..
            } => format!("Server error: {status}"),
            Self::Status {
                status,
                message: None,
                reason,
                json_body: false,
            } => format!("Server error: {status} ({reason})"),
            Self::Network(_) => "Could not reach the store. Check your connection.".to_string(),
            Self::Decode(_) => "The store sent an unexpected response.".to_string(),
            Self::InvalidUrl(_) | Self::InvalidHeader(_) => {
                "The client is misconfigured.".to_string()
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_error_field_is_used() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, r#"{"error":"Coupon expired"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.server_message(), Some("Coupon expired"));
        assert_eq!(err.user_message(), "Coupon expired");
        assert_eq!(err.user_message_or("Invalid coupon"), "Coupon expired");
    }

    #[test]
    fn test_json_without_error_field() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, r#"{"ok":false}"#);
        assert_eq!(err.server_message(), None);
        assert_eq!(err.user_message(), "Server error: 400");
        assert_eq!(err.user_message_or("Invalid coupon"), "Invalid coupon");
    }

    #[test]
    fn test_non_json_body_uses_status_line() {
        let err = ApiError::from_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "<html>Internal Server Error</html>",
        );
        assert_eq!(
            err.user_message(),
            "Server error: 500 (Internal Server Error)"
        );
    }

    #[test]
    fn test_unauthorized() {
        let err = ApiError::from_response(StatusCode::UNAUTHORIZED, "");
        assert!(err.is_unauthorized());
        assert!(!ApiError::from_response(StatusCode::FORBIDDEN, "").is_unauthorized());
    }

    #[test]
    fn test_blank_error_field_is_ignored() {
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, r#"{"error":"  "}"#);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn test_display() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, "nope");
        assert_eq!(err.to_string(), "API error: 404 - Not Found");
    }
}
