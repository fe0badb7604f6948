//! Store API client for admin operations.
//!
//! Every request carries the shared `X-ADMIN-KEY` header. Reads here never
//! go through the storefront catalog cache, so edits show up immediately.
//!
//! # Example
//!
//! ```rust,ignore
//! use everaura_admin::{AdminClient, AdminConfig};
//!
//! let client = AdminClient::new(&AdminConfig::from_env()?)?;
//! let orders = client.list_orders().await?;
//! ```

mod coupons;
mod orders;
mod products;
mod testimonials;

pub use coupons::NewCoupon;
pub use products::{ProductForm, ProductImage};

use everaura_storefront::api::{ApiError, RestClient};
use reqwest::header::{ACCEPT, HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;

use crate::config::AdminConfig;

/// Header carrying the shared admin secret.
pub const ADMIN_KEY_HEADER: HeaderName = HeaderName::from_static("x-admin-key");

/// Admin client for the store API.
#[derive(Clone)]
pub struct AdminClient {
    rest: RestClient,
}

impl AdminClient {
    /// Create a client authenticated with the configured admin key.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidHeader` if the key is not a valid header
    /// value, or an error if the HTTP client fails to build.
    pub fn new(config: &AdminConfig) -> Result<Self, ApiError> {
        let mut key = HeaderValue::from_str(config.admin_key.expose_secret()).map_err(|_| {
            ApiError::InvalidHeader("admin key contains invalid header characters".to_string())
        })?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_KEY_HEADER, key);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        Ok(Self {
            rest: RestClient::new(config.api_url.clone(), headers)?,
        })
    }

    /// Get the underlying REST client.
    #[must_use]
    pub const fn rest(&self) -> &RestClient {
        &self.rest
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use url::Url;

    #[test]
    fn test_rejects_key_with_newline() {
        let config = AdminConfig::new(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            SecretString::from("bad\nkey".to_string()),
        );
        assert!(matches!(
            AdminClient::new(&config),
            Err(ApiError::InvalidHeader(_))
        ));
    }
}
