//! Shopper-facing store API client.
//!
//! Product listings and approved testimonials are cached using `moka`.
//! Everything user-scoped (orders, profile) goes straight to the API.

mod auth;
mod cache;
mod contact;
mod coupons;
mod orders;
mod products;
mod testimonials;

pub use auth::VerifiedLogin;
pub use contact::ContactResponse;
pub use orders::{CreateOrderRequest, CreateOrderResponse};
pub use products::ProductQuery;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::RequestBuilder;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use super::{ApiError, RestClient};
use crate::config::StorefrontConfig;
use cache::{CacheKey, CacheValue};

/// Upper bound on cached listings.
const CACHE_CAPACITY: u64 = 1000;

/// Client for the store API as seen by a shopper.
#[derive(Clone)]
pub struct StorefrontApi {
    inner: Arc<StorefrontApiInner>,
}

struct StorefrontApiInner {
    rest: RestClient,
    cache: Cache<CacheKey, CacheValue>,
}

impl StorefrontApi {
    /// Create a client from storefront configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, ApiError> {
        Self::with_cache_ttl(config.api_url.clone(), config.catalog_cache_ttl)
    }

    /// Create a client for `base_url` caching listings for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn with_cache_ttl(base_url: Url, ttl: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let cache = Cache::builder()
            .max_capacity(CACHE_CAPACITY)
            .time_to_live(ttl)
            .build();

        Ok(Self {
            inner: Arc::new(StorefrontApiInner {
                rest: RestClient::new(base_url, headers)?,
                cache,
            }),
        })
    }

    /// The underlying transport.
    #[must_use]
    pub fn rest(&self) -> &RestClient {
        &self.inner.rest
    }

    /// Drop every cached listing.
    pub fn invalidate_cache(&self) {
        self.inner.cache.invalidate_all();
    }

    fn cache(&self) -> &Cache<CacheKey, CacheValue> {
        &self.inner.cache
    }
}

/// Attach the shopper's token as a bearer credential.
fn with_bearer(request: RequestBuilder, token: &SecretString) -> RequestBuilder {
    request.bearer_auth(token.expose_secret())
}
