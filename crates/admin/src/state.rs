//! Admin state shared across commands.

use std::sync::Arc;

use everaura_storefront::api::ApiError;

use crate::client::AdminClient;
use crate::config::AdminConfig;
use crate::services::{CouponManager, OrderDesk, ProductManager, TestimonialModeration};

/// Admin state shared across all commands.
///
/// Cheaply cloneable via `Arc`; hands out one service per dashboard tab.
#[derive(Clone)]
pub struct AdminState {
    inner: Arc<AdminStateInner>,
}

struct AdminStateInner {
    config: AdminConfig,
    client: AdminClient,
}

impl AdminState {
    /// Create state from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the admin client cannot be built.
    pub fn new(config: AdminConfig) -> Result<Self, ApiError> {
        let client = AdminClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(AdminStateInner { config, client }),
        })
    }

    /// Get a reference to the admin configuration.
    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Get a reference to the admin API client.
    #[must_use]
    pub fn client(&self) -> &AdminClient {
        &self.inner.client
    }

    #[must_use]
    pub fn products(&self) -> ProductManager<'_> {
        ProductManager::new(self.client())
    }

    #[must_use]
    pub fn coupons(&self) -> CouponManager<'_> {
        CouponManager::new(self.client())
    }

    #[must_use]
    pub fn testimonials(&self) -> TestimonialModeration<'_> {
        TestimonialModeration::new(self.client())
    }

    #[must_use]
    pub fn orders(&self) -> OrderDesk<'_> {
        OrderDesk::new(self.client())
    }
}
