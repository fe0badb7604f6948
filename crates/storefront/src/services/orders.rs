//! My orders page.

use everaura_core::Order;
use tracing::{instrument, warn};

use super::require_token;
use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError, clear_sentry_user};
use crate::storage::ClientStorage;

/// Order history for the logged-in shopper.
pub struct OrdersService<'a> {
    api: &'a StorefrontApi,
    storage: &'a ClientStorage,
}

impl<'a> OrdersService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi, storage: &'a ClientStorage) -> Self {
        Self { api, storage }
    }

    /// The shopper's orders, newest as the API returns them.
    ///
    /// If the API rejects the stored token the shopper is logged out.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotLoggedIn` without a token,
    /// `StorefrontError::SessionExpired` if the token was rejected, or an
    /// API error if the request fails.
    #[instrument(skip(self))]
    pub async fn my_orders(&self) -> Result<Vec<Order>> {
        let token = require_token(self.storage)?;

        match self.api.my_orders(&token).await {
            Ok(orders) => Ok(orders),
            Err(e) if e.is_unauthorized() => {
                warn!("Token rejected; logging out");
                self.storage.clear_login()?;
                clear_sentry_user();
                Err(StorefrontError::SessionExpired)
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    #[tokio::test]
    async fn test_requires_login() {
        let api = StorefrontApi::with_cache_ttl(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            Duration::from_secs(300),
        )
        .unwrap();
        let storage = ClientStorage::in_memory();

        let result = OrdersService::new(&api, &storage).my_orders().await;
        assert!(matches!(result, Err(StorefrontError::NotLoggedIn)));
    }
}
