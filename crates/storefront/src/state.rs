//! Application state shared across commands.

use std::sync::Arc;

use crate::api::{ApiError, StorefrontApi};
use crate::config::StorefrontConfig;
use crate::services::{
    AuthService, CartService, CatalogService, CheckoutService, FeedbackService, OrdersService,
    WishlistService,
};
use crate::storage::{ClientStorage, StorageError};

/// Error creating application state.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("api client: {0}")]
    Api(#[from] ApiError),
    #[error("client storage: {0}")]
    Storage(#[from] StorageError),
}

/// Application state shared across all commands.
///
/// This struct is cheaply cloneable via `Arc` and hands out the per-page
/// services, all backed by one API client and one set of client storage.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: StorefrontApi,
    storage: ClientStorage,
}

impl AppState {
    /// Create state with file-backed storage under `config.state_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or existing
    /// storage files cannot be read.
    pub fn new(config: StorefrontConfig) -> Result<Self, StateError> {
        let storage = ClientStorage::open(&config.state_dir, &config.session_id)?;
        Self::with_storage(config, storage)
    }

    /// Create state over explicit storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_storage(
        config: StorefrontConfig,
        storage: ClientStorage,
    ) -> Result<Self, StateError> {
        let api = StorefrontApi::new(&config)?;
        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                storage,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the store API client.
    #[must_use]
    pub fn api(&self) -> &StorefrontApi {
        &self.inner.api
    }

    /// Get a reference to client-side storage.
    #[must_use]
    pub fn storage(&self) -> &ClientStorage {
        &self.inner.storage
    }

    #[must_use]
    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self.api(), self.storage())
    }

    #[must_use]
    pub fn cart(&self) -> CartService<'_> {
        CartService::new(self.api(), self.storage())
    }

    #[must_use]
    pub fn wishlist(&self) -> WishlistService<'_> {
        WishlistService::new(self.api(), self.storage())
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self.api(), self.storage())
    }

    #[must_use]
    pub fn checkout(&self) -> CheckoutService<'_> {
        CheckoutService::new(self.api(), self.storage())
    }

    #[must_use]
    pub fn orders(&self) -> OrdersService<'_> {
        OrdersService::new(self.api(), self.storage())
    }

    #[must_use]
    pub fn feedback(&self) -> FeedbackService<'_> {
        FeedbackService::new(self.api())
    }
}
