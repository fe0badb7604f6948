//! Storefront services.
//!
//! Each service borrows the API client and client storage from
//! [`AppState`](crate::state::AppState) and implements one page's worth of
//! shopper behavior.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod feedback;
pub mod orders;
pub mod wishlist;

pub use auth::{AuthService, LoginRedirect};
pub use cart::{AddOutcome, CartService, CartSummary};
pub use catalog::{CatalogService, TRENDING_LIMIT};
pub use checkout::{CheckoutService, PlacedOrder};
pub use feedback::FeedbackService;
pub use orders::OrdersService;
pub use wishlist::{WishlistOutcome, WishlistService};

use secrecy::SecretString;

use crate::api::ApiError;
use crate::error::StorefrontError;
use crate::storage::ClientStorage;

/// Turn an API refusal into a validation error carrying the server's reason
/// (or `fallback`). Server-side failures and transport errors pass through.
fn refusal(err: ApiError, fallback: &str) -> StorefrontError {
    match err.status() {
        Some(status) if (400..500).contains(&status) => {
            StorefrontError::Validation(err.user_message_or(fallback))
        }
        _ => StorefrontError::Api(err),
    }
}

/// The stored login token, or `NotLoggedIn`.
fn require_token(storage: &ClientStorage) -> Result<SecretString, StorefrontError> {
    storage.auth_token()?.ok_or(StorefrontError::NotLoggedIn)
}
