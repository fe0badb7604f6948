//! Integration tests for the Everaura clients.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p everaura-integration-tests
//! ```
//!
//! Nothing external is needed. Each test starts a [`MockStore`], an
//! in-memory copy of the store API served on an ephemeral localhost port,
//! and points the storefront or admin client at [`MockStore::api_url`].
//!
//! # Test Categories
//!
//! - `storefront_flow` - Catalog, cart and coupons, login, checkout, orders
//! - `admin_flow` - Admin key handling, RSN assignment, moderation, fulfilment
//!
//! # Example
//!
//! ```rust,ignore
//! use everaura_integration_tests::{MockStore, fixtures};
//!
//! let store = MockStore::start().await?;
//! store.add_product(fixtures::product("p1", 19_900));
//! let state = fixtures::shopper(&store);
//! let rings = state.catalog().shop("all", ProductType::AntiTarnish).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
mod mock;

pub use mock::{ADMIN_KEY, MockStore, RecordedRequest, VALID_OTP};
