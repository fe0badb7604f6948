//! Everaura Storefront library.
//!
//! Shopper-facing client for the Everaura store API: catalog listings, the
//! cookie-backed cart with coupon pricing, wishlist, OTP login, checkout and
//! order history. Client-side state is kept in browser-shaped storage (a
//! cart cookie, durable storage and per-session storage) so behavior
//! matches the web storefront.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;
pub mod storage;

pub use error::{Result, StorefrontError};
pub use state::AppState;
