//! Everaura Admin library.
//!
//! Client for the store's admin endpoints: product management with RSN
//! assignment, coupons, testimonial moderation and order fulfilment.
//!
//! # Security
//!
//! Every request carries the shared `X-ADMIN-KEY` secret, which grants full
//! write access to the catalog and orders. The key is loaded from
//! `EVERAURA_ADMIN_KEY` and rejected at startup if it looks like a
//! placeholder.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod client;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

pub use client::AdminClient;
pub use config::AdminConfig;
pub use error::{AdminError, Result};
pub use state::AdminState;
