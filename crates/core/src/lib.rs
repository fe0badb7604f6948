//! Everaura Core - Shared domain library.
//!
//! This crate provides the types and rule engines used by every Everaura
//! component:
//! - `storefront` - Shopper-facing client (catalog, cart, checkout, orders)
//! - `admin` - Store administration client
//! - `cli` - Command-line surface over both
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and trivially testable.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers and enums for products, prices, coupons,
//!   orders, emails and OTPs
//! - [`cart`] - Cart lines, quantity rules and price totals
//! - [`rsn`] - Product SKU (RSN) generation
//! - [`wishlist`] - Saved product snapshots

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod rsn;
pub mod types;
pub mod wishlist;

pub use cart::{Cart, CartLine, CartTotals, Decrement};
pub use rsn::{Rsn, RsnError, RsnSelection};
pub use types::*;
pub use wishlist::{Toggle, Wishlist};
