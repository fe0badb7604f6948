//! Core types for Everaura.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod contact;
pub mod coupon;
pub mod email;
pub mod id;
pub mod order;
pub mod otp;
pub mod price;
pub mod product;
pub mod status;
pub mod testimonial;
pub mod user;

pub use contact::ContactMessage;
pub use coupon::Coupon;
pub use email::{Email, EmailError};
pub use id::*;
pub use order::{Order, ShippingAddress, Tracking};
pub use otp::{Otp, OtpError};
pub use price::Price;
pub use product::{
    Category, Gender, Material, PLACEHOLDER_IMAGE, Product, ProductCodeError, ProductType,
};
pub use status::*;
pub use testimonial::{NewTestimonial, Testimonial, TestimonialStatus};
pub use user::UserProfile;
