//! Cache types for store API responses.

use everaura_core::{Product, Testimonial};

/// Cache key for catalog reads.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// A product listing, keyed by its encoded query string.
    Products(String),
    ApprovedTestimonials,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    Products(Vec<Product>),
    Testimonials(Vec<Testimonial>),
}
