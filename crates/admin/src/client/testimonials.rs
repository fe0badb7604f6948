//! Testimonial moderation endpoints.

use everaura_core::{Testimonial, TestimonialId};
use everaura_storefront::api::ApiError;
use reqwest::Method;
use tracing::instrument;

use super::AdminClient;

impl AdminClient {
    /// Every testimonial, pending and approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn all_testimonials(&self) -> Result<Vec<Testimonial>, ApiError> {
        let url = self.rest().endpoint(&["testimonials"])?;
        let request = self.rest().request(Method::GET, url);
        self.rest().send_json(request).await
    }

    /// Testimonials awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn pending_testimonials(&self) -> Result<Vec<Testimonial>, ApiError> {
        let url = self.rest().endpoint(&["testimonials", "pending"])?;
        let request = self.rest().request(Method::GET, url);
        self.rest().send_json(request).await
    }

    /// Make a testimonial public.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn approve_testimonial(&self, id: &TestimonialId) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["testimonials", id.as_str(), "approve"])?;
        let request = self.rest().request(Method::PUT, url);
        self.rest().send_empty(request).await
    }

    /// Permanently delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn delete_testimonial(&self, id: &TestimonialId) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["testimonials", id.as_str()])?;
        let request = self.rest().request(Method::DELETE, url);
        self.rest().send_empty(request).await
    }
}
