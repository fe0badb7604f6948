//! Customer testimonials.

use everaura_core::{NewTestimonial, Testimonial};
use reqwest::Method;
use tracing::{debug, instrument};

use super::StorefrontApi;
use super::cache::{CacheKey, CacheValue};
use crate::api::ApiError;

impl StorefrontApi {
    /// Testimonials an admin has approved for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn approved_testimonials(&self) -> Result<Vec<Testimonial>, ApiError> {
        let cache_key = CacheKey::ApprovedTestimonials;
        if let Some(CacheValue::Testimonials(testimonials)) = self.cache().get(&cache_key).await {
            debug!("Cache hit for testimonials");
            return Ok(testimonials);
        }

        let url = self.rest().endpoint(&["testimonials", "approved"])?;
        let request = self.rest().request(Method::GET, url);
        let testimonials: Vec<Testimonial> = self.rest().send_json(request).await?;

        self.cache()
            .insert(cache_key, CacheValue::Testimonials(testimonials.clone()))
            .await;

        Ok(testimonials)
    }

    /// Submit a testimonial. It stays hidden until approved.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip_all, fields(name = %testimonial.name))]
    pub async fn submit_testimonial(&self, testimonial: &NewTestimonial) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["testimonials"])?;
        let request = self.rest().request(Method::POST, url).json(testimonial);

        self.rest().send_empty(request).await
    }
}
