//! Testimonials and the contact form.

use everaura_core::{ContactMessage, NewTestimonial, Testimonial};
use tracing::instrument;

use super::refusal;
use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError};

/// Reviews and contact messages.
pub struct FeedbackService<'a> {
    api: &'a StorefrontApi,
}

impl<'a> FeedbackService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi) -> Self {
        Self { api }
    }

    /// Testimonials approved for display.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        Ok(self.api.approved_testimonials().await?)
    }

    /// Submit a review. It is not shown until an admin approves it.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` if the name or summary is blank,
    /// or an error if the API refuses the review.
    #[instrument(skip_all)]
    pub async fn submit_testimonial(&self, testimonial: &NewTestimonial) -> Result<()> {
        if let Some(field) = testimonial.missing_field() {
            return Err(StorefrontError::Validation(format!(
                "Please fill in the {field}."
            )));
        }

        self.api
            .submit_testimonial(testimonial)
            .await
            .map_err(|e| refusal(e, "There was an error submitting your review."))
    }

    /// Send a contact form message.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` if a required field is blank or
    /// the API refuses the message.
    #[instrument(skip_all)]
    pub async fn contact(&self, message: &ContactMessage) -> Result<()> {
        if !message.is_complete() {
            return Err(StorefrontError::Validation(
                "Please fill in your name, email, and message.".to_string(),
            ));
        }

        self.api
            .send_contact(message)
            .await
            .map_err(|e| refusal(e, "Failed to send message."))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn offline_api() -> StorefrontApi {
        StorefrontApi::with_cache_ttl(
            Url::parse("http://127.0.0.1:9/api").unwrap(),
            Duration::from_secs(300),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_contact_requires_fields() {
        let api = offline_api();
        let feedback = FeedbackService::new(&api);
        let err = feedback
            .contact(&ContactMessage::new("Asha", "", "Hi", "Hello"))
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(),
            "Please fill in your name, email, and message."
        );
    }

    #[tokio::test]
    async fn test_testimonial_requires_summary() {
        let api = offline_api();
        let feedback = FeedbackService::new(&api);
        let review = NewTestimonial {
            name: "Asha".to_string(),
            contact: String::new(),
            summary: " ".to_string(),
            full_review: String::new(),
        };
        let err = feedback.submit_testimonial(&review).await.unwrap_err();
        assert_eq!(err.user_message(), "Please fill in the summary.");
    }
}
