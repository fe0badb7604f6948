//! Testimonial moderation.

use everaura_core::{Testimonial, TestimonialId, TestimonialStatus};
use tracing::instrument;

use super::refused;
use crate::client::AdminClient;
use crate::error::Result;

/// Admin testimonial tab.
pub struct TestimonialModeration<'a> {
    client: &'a AdminClient,
}

impl<'a> TestimonialModeration<'a> {
    #[must_use]
    pub const fn new(client: &'a AdminClient) -> Self {
        Self { client }
    }

    /// Every testimonial, pending ones first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn all(&self) -> Result<Vec<Testimonial>> {
        let mut testimonials = self.client.all_testimonials().await?;
        pending_first(&mut testimonials);
        Ok(testimonials)
    }

    /// Testimonials awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn pending(&self) -> Result<Vec<Testimonial>> {
        Ok(self.client.pending_testimonials().await?)
    }

    /// Make a testimonial public.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses or the request fails.
    #[instrument(skip(self))]
    pub async fn approve(&self, id: &TestimonialId) -> Result<()> {
        self.client
            .approve_testimonial(id)
            .await
            .map_err(|e| refused(e, "Approval failed. Please try again."))
    }

    /// Permanently delete a testimonial.
    ///
    /// # Errors
    ///
    /// Returns an error if the API refuses or the request fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &TestimonialId) -> Result<()> {
        self.client
            .delete_testimonial(id)
            .await
            .map_err(|e| refused(e, "Deletion failed. Please try again."))
    }
}

fn pending_first(testimonials: &mut [Testimonial]) {
    testimonials.sort_by_key(|t| t.status != TestimonialStatus::Pending);
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn testimonial(id: &str, status: TestimonialStatus) -> Testimonial {
        Testimonial {
            id: TestimonialId::new(id),
            name: "Asha".to_string(),
            contact: None,
            summary: "Lovely".to_string(),
            full_review: None,
            status,
        }
    }

    #[test]
    fn test_pending_first_is_stable() {
        let mut list = vec![
            testimonial("a", TestimonialStatus::Approved),
            testimonial("b", TestimonialStatus::Pending),
            testimonial("c", TestimonialStatus::Approved),
            testimonial("d", TestimonialStatus::Pending),
        ];
        pending_first(&mut list);
        let ids: Vec<&str> = list.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["b", "d", "a", "c"]);
    }
}
