//! Customer testimonials (reviews).

use serde::{Deserialize, Serialize};

use super::id::TestimonialId;

/// A testimonial as stored by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(rename = "_id")]
    pub id: TestimonialId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_review: Option<String>,
    #[serde(default)]
    pub status: TestimonialStatus,
}

/// Moderation state of a testimonial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestimonialStatus {
    #[default]
    Pending,
    Approved,
}

impl TestimonialStatus {
    /// Badge shown in the moderation table.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
        }
    }
}

impl Testimonial {
    /// Whether the testimonial is visible on the storefront.
    #[must_use]
    pub fn is_approved(&self) -> bool {
        self.status == TestimonialStatus::Approved
    }

    /// The full review text, if the reviewer wrote one.
    #[must_use]
    pub fn full_review(&self) -> Option<&str> {
        self.full_review.as_deref().filter(|r| !r.trim().is_empty())
    }
}

/// A new testimonial submitted from the storefront. It stays hidden until an
/// admin approves it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTestimonial {
    pub name: String,
    pub contact: String,
    pub summary: String,
    pub full_review: String,
}

impl NewTestimonial {
    /// Name of the first required field that is blank, if any.
    ///
    /// Contact details and the full review are optional.
    #[must_use]
    pub fn missing_field(&self) -> Option<&'static str> {
        [("name", &self.name), ("summary", &self.summary)]
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| field)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal() {
        let t: Testimonial =
            serde_json::from_str(r#"{"_id": "t1", "name": "Asha", "summary": "Lovely!"}"#).unwrap();
        assert_eq!(t.status, TestimonialStatus::Pending);
        assert!(t.full_review().is_none());
    }

    #[test]
    fn test_status_from_api() {
        let t: Testimonial = serde_json::from_str(
            r#"{"_id": "t1", "name": "Asha", "summary": "Lovely!", "status": "approved"}"#,
        )
        .unwrap();
        assert!(t.is_approved());
    }

    #[test]
    fn test_blank_full_review_is_none() {
        let t: Testimonial = serde_json::from_str(
            r#"{"_id": "t1", "name": "Asha", "summary": "Lovely!", "full_review": "  "}"#,
        )
        .unwrap();
        assert!(t.full_review().is_none());
    }

    #[test]
    fn test_missing_field() {
        let mut review = NewTestimonial {
            name: "Asha".to_string(),
            contact: String::new(),
            summary: String::new(),
            full_review: String::new(),
        };
        assert_eq!(review.missing_field(), Some("summary"));
        review.summary = "Great".to_string();
        assert_eq!(review.missing_field(), None);
    }
}
