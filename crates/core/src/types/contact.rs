//! Contact form messages.

use serde::{Deserialize, Serialize};

/// A message from the storefront contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Build a message, trimming every field.
    #[must_use]
    pub fn new(name: &str, email: &str, subject: &str, message: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            subject: subject.trim().to_string(),
            message: message.trim().to_string(),
        }
    }

    /// Whether the required fields (name, email, message) are filled in.
    /// The subject is optional.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.email, &self.message]
            .iter()
            .all(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_is_optional() {
        let message = ContactMessage::new(" Asha ", "asha@example.com", "", "Hello");
        assert_eq!(message.name, "Asha");
        assert!(message.is_complete());
    }

    #[test]
    fn test_blank_message_is_incomplete() {
        let message = ContactMessage::new("Asha", "asha@example.com", "Hi", "   ");
        assert!(!message.is_complete());
    }
}
