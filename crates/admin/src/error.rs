//! Unified error handling for admin.

use everaura_core::RsnError;
use everaura_storefront::api::ApiError;
use thiserror::Error;

/// Application-level error type for admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Store API call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// RSN could not be generated.
    #[error("RSN error: {0}")]
    Rsn(#[from] RsnError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Form input rejected before reaching the API.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Product image could not be read.
    #[error("Failed to read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;

impl AdminError {
    /// Text to show the admin.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.user_message(),
            Self::Rsn(e) => e.to_string(),
            Self::NotFound(what) => format!("{what} not found!"),
            Self::BadRequest(message) => message.clone(),
            Self::Image { path, .. } => format!("Could not read image file {path}."),
        }
    }

    /// Report to Sentry when this is not a plain refusal.
    pub fn capture(&self) {
        let unexpected = match self {
            Self::Api(e) => e.status().is_none_or(|status| status >= 500),
            Self::Image { .. } => true,
            Self::Rsn(_) | Self::NotFound(_) | Self::BadRequest(_) => false,
        };

        if unexpected {
            let event_id = sentry::capture_error(self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin operation error"
            );
        } else {
            tracing::info!(error = %self, "Admin operation refused");
        }
    }
}
