//! Contact form.

use everaura_core::ContactMessage;
use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;

use super::StorefrontApi;
use crate::api::ApiError;

/// Response to `POST /contact`.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl StorefrontApi {
    /// Send a contact form message.
    ///
    /// The message only counts as sent when the API answers 2xx *and*
    /// reports `success: true`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Rejected` when the API answers 2xx without
    /// success, or another error if the request fails.
    #[instrument(skip_all, fields(email = %message.email))]
    pub async fn send_contact(&self, message: &ContactMessage) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["contact"])?;
        let request = self.rest().request(Method::POST, url).json(message);

        let response: ContactResponse = self.rest().send_json(request).await?;
        if response.success {
            Ok(())
        } else {
            Err(ApiError::Rejected(
                response
                    .error
                    .unwrap_or_else(|| "Failed to send message.".to_string()),
            ))
        }
    }
}
