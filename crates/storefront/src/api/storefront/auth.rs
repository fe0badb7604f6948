//! One-time-password login and profile lookup.

use everaura_core::{Email, Otp, UserProfile};
use reqwest::Method;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use serde_json::json;
use tracing::instrument;

use super::{StorefrontApi, with_bearer};
use crate::api::ApiError;

/// Successful OTP verification: a bearer token plus the user's profile.
#[derive(Deserialize)]
pub struct VerifiedLogin {
    #[serde(deserialize_with = "deserialize_token")]
    pub token: SecretString,
    pub user: UserProfile,
}

impl std::fmt::Debug for VerifiedLogin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerifiedLogin")
            .field("token", &"[REDACTED]")
            .field("user", &self.user)
            .finish()
    }
}

fn deserialize_token<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SecretString, D::Error> {
    String::deserialize(deserializer).map(SecretString::from)
}

impl StorefrontApi {
    /// Email a one-time password. Also used to resend one.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn send_otp(&self, email: &Email) -> Result<(), ApiError> {
        let url = self.rest().endpoint(&["auth", "send-otp"])?;
        let request = self
            .rest()
            .request(Method::POST, url)
            .json(&json!({ "email": email.as_str() }));

        self.rest().send_empty(request).await
    }

    /// Exchange an emailed one-time password for a session token.
    ///
    /// # Errors
    ///
    /// Returns an error if the code is rejected or the request fails.
    #[instrument(skip(self, otp), fields(email = %email))]
    pub async fn verify_otp(&self, email: &Email, otp: &Otp) -> Result<VerifiedLogin, ApiError> {
        let url = self.rest().endpoint(&["auth", "verify-otp"])?;
        let request = self
            .rest()
            .request(Method::POST, url)
            .json(&json!({ "email": email.as_str(), "otp": otp.as_str() }));

        self.rest().send_json(request).await
    }

    /// Fetch the logged-in user's saved profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the request fails.
    #[instrument(skip_all)]
    pub async fn me(&self, token: &SecretString) -> Result<UserProfile, ApiError> {
        let url = self.rest().endpoint(&["auth", "me"])?;
        let request = with_bearer(self.rest().request(Method::GET, url), token);

        self.rest().send_json(request).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_verified_login_debug_hides_token() {
        let login: VerifiedLogin = serde_json::from_str(
            r#"{"token":"eyJhbGciOi.secret","user":{"email":"asha@example.com","name":"Asha"}}"#,
        )
        .unwrap();
        assert_eq!(login.token.expose_secret(), "eyJhbGciOi.secret");
        assert_eq!(login.user.email, "asha@example.com");

        let debug = format!("{login:?}");
        assert!(!debug.contains("eyJhbGciOi"));
        assert!(debug.contains("REDACTED"));
    }
}
