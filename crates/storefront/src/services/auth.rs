//! Email one-time-password login.

use everaura_core::{Email, EmailError, Otp, OtpError, UserProfile};
use tracing::instrument;

use super::{refusal, require_token};
use crate::api::StorefrontApi;
use crate::error::{Result, StorefrontError, clear_sentry_user, set_sentry_user};
use crate::storage::ClientStorage;

/// Where to send the shopper after logging in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginRedirect {
    /// The cart has items; carry on to checkout.
    Checkout,
    /// Nothing to buy; show past orders.
    MyOrders,
}

/// Login, logout and profile lookup.
pub struct AuthService<'a> {
    api: &'a StorefrontApi,
    storage: &'a ClientStorage,
}

impl<'a> AuthService<'a> {
    #[must_use]
    pub const fn new(api: &'a StorefrontApi, storage: &'a ClientStorage) -> Self {
        Self { api, storage }
    }

    /// Validate the address and email a login code to it. Resending is the
    /// same call.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` for a malformed address, or an
    /// API error if the request fails.
    #[instrument(skip(self))]
    pub async fn send_otp(&self, email: &str) -> Result<Email> {
        let email = parse_email(email)?;
        self.api.send_otp(&email).await?;
        Ok(email)
    }

    /// Exchange a login code for a session, and say where to go next.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Validation` for a malformed address or
    /// code, or if the API refuses the code.
    #[instrument(skip(self, otp))]
    pub async fn verify_otp(&self, email: &str, otp: &str) -> Result<LoginRedirect> {
        let email = parse_email(email)?;
        let otp = Otp::parse(otp).map_err(|e| {
            StorefrontError::Validation(
                match e {
                    OtpError::Empty => "Please enter your OTP.",
                    OtpError::InvalidFormat { .. } => "OTP must be 6 digits.",
                }
                .to_string(),
            )
        })?;

        let login = self
            .api
            .verify_otp(&email, &otp)
            .await
            .map_err(|e| refusal(e, "Failed to verify OTP"))?;

        self.storage.set_auth_token(&login.token)?;
        self.storage.set_user(&login.user)?;
        set_sentry_user(&login.user.email);
        tracing::info!("Shopper logged in");

        if self.storage.cart()?.is_empty() {
            Ok(LoginRedirect::MyOrders)
        } else {
            Ok(LoginRedirect::Checkout)
        }
    }

    /// Fetch the logged-in user's profile from the API.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::NotLoggedIn` without a token, or an API
    /// error if the request fails.
    pub async fn me(&self) -> Result<UserProfile> {
        let token = require_token(self.storage)?;
        Ok(self.api.me(&token).await?)
    }

    /// The profile cached at login, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        Ok(self.storage.user()?)
    }

    /// Whether a login token is stored.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn is_logged_in(&self) -> Result<bool> {
        Ok(self.storage.auth_token()?.is_some())
    }

    /// Forget the token and cached profile.
    ///
    /// # Errors
    ///
    /// Returns an error if storage fails.
    pub fn logout(&self) -> Result<()> {
        self.storage.clear_login()?;
        clear_sentry_user();
        Ok(())
    }
}

fn parse_email(email: &str) -> Result<Email> {
    Email::parse(email.trim()).map_err(|e| {
        StorefrontError::Validation(
            match e {
                EmailError::Empty => "Please enter an email address.",
                _ => "Please enter a valid email address.",
            }
            .to_string(),
        )
    })
}
