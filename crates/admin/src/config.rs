//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `EVERAURA_ADMIN_KEY` - Shared secret sent as `X-ADMIN-KEY`
//!
//! ## Optional
//! - `EVERAURA_API_URL` - Base URL of the store API (default: <https://everaura-backend.vercel.app/api>)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::env;

use everaura_storefront::config::{ConfigError, DEFAULT_API_URL, parse_api_url};
use secrecy::SecretString;
use url::Url;

/// Environment variable holding the admin key.
pub const ADMIN_KEY_VAR: &str = "EVERAURA_ADMIN_KEY";

const MIN_KEY_LEN: usize = 16;
const MIN_BITS_PER_BYTE: f64 = 3.3;

/// Fragments that show up in copied `.env` templates.
const TEMPLATE_FRAGMENTS: [&str; 8] = [
    "admin-key",
    "changeme",
    "example",
    "placeholder",
    "replace",
    "secret",
    "your",
    "xxxx",
];

/// Admin client configuration.
#[derive(Clone)]
pub struct AdminConfig {
    pub api_url: Url,
    /// Grants full catalog, coupon, review and order control.
    pub admin_key: SecretString,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("api_url", &self.api_url.as_str())
            .field("admin_key", &"<hidden>")
            .field("sentry_dsn", &self.sentry_dsn.is_some())
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl AdminConfig {
    /// Read the admin configuration, loading `.env` first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the admin key is unset or looks weak, or the
    /// API URL is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = match non_empty_var("EVERAURA_API_URL") {
            Some(raw) => parse_api_url("EVERAURA_API_URL", &raw)?,
            None => parse_api_url("EVERAURA_API_URL", DEFAULT_API_URL)?,
        };

        let key = non_empty_var(ADMIN_KEY_VAR)
            .ok_or_else(|| ConfigError::MissingEnvVar(ADMIN_KEY_VAR.to_string()))?;
        check_admin_key(&key)
            .map_err(|reason| ConfigError::InsecureSecret(ADMIN_KEY_VAR.to_string(), reason))?;

        Ok(Self {
            api_url,
            admin_key: SecretString::from(key),
            sentry_dsn: non_empty_var("SENTRY_DSN"),
            sentry_environment: non_empty_var("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration for an explicit API and key. The key is taken as is.
    #[must_use]
    pub const fn new(api_url: Url, admin_key: SecretString) -> Self {
        Self {
            api_url,
            admin_key,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Refuse keys that are short, templated, or too repetitive to be random.
///
/// # Errors
///
/// Returns a human-readable reason when the key is refused.
pub fn check_admin_key(key: &str) -> Result<(), String> {
    if key.len() < MIN_KEY_LEN {
        return Err(format!("must be at least {MIN_KEY_LEN} characters"));
    }

    let lower = key.to_ascii_lowercase();
    if let Some(fragment) = TEMPLATE_FRAGMENTS.iter().find(|f| lower.contains(*f)) {
        return Err(format!("looks like a template value (contains '{fragment}')"));
    }

    let bits = bits_per_byte(key.as_bytes());
    if bits < MIN_BITS_PER_BYTE {
        return Err(format!(
            "too repetitive ({bits:.2} bits/char, want {MIN_BITS_PER_BYTE}); generate a random key"
        ));
    }
    Ok(())
}

/// Shannon entropy of the byte distribution.
#[allow(clippy::cast_precision_loss)]
fn bits_per_byte(bytes: &[u8]) -> f64 {
    if bytes.is_empty() {
        return 0.0;
    }
    let mut counts = [0_u32; 256];
    for &b in bytes {
        if let Some(slot) = counts.get_mut(usize::from(b)) {
            *slot += 1;
        }
    }
    let total = bytes.len() as f64;
    counts
        .iter()
        .filter(|&&n| n > 0)
        .map(|&n| {
            let p = f64::from(n) / total;
            -p * p.log2()
        })
        .sum()
}
