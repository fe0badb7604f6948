//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `EVERAURA_API_URL` - Base URL of the store API (default: <https://everaura-backend.vercel.app/api>)
//! - `EVERAURA_STATE_DIR` - Directory for cookies, durable and session storage (default: `.everaura`)
//! - `EVERAURA_SESSION_ID` - Name of the current browsing session (default: `default`)
//! - `EVERAURA_CATALOG_CACHE_TTL_SECS` - How long product listings are cached (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

/// Default store API base URL.
pub const DEFAULT_API_URL: &str = "https://everaura-backend.vercel.app/api";

const DEFAULT_STATE_DIR: &str = ".everaura";
const DEFAULT_SESSION_ID: &str = "default";
const DEFAULT_CACHE_TTL_SECS: u64 = 300;
const MAX_SESSION_ID_LENGTH: usize = 64;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront client configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Base URL of the store API
    pub api_url: Url,
    /// Directory holding cookie, durable and session storage
    pub state_dir: PathBuf,
    /// Current browsing session; session-scoped storage is kept per id
    pub session_id: String,
    /// How long product listings stay cached
    pub catalog_cache_ttl: Duration,
    pub sentry_dsn: Option<String>,
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Read the storefront configuration, loading `.env` first when one exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(
            "EVERAURA_API_URL",
            &var_or("EVERAURA_API_URL", DEFAULT_API_URL),
        )?;
        let state_dir = PathBuf::from(var_or("EVERAURA_STATE_DIR", DEFAULT_STATE_DIR));
        let session_id = var_or("EVERAURA_SESSION_ID", DEFAULT_SESSION_ID);
        validate_session_id(&session_id, "EVERAURA_SESSION_ID")?;
        let ttl_secs = var_or(
            "EVERAURA_CATALOG_CACHE_TTL_SECS",
            &DEFAULT_CACHE_TTL_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("EVERAURA_CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api_url,
            state_dir,
            session_id,
            catalog_cache_ttl: Duration::from_secs(ttl_secs),
            sentry_dsn: optional_var("SENTRY_DSN"),
            sentry_environment: optional_var("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration pointing at a given API, with everything else defaulted.
    ///
    /// Used by tests and embedders that do not read the environment.
    #[must_use]
    pub fn for_api(api_url: Url, state_dir: impl Into<PathBuf>) -> Self {
        Self {
            api_url,
            state_dir: state_dir.into(),
            session_id: DEFAULT_SESSION_ID.to_string(),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CACHE_TTL_SECS),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

/// Parse and validate the API base URL. Only http(s) URLs are accepted.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the value is not an http(s) URL.
pub fn parse_api_url(var_name: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(var_name.to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be an http(s) URL (got {value})"),
        ));
    }
    Ok(url)
}

/// Session ids become file names, so keep them to a safe alphabet.
fn validate_session_id(value: &str, var_name: &str) -> Result<(), ConfigError> {
    let valid = !value.is_empty()
        && value.len() <= MAX_SESSION_ID_LENGTH
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            format!("must be 1-{MAX_SESSION_ID_LENGTH} characters of [A-Za-z0-9_-]"),
        ))
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn var_or(name: &str, fallback: &str) -> String {
    optional_var(name).unwrap_or_else(|| fallback.to_string())
}
