//! Cookie string encoding for the cart.
//!
//! The cart lives in a cookie shaped exactly like the browser storefront's:
//!
//! ```text
//! cart=<percent-encoded JSON>; expires=Fri, 23 Oct 2026 10:00:00 GMT; path=/
//! ```

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use super::StorageError;

/// Name of the cart cookie.
pub const CART_COOKIE: &str = "cart";

/// How long a saved cart survives without being touched.
pub const CART_MAX_AGE_DAYS: i64 = 7;

/// `Date.prototype.toUTCString()` layout.
const EXPIRES_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A single `name=value` cookie with its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    /// Decoded value.
    pub value: String,
    pub expires: Option<DateTime<Utc>>,
    pub path: Option<String>,
}

impl Cookie {
    /// A root-path cookie expiring `max_age` after `now`.
    ///
    /// Expiry is truncated to whole seconds, the resolution of the header.
    #[must_use]
    pub fn new(name: &str, value: &str, now: DateTime<Utc>, max_age: Duration) -> Self {
        let expires = now + max_age;
        Self {
            name: name.to_string(),
            value: value.to_string(),
            expires: DateTime::from_timestamp(expires.timestamp(), 0),
            path: Some("/".to_string()),
        }
    }

    /// The cart cookie for a serialized cart.
    #[must_use]
    pub fn cart(json: &str, now: DateTime<Utc>) -> Self {
        Self::new(CART_COOKIE, json, now, Duration::days(CART_MAX_AGE_DAYS))
    }

    /// Whether the cookie has expired at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }

    /// Render as a `document.cookie` assignment string.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut out = format!("{}={}", self.name, urlencoding::encode(&self.value));
        if let Some(expires) = self.expires {
            out.push_str("; expires=");
            out.push_str(&expires.format(EXPIRES_FORMAT).to_string());
        }
        if let Some(path) = &self.path {
            out.push_str("; path=");
            out.push_str(path);
        }
        out
    }

    /// Parse a cookie string produced by [`Cookie::encode`] (or a browser).
    ///
    /// Unknown attributes are ignored.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Cookie` if the string has no `name=value`
    /// pair, the value is not valid percent-encoding, or `expires` is not
    /// a valid date.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        let mut parts = raw.split(';').map(str::trim);

        let (name, value) = parts
            .next()
            .and_then(|pair| pair.split_once('='))
            .ok_or_else(|| StorageError::Cookie(format!("missing name=value in {raw:?}")))?;
        let value = urlencoding::decode(value)
            .map_err(|e| StorageError::Cookie(format!("bad encoding: {e}")))?
            .into_owned();

        let mut cookie = Self {
            name: name.to_string(),
            value,
            expires: None,
            path: None,
        };

        for attribute in parts {
            let Some((key, val)) = attribute.split_once('=') else {
                continue;
            };
            if key.eq_ignore_ascii_case("expires") {
                let parsed = NaiveDateTime::parse_from_str(val, EXPIRES_FORMAT)
                    .map_err(|e| StorageError::Cookie(format!("bad expires {val:?}: {e}")))?;
                cookie.expires = Some(parsed.and_utc());
            } else if key.eq_ignore_ascii_case("path") {
                cookie.path = Some(val.to_string());
            }
        }

        Ok(cookie)
    }
}
