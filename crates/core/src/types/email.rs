//! Shopper email addresses, the login identity for OTP sign-in.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Why a login email was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EmailError {
    #[error("email cannot be empty")]
    Empty,
    #[error("email is longer than {0} characters")]
    TooLong(usize),
    #[error("email cannot contain spaces")]
    Whitespace,
    /// Not exactly one `@` with text on both sides.
    #[error("email must look like name@domain")]
    Shape,
    /// Domain has no `host.tld` form.
    #[error("email domain must include a top-level domain")]
    NoTld,
}

/// A syntactically valid `local@domain.tld` address.
///
/// This is the same check the login form makes before asking the store to
/// send an OTP. Deliverability is the store's business.
///
/// ```
/// use everaura_core::Email;
///
/// let email = Email::parse("asha@everaura.in").unwrap();
/// assert_eq!(email.domain(), "everaura.in");
/// assert!(Email::parse("asha@localhost").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Longest address accepted (RFC 5321 path limit).
    pub const MAX_LEN: usize = 254;

    /// Validate `input` as a login email.
    ///
    /// # Errors
    ///
    /// Returns the first [`EmailError`] that applies, checked in declaration
    /// order.
    pub fn parse(input: &str) -> Result<Self, EmailError> {
        if input.is_empty() {
            return Err(EmailError::Empty);
        }
        if input.len() > Self::MAX_LEN {
            return Err(EmailError::TooLong(Self::MAX_LEN));
        }
        if input.contains(char::is_whitespace) {
            return Err(EmailError::Whitespace);
        }

        let (local, domain) = input.split_once('@').ok_or(EmailError::Shape)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(EmailError::Shape);
        }

        let has_tld = domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
        if !has_tld {
            return Err(EmailError::NoTld);
        }

        Ok(Self(input.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Everything after the `@`.
    #[must_use]
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map_or("", |(_, domain)| domain)
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Email {
    type Err = EmailError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn accepts_typical_shopper_addresses() {
        for ok in [
            "asha@everaura.in",
            "asha.rao+gifts@mail.example.co.uk",
            "a@b.c",
        ] {
            assert!(Email::parse(ok).is_ok(), "{ok} should parse");
        }
    }

    #[test]
    fn rejects_with_the_first_matching_reason() {
        let cases = [
            ("", EmailError::Empty),
            ("asha rao@everaura.in", EmailError::Whitespace),
            ("asha.everaura.in", EmailError::Shape),
            ("@everaura.in", EmailError::Shape),
            ("asha@", EmailError::Shape),
            ("asha@shop@everaura.in", EmailError::Shape),
            ("asha@localhost", EmailError::NoTld),
            ("asha@everaura.", EmailError::NoTld),
            ("asha@.in", EmailError::NoTld),
        ];
        for (input, expected) in cases {
            assert_eq!(Email::parse(input).unwrap_err(), expected, "{input:?}");
        }
    }

    #[test]
    fn rejects_overlong_addresses() {
        let long = format!("{}@everaura.in", "a".repeat(250));
        assert_eq!(
            Email::parse(&long).unwrap_err(),
            EmailError::TooLong(Email::MAX_LEN)
        );
    }

    #[test]
    fn serializes_as_a_plain_string() {
        let email: Email = "asha@everaura.in".parse().unwrap();
        assert_eq!(email.domain(), "everaura.in");
        assert_eq!(email.to_string(), "asha@everaura.in");
        assert_eq!(
            serde_json::to_string(&email).unwrap(),
            "\"asha@everaura.in\""
        );
    }
}
