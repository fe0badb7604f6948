//! One-time password type for email login.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing an [`Otp`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum OtpError {
    /// The input string is empty.
    #[error("OTP cannot be empty")]
    Empty,
    /// The input is not exactly six ASCII digits.
    #[error("OTP must be {len} digits")]
    InvalidFormat {
        /// Required number of digits.
        len: usize,
    },
}

/// A six-digit login code sent by email.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Otp(String);

impl Otp {
    /// Number of digits in a code.
    pub const LENGTH: usize = 6;

    /// Parse an OTP, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not exactly six digits.
    pub fn parse(s: &str) -> Result<Self, OtpError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(OtpError::Empty);
        }
        if s.len() != Self::LENGTH || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(OtpError::InvalidFormat { len: Self::LENGTH });
        }
        Ok(Self(s.to_owned()))
    }

    /// The code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Codes are short-lived credentials; keep them out of logs.
impl fmt::Debug for Otp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Otp([REDACTED])")
    }
}

impl std::str::FromStr for Otp {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Otp::parse("012345").unwrap().as_str(), "012345");
        assert_eq!(Otp::parse(" 987654 ").unwrap().as_str(), "987654");
    }

    #[test]
    fn test_parse_invalid() {
        assert_eq!(Otp::parse(""), Err(OtpError::Empty));
        assert_eq!(Otp::parse("12345"), Err(OtpError::InvalidFormat { len: 6 }));
        assert_eq!(Otp::parse("1234567"), Err(OtpError::InvalidFormat { len: 6 }));
        assert_eq!(Otp::parse("12a456"), Err(OtpError::InvalidFormat { len: 6 }));
    }

    #[test]
    fn test_debug_redacts() {
        let otp = Otp::parse("123456").unwrap();
        assert!(!format!("{otp:?}").contains("123456"));
    }
}
