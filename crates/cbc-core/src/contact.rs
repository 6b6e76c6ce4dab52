//! # Contact Details
//!
//! Email addresses and phone numbers. Real address grammars are far larger
//! than what is checked here; these types establish a plausible shape and,
//! more importantly, a distinct type, so that a raw `String` cannot be passed
//! where a checked address is expected.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// An email address of the shape `local@domain.tld`.
///
/// # Validation
///
/// - Exactly one `@`
/// - Non-empty local part
/// - Domain has at least two dot-separated labels, none empty
/// - No whitespace or control characters anywhere
///
/// The domain is stored with ASCII letters lowercased, since domain names are
/// case-insensitive; the local part is kept exactly as given.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create an email address, validating its shape.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidEmailAddress`] if the string is not
    /// of the form `local@domain.tld`.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !Self::is_plausible(&s) {
            return Err(ValidationError::InvalidEmailAddress(s));
        }
        match s.split_once('@') {
            Some((local, domain)) => Ok(Self(format!("{local}@{}", domain.to_ascii_lowercase()))),
            None => Err(ValidationError::InvalidEmailAddress(s)),
        }
    }

    fn is_plausible(s: &str) -> bool {
        if s.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return false;
        }
        let Some((local, domain)) = s.split_once('@') else {
            return false;
        };
        if local.is_empty() || domain.contains('@') {
            return false;
        }
        let labels: Vec<&str> = domain.split('.').collect();
        labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
    }

    /// Access the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `@`.
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map(|(l, _)| l).unwrap_or_default()
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or_default()
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<EmailAddress> for String {
    fn from(e: EmailAddress) -> Self {
        e.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A phone number as typed by a person.
///
/// Formats vary by country, so validation is intentionally lenient: after
/// trimming, the string must be non-empty, contain at least one digit, and
/// use only digits, spaces and `+ - ( ) .`. The trimmed form is stored.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Create a phone number, validating its character set.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPhoneNumber`] if the format is
    /// invalid.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')' | '.');
        if !trimmed.chars().any(|c| c.is_ascii_digit()) || !trimmed.chars().all(allowed) {
            return Err(ValidationError::InvalidPhoneNumber(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the phone number string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Just the digits, for comparison and dialing.
    pub fn digits(&self) -> String {
        self.0.chars().filter(|c| c.is_ascii_digit()).collect()
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PhoneNumber> for String {
    fn from(p: PhoneNumber) -> Self {
        p.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
