//! # Slugs
//!
//! A URL slug of lowercase ASCII letters and hyphens. The check runs in the
//! constructor; there is no way to hold a `Slug` that has not been checked,
//! so there is nothing to "validate later".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

static SLUG_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z-]+$").expect("static pattern compiles"));

/// A non-empty string matching `^[a-z-]+$`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    /// Create a slug.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidSlug`] if the string is empty or
    /// contains anything besides `a`–`z` and `-`.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !SLUG_PATTERN.is_match(&s) {
            return Err(ValidationError::InvalidSlug(s));
        }
        Ok(Self(s))
    }

    /// Access the slug string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Slug {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(s: Slug) -> Self {
        s.0
    }
}

impl std::fmt::Display for Slug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lowercase_and_hyphens() {
        assert_eq!(Slug::new("infinite-jest").unwrap().as_str(), "infinite-jest");
        assert!(Slug::new("-").is_ok());
    }

    #[test]
    fn rejects_uppercase() {
        assert_eq!(Slug::new("ABC"), Err(ValidationError::InvalidSlug("ABC".into())));
    }

    #[test]
    fn rejects_other_characters() {
        for bad in ["", "a b", "a_b", "abc1", "café", "abc\n"] {
            assert!(Slug::new(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn serde_validates() {
        assert!(serde_json::from_str::<Slug>("\"course-intro\"").is_ok());
        assert!(serde_json::from_str::<Slug>("\"Course\"").is_err());
    }
}
