//! # Browser
//!
//! The browser a signup started from. The major browsers are enumerated so
//! that every consumer matches on them exhaustively; adding or dropping
//! support for one is then a compile-guided refactor. Anything else falls
//! into [`Browser::Other`] with its name preserved.
//!
//! Every variant serializes as its name, so a record's `browser` field is
//! always a plain string. Deserializing classifies the name again, which means
//! an `Other("firefox")` built by hand comes back as [`Browser::Firefox`].

use std::convert::Infallible;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A known browser, or the name of an unknown one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Browser {
    /// Google Chrome.
    Chrome,
    /// Mozilla Firefox.
    Firefox,
    /// Apple Safari.
    Safari,
    /// Microsoft Edge.
    Edge,
    /// Any other browser, by name.
    Other(String),
}

impl Browser {
    /// Classify a browser name, ignoring ASCII case and surrounding
    /// whitespace. Unknown names become [`Browser::Other`] as given.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "chrome" => Self::Chrome,
            "firefox" => Self::Firefox,
            "safari" => Self::Safari,
            "edge" => Self::Edge,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Chrome => "Chrome",
            Self::Firefox => "Firefox",
            Self::Safari => "Safari",
            Self::Edge => "Edge",
            Self::Other(name) => name,
        }
    }

    /// Whether this is one of the enumerated browsers.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for Browser {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for Browser {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<Browser> for String {
    fn from(b: Browser) -> Self {
        match b {
            Browser::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl std::fmt::Display for Browser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
