//! # IP Addresses
//!
//! [`IpAddress`] is a string known to be formatted as a dotted-quad IPv4
//! address. Two validation policies exist:
//!
//! - [`IpPolicy::Strict`] (the default): the *whole* string must be four
//!   dot-separated groups of 1–3 ASCII digits, each no greater than 255.
//! - [`IpPolicy::Permissive`]: the string must merely *contain* a
//!   `d{1,3}.d{1,3}.d{1,3}.d{1,3}` run anywhere, bounded by ASCII word
//!   boundaries (only ASCII letters, digits and `_` count as word
//!   characters). Octet values
//!   are not range-checked, so `"999.999.999.999"` and
//!   `"client 10.0.0.1 via proxy"` both pass. This is the historical
//!   behaviour of the exercise's `validIpAddress` check and is kept under an
//!   explicit name so that nobody relies on it by accident.
//!
//! In both cases the raw input is stored unchanged.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ASCII word boundaries and digits: a non-ASCII letter next to the quad
// does not hide it.
static EMBEDDED_QUAD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u:\b)[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}(?-u:\b)")
        .expect("static pattern compiles")
});

/// Which IP address check to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IpPolicy {
    /// Anchored dotted quad with octets in `0..=255`.
    #[default]
    Strict,
    /// Unanchored search for a dotted-quad-looking run.
    Permissive,
}

impl IpPolicy {
    /// The policy's configuration name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
        }
    }
}

impl std::str::FromStr for IpPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            _ => Err(ValidationError::UnknownIpPolicy(s.to_string())),
        }
    }
}

impl std::fmt::Display for IpPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A string validated as a dotted-quad IPv4 address.
///
/// Obtainable only through [`IpAddress::parse`],
/// [`IpAddress::parse_permissive`] or [`IpAddress::parse_with`].
/// Deserialization applies the strict policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IpAddress(String);

impl IpAddress {
    /// Parse under [`IpPolicy::Strict`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedIpAddress`] unless the whole string
    /// is four dot-separated decimal groups of 1–3 digits, each `<= 255`.
    pub fn parse(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if strict_octets(&s).is_none() {
            return Err(ValidationError::MalformedIpAddress(s));
        }
        Ok(Self(s))
    }

    /// Parse under [`IpPolicy::Permissive`].
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MalformedIpAddress`] if no word-bounded
    /// dotted-quad run occurs anywhere in the string.
    pub fn parse_permissive(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if !EMBEDDED_QUAD.is_match(&s) {
            return Err(ValidationError::MalformedIpAddress(s));
        }
        Ok(Self(s))
    }

    /// Parse under the given policy.
    pub fn parse_with(value: impl Into<String>, policy: IpPolicy) -> Result<Self, ValidationError> {
        match policy {
            IpPolicy::Strict => Self::parse(value),
            IpPolicy::Permissive => Self::parse_permissive(value),
        }
    }

    /// The raw string as supplied.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The four octets, when the raw string is a strict dotted quad.
    ///
    /// Always `Some` for addresses built with [`IpAddress::parse`]; may be
    /// `None` for permissively parsed input.
    pub fn octets(&self) -> Option<[u8; 4]> {
        strict_octets(&self.0)
    }
}

/// Split `s` into four decimal octets, or `None` if it is not a strict quad.
fn strict_octets(s: &str) -> Option<[u8; 4]> {
    let mut octets = [0u8; 4];
    let mut parts = s.split('.');
    for slot in octets.iter_mut() {
        let part = parts.next()?;
        if part.is_empty() || part.len() > 3 || !part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        *slot = part.parse::<u8>().ok()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(octets)
}

impl TryFrom<String> for IpAddress {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<IpAddress> for String {
    fn from(ip: IpAddress) -> Self {
        ip.0
    }
}

impl std::fmt::Display for IpAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- strict --

    #[test]
    fn strict_accepts_loopback() {
        let ip = IpAddress::parse("127.0.0.1").unwrap();
        assert_eq!(ip.as_str(), "127.0.0.1");
        assert_eq!(ip.octets(), Some([127, 0, 0, 1]));
    }

    #[test]
    fn strict_rejects_out_of_range_octets() {
        assert_eq!(
            IpAddress::parse("999.999.999.999"),
            Err(ValidationError::MalformedIpAddress("999.999.999.999".into()))
        );
        assert!(IpAddress::parse("256.0.0.1").is_err());
    }

    #[test]
    fn strict_rejects_embedded_quad() {
        assert!(IpAddress::parse("client 10.0.0.1 via proxy").is_err());
        assert!(IpAddress::parse(" 10.0.0.1").is_err());
    }

    #[test]
    fn strict_rejects_wrong_shapes() {
        for bad in ["", "1.2.3", "1.2.3.4.5", "1..3.4", "1.2.3.", "a.b.c.d", "1234.1.1.1", "+1.2.3.4"] {
            assert!(IpAddress::parse(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn strict_accepts_leading_zeros_within_width() {
        let ip = IpAddress::parse("010.001.000.255").unwrap();
        assert_eq!(ip.octets(), Some([10, 1, 0, 255]));
    }

    // -- permissive --

    #[test]
    fn permissive_accepts_loopback() {
        assert_eq!(IpAddress::parse_permissive("127.0.0.1").unwrap().as_str(), "127.0.0.1");
    }

    #[test]
    fn permissive_accepts_out_of_range_octets() {
        let ip = IpAddress::parse_permissive("999.999.999.999").unwrap();
        assert_eq!(ip.as_str(), "999.999.999.999");
        assert_eq!(ip.octets(), None);
    }

    #[test]
    fn permissive_accepts_embedded_quad() {
        let ip = IpAddress::parse_permissive("client 10.0.0.1 via proxy").unwrap();
        assert_eq!(ip.as_str(), "client 10.0.0.1 via proxy");
    }

    #[test]
    fn permissive_ignores_non_ascii_neighbours() {
        for raw in ["é10.0.0.1", "10.0.0.1é", "адрес10.0.0.1", "٣10.0.0.1"] {
            let ip = IpAddress::parse_permissive(raw).unwrap();
            assert_eq!(ip.as_str(), raw);
        }
        assert!(IpAddress::parse("é10.0.0.1").is_err());
    }

    #[test]
    fn permissive_still_needs_ascii_boundary() {
        assert!(IpAddress::parse_permissive("x10.0.0.1").is_err());
        assert!(IpAddress::parse_permissive("10.0.0.1_").is_err());
    }

    #[test]
    fn permissive_rejects_without_quad() {
        assert!(IpAddress::parse_permissive("localhost").is_err());
        assert!(IpAddress::parse_permissive("1.2.3").is_err());
        assert!(IpAddress::parse_permissive("1234.1.1.1234").is_err());
    }

    // -- policy --

    #[test]
    fn parse_with_dispatches_on_policy() {
        assert!(IpAddress::parse_with("999.1.1.1", IpPolicy::Strict).is_err());
        assert!(IpAddress::parse_with("999.1.1.1", IpPolicy::Permissive).is_ok());
    }

    #[test]
    fn policy_from_str() {
        assert_eq!("strict".parse::<IpPolicy>().unwrap(), IpPolicy::Strict);
        assert_eq!(" Permissive ".parse::<IpPolicy>().unwrap(), IpPolicy::Permissive);
        assert!("lenient".parse::<IpPolicy>().is_err());
        assert_eq!(IpPolicy::default(), IpPolicy::Strict);
    }

    #[test]
    fn policy_serde_lowercase() {
        assert_eq!(serde_json::to_string(&IpPolicy::Permissive).unwrap(), "\"permissive\"");
    }

    // -- serde --

    #[test]
    fn serde_is_strict() {
        let ok: IpAddress = serde_json::from_str("\"192.168.1.20\"").unwrap();
        assert_eq!(ok.as_str(), "192.168.1.20");
        let bad: Result<IpAddress, _> = serde_json::from_str("\"999.999.999.999\"");
        assert!(bad.is_err());
    }
}
