//! # Temporal Types: UTC Timestamps and Elapsed Time
//!
//! [`Timestamp`] is a UTC instant truncated to whole seconds. [`ElapsedTime`]
//! is a non-negative span of whole seconds.
//!
//! The pair supports the "start plus positive duration" encoding: instead of
//! storing a start and an end and checking `start <= end` everywhere, store
//! the start and an [`ElapsedTime`], which cannot be negative. The only way
//! to derive an `ElapsedTime` from two timestamps is
//! [`Timestamp::elapsed_until`], which refuses to go backwards.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A UTC-only timestamp, truncated to seconds precision.
///
/// Serialized as `YYYY-MM-DDTHH:MM:SSZ`. Parsing rejects explicit offsets,
/// including `+00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current UTC time, truncated.
    pub fn now() -> Self {
        Self::from_utc(Utc::now())
    }

    /// From a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt.with_nanosecond(0).unwrap_or(dt))
    }

    /// Parse an RFC 3339 string with a `Z` suffix.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidTimestamp`] if the string is not
    /// RFC 3339 or does not end in `Z`.
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        if !s.ends_with('Z') {
            return Err(ValidationError::InvalidTimestamp {
                value: s.to_string(),
                reason: "must use Z suffix (UTC only)".to_string(),
            });
        }
        let dt = DateTime::parse_from_rfc3339(s).map_err(|e| ValidationError::InvalidTimestamp {
            value: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_utc(dt.with_timezone(&Utc)))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Render as ISO 8601 with Z suffix (e.g., `2026-01-15T12:00:00Z`).
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }

    /// The span from `self` to `later`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NegativeInterval`] if `later` precedes
    /// `self`.
    pub fn elapsed_until(&self, later: &Timestamp) -> Result<ElapsedTime, ValidationError> {
        let secs = later.0.timestamp() - self.0.timestamp();
        u64::try_from(secs)
            .map(ElapsedTime)
            .map_err(|_| ValidationError::NegativeInterval {
                start: self.to_iso8601(),
                end: later.to_iso8601(),
            })
    }

    /// `self` moved forward by `elapsed`, saturating at chrono's maximum.
    pub fn advanced_by(&self, elapsed: ElapsedTime) -> Timestamp {
        let secs = i64::try_from(elapsed.0).unwrap_or(i64::MAX);
        let advanced = Duration::try_seconds(secs)
            .and_then(|d| self.0.checked_add_signed(d))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        Self::from_utc(advanced)
    }
}

impl TryFrom<String> for Timestamp {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_iso8601()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

/// A non-negative span of whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElapsedTime(u64);

impl ElapsedTime {
    /// A span of `secs` seconds.
    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Length in seconds.
    pub fn as_secs(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn from_utc_truncates() {
        let dt = Utc.with_ymd_and_hms(2026, 1, 15, 12, 30, 45).unwrap();
        let ts = Timestamp::from_utc(dt.with_nanosecond(123_456_789).unwrap());
        assert_eq!(ts.as_datetime().nanosecond(), 0);
        assert_eq!(ts.to_iso8601(), "2026-01-15T12:30:45Z");
    }

    #[test]
    fn now_has_no_subseconds() {
        assert_eq!(Timestamp::now().as_datetime().nanosecond(), 0);
    }

    #[test]
    fn parse_z_suffix_accepted() {
        let ts = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        assert_eq!(ts.to_string(), "2026-01-15T12:00:00Z");
    }

    #[test]
    fn parse_offsets_rejected() {
        assert!(Timestamp::parse("2026-01-15T12:00:00+00:00").is_err());
        assert!(Timestamp::parse("2026-01-15T17:00:00+05:00").is_err());
    }

    #[test]
    fn parse_garbage_rejected() {
        assert!(Timestamp::parse("not-a-dateZ").is_err());
        assert!(Timestamp::parse("").is_err());
    }

    #[test]
    fn elapsed_forward() {
        let start = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let end = Timestamp::parse("2026-01-15T13:00:30Z").unwrap();
        assert_eq!(start.elapsed_until(&end).unwrap().as_secs(), 3630);
        assert_eq!(start.elapsed_until(&start).unwrap(), ElapsedTime::from_secs(0));
    }

    #[test]
    fn elapsed_backward_rejected() {
        let start = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let end = Timestamp::parse("2026-01-15T11:59:59Z").unwrap();
        assert!(matches!(
            start.elapsed_until(&end),
            Err(ValidationError::NegativeInterval { .. })
        ));
    }

    #[test]
    fn advanced_by_inverts_elapsed() {
        let start = Timestamp::parse("2026-01-15T12:00:00Z").unwrap();
        let end = Timestamp::parse("2026-03-01T08:15:00Z").unwrap();
        let span = start.elapsed_until(&end).unwrap();
        assert_eq!(start.advanced_by(span), end);
    }

    #[test]
    fn serde_uses_iso8601() {
        let ts = Timestamp::parse("2026-06-30T23:59:59Z").unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"2026-06-30T23:59:59Z\"");
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ts);
        assert!(serde_json::from_str::<Timestamp>("\"2026-06-30T23:59:59+02:00\"").is_err());
    }
}
