//! # Error Hierarchy
//!
//! Structured error types for the workspace, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Refinement failures carry the rejected input so that a caller can report
//! exactly what was wrong without re-deriving it.

use thiserror::Error;

/// Top-level error type for the correct-by-construction models.
#[derive(Error, Debug)]
pub enum CbcError {
    /// A raw value did not satisfy a refinement invariant.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Refinement failures for the value types in this crate.
///
/// Each variant corresponds to exactly one constructor. A constructor either
/// returns a value satisfying its invariant or one of these, never a
/// half-built instance.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Number outside the closed interval `[0, 1]` (NaN included).
    #[error("number out of range: {0} (expected 0 <= n <= 1)")]
    FractionOutOfRange(f64),

    /// String is not formatted as a dotted-quad IPv4 address.
    #[error("not formatted as IP address: \"{0}\"")]
    MalformedIpAddress(String),

    /// Unknown IP policy name.
    #[error("unknown IP policy: \"{0}\" (expected \"strict\" or \"permissive\")")]
    UnknownIpPolicy(String),

    /// String is not a plausible email address.
    #[error("invalid email address: \"{0}\" (expected local@domain.tld)")]
    InvalidEmailAddress(String),

    /// String is not a plausible phone number.
    #[error("invalid phone number: \"{0}\" (expected digits with optional + - ( ) . or spaces)")]
    InvalidPhoneNumber(String),

    /// Slug contains characters other than lowercase ASCII letters and `-`.
    #[error("invalid slug: \"{0}\" (expected ^[a-z-]+$)")]
    InvalidSlug(String),

    /// Timestamp string is not valid UTC RFC 3339.
    #[error("invalid timestamp: \"{value}\" ({reason})")]
    InvalidTimestamp {
        /// The string that failed to parse.
        value: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The end of an interval precedes its start.
    #[error("interval ends before it starts: {start} > {end}")]
    NegativeInterval {
        /// Start of the interval.
        start: String,
        /// End of the interval.
        end: String,
    },
}
