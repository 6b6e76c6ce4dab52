//! # Verification: Unchecked Values and Their Witnesses
//!
//! Each raw signup field has two types:
//!
//! | Unchecked               | Witness                  | Proof                            |
//! |-------------------------|--------------------------|----------------------------------|
//! | [`UncheckedUsername`]   | [`UniqueUsername`]       | server confirmed uniqueness      |
//! | [`UncheckedPassword`]   | [`ConformantPassword`]   | server confirmed password policy |
//! | [`UncheckedEmailAddress`] | [`VerifiedEmailAddress`] | owner confirmed the address    |
//!
//! Unchecked types have public constructors: anyone may hold a raw value.
//! Witness types have none. Their fields are private to this module, and the
//! only code that builds them is the response parser in [`response`], a
//! child of this module. A boolean can be forged anywhere; a witness can only
//! come out of the parser, after it has read an affirmative server response
//! about that exact value.
//!
//! ## Compile-Time Safety
//!
//! Building a witness from outside this module does not compile:
//!
//! ```compile_fail
//! use cbc_signup::verification::UniqueUsername;
//!
//! // ERROR: cannot initialize a tuple struct which contains private fields
//! let forged = UniqueUsername("hal".to_string());
//! ```
//!
//! ```compile_fail
//! use cbc_signup::verification::{UncheckedEmailAddress, VerifiedEmailAddress};
//!
//! // ERROR: mismatched types; an unchecked address is not a verified one
//! let email: VerifiedEmailAddress = UncheckedEmailAddress::new("hal@enfield.edu");
//! ```
//!
//! Witnesses implement `Serialize` but never `Deserialize`, which would be a
//! second construction path.

pub mod response;

pub use response::{
    parse_email_confirmation, parse_submission_check, EmailVerdict, FailedCheck,
    SubmissionVerdict, VerificationError,
};

use serde::{Serialize, Serializer};
use sha2::{Digest, Sha256};

const REDACTED: &str = "[REDACTED]";

// ─── Unchecked values ───────────────────────────────────────────────

/// A username as proposed by the user. No checks performed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UncheckedUsername(String);

impl UncheckedUsername {
    /// Wrap a proposed username.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the username string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A password as proposed by the user. No checks performed.
///
/// `Debug` and `Serialize` redact the value; use [`expose`](Self::expose)
/// to read it.
#[derive(Clone, PartialEq, Eq)]
pub struct UncheckedPassword(String);

impl UncheckedPassword {
    /// Wrap a proposed password.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Read the secret.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Lowercase hex SHA-256 of the password, the form in which the
    /// submission check response names the password it checked.
    pub fn sha256_hex(&self) -> String {
        Sha256::digest(self.0.as_bytes())
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl std::fmt::Debug for UncheckedPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("UncheckedPassword").field(&REDACTED).finish()
    }
}

impl Serialize for UncheckedPassword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// An email address as entered by the user. Ownership not yet confirmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UncheckedEmailAddress(String);

impl UncheckedEmailAddress {
    /// Wrap an entered email address.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Access the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// ─── Witnesses ──────────────────────────────────────────────────────

/// A username the server has confirmed is not taken.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UniqueUsername(String);

impl UniqueUsername {
    /// Access the username string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Forget the proof.
    pub fn to_unchecked(&self) -> UncheckedUsername {
        UncheckedUsername(self.0.clone())
    }
}

/// A password the server has confirmed meets the password policy.
///
/// `Debug` and `Serialize` redact the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ConformantPassword(String);

impl ConformantPassword {
    /// Read the secret.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ConformantPassword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ConformantPassword").field(&REDACTED).finish()
    }
}

impl Serialize for ConformantPassword {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

/// An email address whose owner has confirmed it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct VerifiedEmailAddress(String);

impl VerifiedEmailAddress {
    /// Access the address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Forget the proof.
    pub fn to_unchecked(&self) -> UncheckedEmailAddress {
        UncheckedEmailAddress(self.0.clone())
    }
}
