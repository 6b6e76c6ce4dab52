//! # Server Response Parser
//!
//! The trusted kernel of the signup flow. These two functions read the
//! server's verification responses and are the only code that constructs
//! [`UniqueUsername`], [`ConformantPassword`] and [`VerifiedEmailAddress`].
//!
//! ## Wire Format
//!
//! Submission check (username uniqueness + password policy):
//!
//! ```json
//! {
//!   "username": "Hal",
//!   "password_sha256": "94a35fdc30df7d129a447217f9ffade7e4917bdcc90460d7db2f0460c08c0e06",
//!   "username_unique": true,
//!   "password_conformant": false,
//!   "password_violations": ["too short"]
//! }
//! ```
//!
//! Email confirmation:
//!
//! ```json
//! { "email": "hal@enfield.edu", "verified": true }
//! ```
//!
//! The response echoes the subject it checked: the username and email as
//! given, the password as the lowercase hex SHA-256 of its UTF-8 bytes. A
//! witness is only issued when the echoed subject is exactly the candidate
//! value, so a response about some other username or password cannot be used
//! to vouch for this one.

use serde::Deserialize;
use thiserror::Error;

use super::{
    ConformantPassword, UncheckedEmailAddress, UniqueUsername, VerifiedEmailAddress,
};
use crate::record::UncheckedFormData;

#[derive(Debug, Deserialize)]
struct SubmissionCheckResponse {
    username: String,
    password_sha256: String,
    username_unique: bool,
    password_conformant: bool,
    #[serde(default)]
    password_violations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct EmailConfirmationResponse {
    email: String,
    verified: bool,
}

/// A server-side check that came back negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedCheck {
    /// The username is already taken.
    UsernameTaken {
        /// The username that was checked.
        username: String,
    },
    /// The password does not meet the policy.
    PasswordNonConformant {
        /// Policy rules the password violated, as reported by the server.
        violations: Vec<String>,
    },
    /// The owner of the address has not confirmed it.
    EmailNotVerified {
        /// The address that was checked.
        email: String,
    },
}

impl std::fmt::Display for FailedCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UsernameTaken { username } => write!(f, "username {username:?} is taken"),
            Self::PasswordNonConformant { violations } if violations.is_empty() => {
                f.write_str("password does not meet policy")
            }
            Self::PasswordNonConformant { violations } => {
                write!(f, "password does not meet policy ({})", violations.join(", "))
            }
            Self::EmailNotVerified { email } => write!(f, "email {email:?} is not verified"),
        }
    }
}

/// Outcome of a well-formed submission check response.
#[derive(Debug, Clone)]
pub enum SubmissionVerdict {
    /// Both checks passed; the witnesses are attached.
    Confirmed {
        /// Proof of uniqueness.
        username: UniqueUsername,
        /// Proof of policy conformance.
        password: ConformantPassword,
    },
    /// At least one check failed. Lists every failed check.
    Refused(Vec<FailedCheck>),
}

/// Outcome of a well-formed email confirmation response.
#[derive(Debug, Clone)]
pub enum EmailVerdict {
    /// The owner confirmed the address.
    Confirmed(VerifiedEmailAddress),
    /// The address is not confirmed.
    Refused(FailedCheck),
}

/// A response that could not be trusted at all, as opposed to one that
/// reported a negative check.
#[derive(Error, Debug)]
pub enum VerificationError {
    /// The response body is not the expected JSON shape.
    #[error("malformed verification response: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The response is about a different value than the one being checked.
    #[error("verification response is about {field} {found:?}, expected {expected:?}")]
    SubjectMismatch {
        /// Which field was compared.
        field: &'static str,
        /// The candidate value.
        expected: String,
        /// The value the response echoed.
        found: String,
    },
}

/// Parse the server's submission check response for `form`.
///
/// # Errors
///
/// Returns [`VerificationError::Malformed`] if the body does not parse and
/// [`VerificationError::SubjectMismatch`] if it is about another username or
/// another password.
/// A well-formed negative response is `Ok(SubmissionVerdict::Refused(..))`.
pub fn parse_submission_check(
    form: &UncheckedFormData,
    body: &[u8],
) -> Result<SubmissionVerdict, VerificationError> {
    let response: SubmissionCheckResponse = serde_json::from_slice(body)?;

    if response.username != form.username().as_str() {
        return Err(VerificationError::SubjectMismatch {
            field: "username",
            expected: form.username().as_str().to_string(),
            found: response.username,
        });
    }

    let expected_digest = form.password().sha256_hex();
    if !response.password_sha256.eq_ignore_ascii_case(&expected_digest) {
        return Err(VerificationError::SubjectMismatch {
            field: "password",
            expected: expected_digest,
            found: response.password_sha256,
        });
    }

    let mut failed = Vec::new();
    if !response.username_unique {
        failed.push(FailedCheck::UsernameTaken {
            username: response.username.clone(),
        });
    }
    if !response.password_conformant {
        failed.push(FailedCheck::PasswordNonConformant {
            violations: response.password_violations,
        });
    }

    if !failed.is_empty() {
        return Ok(SubmissionVerdict::Refused(failed));
    }

    Ok(SubmissionVerdict::Confirmed {
        username: UniqueUsername(response.username),
        password: ConformantPassword(form.password().expose().to_string()),
    })
}

/// Parse the email confirmation response for `email`.
///
/// # Errors
///
/// Returns [`VerificationError::Malformed`] if the body does not parse and
/// [`VerificationError::SubjectMismatch`] if it is about another address.
/// A well-formed negative response is `Ok(EmailVerdict::Refused(..))`.
pub fn parse_email_confirmation(
    email: &UncheckedEmailAddress,
    body: &[u8],
) -> Result<EmailVerdict, VerificationError> {
    let response: EmailConfirmationResponse = serde_json::from_slice(body)?;

    if response.email != email.as_str() {
        return Err(VerificationError::SubjectMismatch {
            field: "email",
            expected: email.as_str().to_string(),
            found: response.email,
        });
    }

    if !response.verified {
        return Ok(EmailVerdict::Refused(FailedCheck::EmailNotVerified {
            email: response.email,
        }));
    }

    Ok(EmailVerdict::Confirmed(VerifiedEmailAddress(response.email)))
}
