//! # Phase-Indexed Signup Record
//!
//! A signup moves through four phases. Each phase is its own struct holding
//! exactly the fields legal in that phase, and [`SignupRecord`] is the tagged
//! union over them.
//!
//! ## Phases
//!
//! | Phase                       | Fields beyond [`Baseline`]                                              |
//! |-----------------------------|-------------------------------------------------------------------------|
//! | [`JustStarted`]             | none                                                                    |
//! | [`FormDataEntered`]         | [`UncheckedFormData`] (raw username, password, email)                   |
//! | [`ServerCheckedSubmission`] | [`UniqueUsername`], [`ConformantPassword`], [`UncheckedEmailAddress`]   |
//! | [`FullyComplete`]           | [`UniqueUsername`], [`ConformantPassword`], [`VerifiedEmailAddress`]    |
//!
//! ## Allowed Transitions
//!
//! ```text
//! JustStarted ──enter_form_data()──▶ FormDataEntered
//!                                         │
//!                          apply_submission_check(body)
//!                                         │ (negative: stays, Rejected)
//!                                         ▼
//!                               ServerCheckedSubmission
//!                                         │
//!                          apply_email_confirmation(body)
//!                                         │ (negative: stays, Rejected)
//!                                         ▼
//!                                   FullyComplete
//! ```
//!
//! Transitions consume the current phase and return the next. There is no
//! method that goes backwards or skips a phase, and the later phases have no
//! public constructor, so a record in `ServerCheckedSubmission` can only have
//! come from a `FormDataEntered` record plus an affirmative server response.
//!
//! ## Compile-Time Safety Examples
//!
//! A record with raw form data does not become a server-checked one by
//! conversion; the only path is through a transition:
//!
//! ```compile_fail
//! use cbc_signup::{Baseline, Browser, FormDataEntered, ServerCheckedSubmission, UncheckedFormData};
//! use cbc_core::IpAddress;
//!
//! let baseline = Baseline::new(Browser::Firefox, IpAddress::parse("127.0.0.1").unwrap());
//! let entered = FormDataEntered::new(baseline, UncheckedFormData::new("Hal", "tunnel", "hal@enfield.edu"));
//! // ERROR: `From<FormDataEntered>` is not implemented for `ServerCheckedSubmission`
//! let checked: ServerCheckedSubmission = entered.into();
//! ```
//!
//! And an unchecked username is not accepted where the witness is required:
//!
//! ```compile_fail
//! use cbc_signup::{UncheckedUsername, UniqueUsername};
//!
//! fn register(username: UniqueUsername) -> String {
//!     username.as_str().to_string()
//! }
//!
//! // ERROR: mismatched types: expected `UniqueUsername`, found `UncheckedUsername`
//! register(UncheckedUsername::new("Hal"));
//! ```
//!
//! Nor can a transition be called from the wrong phase:
//!
//! ```compile_fail
//! use cbc_signup::{Baseline, Browser, JustStarted};
//! use cbc_core::IpAddress;
//!
//! let baseline = Baseline::new(Browser::Firefox, IpAddress::parse("127.0.0.1").unwrap());
//! let started = JustStarted::new(baseline);
//! // ERROR: no method named `apply_email_confirmation` found for `JustStarted`
//! let _ = started.apply_email_confirmation(br#"{"email":"x@y.z","verified":true}"#);
//! ```

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::baseline::{Baseline, SignupId};
use crate::verification::{
    parse_email_confirmation, parse_submission_check, ConformantPassword, EmailVerdict,
    FailedCheck, SubmissionVerdict, UncheckedEmailAddress, UncheckedPassword, UncheckedUsername,
    UniqueUsername, VerificationError, VerifiedEmailAddress,
};

// ─── Phase discriminant ─────────────────────────────────────────────

/// The phase of a signup record, without its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum SignupPhase {
    /// Browser metadata only.
    JustStarted,
    /// Raw form data entered.
    FormDataEntered,
    /// Username and password confirmed by the server.
    ServerCheckedSubmission,
    /// Email ownership confirmed (terminal).
    FullyComplete,
}

impl SignupPhase {
    /// All phases in order.
    pub const ALL: [SignupPhase; 4] = [
        Self::JustStarted,
        Self::FormDataEntered,
        Self::ServerCheckedSubmission,
        Self::FullyComplete,
    ];

    /// The canonical phase name (e.g., "FormDataEntered").
    pub fn name(self) -> &'static str {
        match self {
            Self::JustStarted => "JustStarted",
            Self::FormDataEntered => "FormDataEntered",
            Self::ServerCheckedSubmission => "ServerCheckedSubmission",
            Self::FullyComplete => "FullyComplete",
        }
    }

    /// The phase that follows this one, if any.
    pub fn next(self) -> Option<SignupPhase> {
        match self {
            Self::JustStarted => Some(Self::FormDataEntered),
            Self::FormDataEntered => Some(Self::ServerCheckedSubmission),
            Self::ServerCheckedSubmission => Some(Self::FullyComplete),
            Self::FullyComplete => None,
        }
    }

    /// Whether this phase is terminal.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::FullyComplete)
    }
}

impl fmt::Display for SignupPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─── Sealed phase trait ─────────────────────────────────────────────

mod private {
    pub trait Sealed {}
    impl Sealed for super::JustStarted {}
    impl Sealed for super::FormDataEntered {}
    impl Sealed for super::ServerCheckedSubmission {}
    impl Sealed for super::FullyComplete {}
}

/// Behaviour shared by the four phase structs.
///
/// Sealed: only the phases defined in this module implement it.
pub trait SignupState: private::Sealed + fmt::Debug + Into<SignupRecord> {
    /// This phase's discriminant.
    const PHASE: SignupPhase;

    /// The baseline fields.
    fn baseline(&self) -> &Baseline;

    /// The signup identifier.
    fn id(&self) -> SignupId {
        self.baseline().id()
    }
}

// ─── Errors ─────────────────────────────────────────────────────────

/// Why a record did not advance.
#[derive(Error, Debug)]
pub enum SignupError {
    /// The server reported one or more negative checks.
    #[error("signup checks not satisfied: {}", join_checks(.0))]
    CheckNotSatisfied(Vec<FailedCheck>),

    /// The server response could not be trusted.
    #[error(transparent)]
    Verification(#[from] VerificationError),

    /// The event does not apply to the record's current phase.
    #[error("event {event} does not apply to a record in phase {from}")]
    InvalidTransition {
        /// The record's phase.
        from: SignupPhase,
        /// The event that was applied.
        event: &'static str,
    },
}

fn join_checks(checks: &[FailedCheck]) -> String {
    checks
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A record that did not advance, returned unchanged with the reason.
///
/// The failure path is typed: a rejected `FormDataEntered` comes back as a
/// `Rejected<FormDataEntered>`, never as some intermediate shape.
#[derive(Debug)]
pub struct Rejected<R> {
    /// The record, in the phase it was in before the attempt.
    pub record: R,
    /// Why it did not advance.
    pub error: SignupError,
}

impl<R> Rejected<R> {
    /// Split into the record and the reason.
    pub fn into_parts(self) -> (R, SignupError) {
        (self.record, self.error)
    }

    /// Convert the carried record, keeping the reason.
    pub fn map_record<T>(self, f: impl FnOnce(R) -> T) -> Rejected<T> {
        Rejected {
            record: f(self.record),
            error: self.error,
        }
    }
}

impl<R> fmt::Display for Rejected<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "signup did not advance: {}", self.error)
    }
}

impl<R: fmt::Debug> std::error::Error for Rejected<R> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

// ─── Unchecked form data ────────────────────────────────────────────

/// The three raw fields a user submits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UncheckedFormData {
    proposed_username: UncheckedUsername,
    proposed_password: UncheckedPassword,
    email_address: UncheckedEmailAddress,
}

impl UncheckedFormData {
    /// Wrap raw form fields. No validation is performed.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            proposed_username: UncheckedUsername::new(username),
            proposed_password: UncheckedPassword::new(password),
            email_address: UncheckedEmailAddress::new(email),
        }
    }

    /// The proposed username.
    pub fn username(&self) -> &UncheckedUsername {
        &self.proposed_username
    }

    /// The proposed password.
    pub fn password(&self) -> &UncheckedPassword {
        &self.proposed_password
    }

    /// The entered email address.
    pub fn email(&self) -> &UncheckedEmailAddress {
        &self.email_address
    }
}

// ─── Phases ─────────────────────────────────────────────────────────

/// Phase 1: the browser has reported its metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JustStarted {
    #[serde(flatten)]
    baseline: Baseline,
}

/// Phase 2: the user has entered raw form data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormDataEntered {
    #[serde(flatten)]
    baseline: Baseline,
    #[serde(flatten)]
    form: UncheckedFormData,
}

/// Phase 3: the server has confirmed the username and password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCheckedSubmission {
    #[serde(flatten)]
    baseline: Baseline,
    username: UniqueUsername,
    password: ConformantPassword,
    email_address: UncheckedEmailAddress,
}

/// Phase 4 (terminal): the user has confirmed ownership of the email address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FullyComplete {
    #[serde(flatten)]
    baseline: Baseline,
    username: UniqueUsername,
    password: ConformantPassword,
    email_address: VerifiedEmailAddress,
}

impl SignupState for JustStarted {
    const PHASE: SignupPhase = SignupPhase::JustStarted;
    fn baseline(&self) -> &Baseline {
        &self.baseline
    }
}

impl SignupState for FormDataEntered {
    const PHASE: SignupPhase = SignupPhase::FormDataEntered;
    fn baseline(&self) -> &Baseline {
        &self.baseline
    }
}

impl SignupState for ServerCheckedSubmission {
    const PHASE: SignupPhase = SignupPhase::ServerCheckedSubmission;
    fn baseline(&self) -> &Baseline {
        &self.baseline
    }
}

impl SignupState for FullyComplete {
    const PHASE: SignupPhase = SignupPhase::FullyComplete;
    fn baseline(&self) -> &Baseline {
        &self.baseline
    }
}

fn log_advance<F: SignupState, T: SignupState>(record: &F) {
    tracing::debug!(
        signup_id = %record.id(),
        from = F::PHASE.name(),
        to = T::PHASE.name(),
        "signup phase advanced"
    );
}

fn log_rejection<F: SignupState>(record: &F, error: &SignupError) {
    tracing::info!(
        signup_id = %record.id(),
        phase = F::PHASE.name(),
        %error,
        "signup phase not advanced"
    );
}

// ─── Phase-specific impl blocks ─────────────────────────────────────

impl JustStarted {
    /// Start a signup from browser metadata.
    pub fn new(baseline: Baseline) -> Self {
        Self { baseline }
    }

    /// Attach the user's raw form data (JustStarted → FormDataEntered).
    ///
    /// Always succeeds; nothing is checked at this step.
    pub fn enter_form_data(self, form: UncheckedFormData) -> FormDataEntered {
        log_advance::<_, FormDataEntered>(&self);
        FormDataEntered {
            baseline: self.baseline,
            form,
        }
    }
}

impl FormDataEntered {
    /// A record with raw form data.
    ///
    /// Form data is unchecked, so there is nothing to forge here; the record
    /// may be built directly as well as through
    /// [`JustStarted::enter_form_data`].
    pub fn new(baseline: Baseline, form: UncheckedFormData) -> Self {
        Self { baseline, form }
    }

    /// The raw form data.
    pub fn form(&self) -> &UncheckedFormData {
        &self.form
    }

    /// Apply the server's submission check response
    /// (FormDataEntered → ServerCheckedSubmission).
    ///
    /// The username and password witnesses are issued by the response parser;
    /// the email address is carried forward unchecked.
    ///
    /// # Errors
    ///
    /// On a negative check, a malformed response, or a response about another
    /// username, returns the record unchanged inside [`Rejected`].
    pub fn apply_submission_check(
        self,
        body: &[u8],
    ) -> Result<ServerCheckedSubmission, Rejected<FormDataEntered>> {
        let verdict = match parse_submission_check(&self.form, body) {
            Ok(verdict) => verdict,
            Err(e) => return Err(self.reject(e.into())),
        };
        match verdict {
            SubmissionVerdict::Confirmed { username, password } => {
                log_advance::<_, ServerCheckedSubmission>(&self);
                Ok(ServerCheckedSubmission {
                    baseline: self.baseline,
                    username,
                    password,
                    email_address: self.form.email_address,
                })
            }
            SubmissionVerdict::Refused(failed) => {
                Err(self.reject(SignupError::CheckNotSatisfied(failed)))
            }
        }
    }

    fn reject(self, error: SignupError) -> Rejected<Self> {
        log_rejection(&self, &error);
        Rejected {
            record: self,
            error,
        }
    }
}

impl ServerCheckedSubmission {
    /// The server-confirmed username.
    pub fn username(&self) -> &UniqueUsername {
        &self.username
    }

    /// The server-confirmed password.
    pub fn password(&self) -> &ConformantPassword {
        &self.password
    }

    /// The email address, not yet confirmed by its owner.
    pub fn email(&self) -> &UncheckedEmailAddress {
        &self.email_address
    }

    /// Apply the email confirmation response
    /// (ServerCheckedSubmission → FullyComplete).
    ///
    /// # Errors
    ///
    /// On a negative confirmation, a malformed response, or a response about
    /// another address, returns the record unchanged inside [`Rejected`].
    pub fn apply_email_confirmation(
        self,
        body: &[u8],
    ) -> Result<FullyComplete, Rejected<ServerCheckedSubmission>> {
        let verdict = match parse_email_confirmation(&self.email_address, body) {
            Ok(verdict) => verdict,
            Err(e) => return Err(self.reject(e.into())),
        };
        match verdict {
            EmailVerdict::Confirmed(email_address) => {
                log_advance::<_, FullyComplete>(&self);
                Ok(FullyComplete {
                    baseline: self.baseline,
                    username: self.username,
                    password: self.password,
                    email_address,
                })
            }
            EmailVerdict::Refused(failed) => {
                Err(self.reject(SignupError::CheckNotSatisfied(vec![failed])))
            }
        }
    }

    fn reject(self, error: SignupError) -> Rejected<Self> {
        log_rejection(&self, &error);
        Rejected {
            record: self,
            error,
        }
    }
}

impl FullyComplete {
    /// The server-confirmed username.
    pub fn username(&self) -> &UniqueUsername {
        &self.username
    }

    /// The server-confirmed password.
    pub fn password(&self) -> &ConformantPassword {
        &self.password
    }

    /// The owner-confirmed email address.
    pub fn email(&self) -> &VerifiedEmailAddress {
        &self.email_address
    }

    /// Take the record apart for hand-off downstream.
    pub fn into_parts(self) -> (Baseline, UniqueUsername, ConformantPassword, VerifiedEmailAddress) {
        (self.baseline, self.username, self.password, self.email_address)
    }
}

// ─── SignupRecord ───────────────────────────────────────────────────

/// A signup record in any phase.
///
/// Serialized internally tagged by `phase`, with the baseline and phase
/// fields flattened alongside it:
///
/// ```
/// use cbc_core::IpAddress;
/// use cbc_signup::{Baseline, Browser, FormDataEntered, SignupRecord, UncheckedFormData};
///
/// let baseline = Baseline::new(Browser::Firefox, IpAddress::parse("127.0.0.1").unwrap());
/// let record: SignupRecord =
///     FormDataEntered::new(baseline, UncheckedFormData::new("Hal", "tunnel", "hal@enfield.edu"))
///         .into();
///
/// let json = serde_json::to_value(&record).unwrap();
/// assert_eq!(json["phase"], "FormDataEntered");
/// assert_eq!(json["proposedUsername"], "Hal");
/// assert_eq!(json["ipAddress"], "127.0.0.1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase")]
pub enum SignupRecord {
    /// See [`JustStarted`].
    JustStarted(JustStarted),
    /// See [`FormDataEntered`].
    FormDataEntered(FormDataEntered),
    /// See [`ServerCheckedSubmission`].
    ServerCheckedSubmission(ServerCheckedSubmission),
    /// See [`FullyComplete`].
    FullyComplete(FullyComplete),
}

/// An input that may advance a record by one phase.
#[derive(Debug, Clone)]
pub enum SignupEvent<'a> {
    /// The browser submitted raw form data.
    FormSubmitted(UncheckedFormData),
    /// The server answered the submission check with this body.
    SubmissionChecked(&'a [u8]),
    /// The email confirmation service answered with this body.
    EmailConfirmed(&'a [u8]),
}

impl SignupEvent<'_> {
    /// Event name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::FormSubmitted(_) => "FormSubmitted",
            Self::SubmissionChecked(_) => "SubmissionChecked",
            Self::EmailConfirmed(_) => "EmailConfirmed",
        }
    }

    /// The phase this event applies to.
    pub fn applies_to(&self) -> SignupPhase {
        match self {
            Self::FormSubmitted(_) => SignupPhase::JustStarted,
            Self::SubmissionChecked(_) => SignupPhase::FormDataEntered,
            Self::EmailConfirmed(_) => SignupPhase::ServerCheckedSubmission,
        }
    }
}

impl SignupRecord {
    /// The record's phase.
    pub fn phase(&self) -> SignupPhase {
        match self {
            Self::JustStarted(_) => SignupPhase::JustStarted,
            Self::FormDataEntered(_) => SignupPhase::FormDataEntered,
            Self::ServerCheckedSubmission(_) => SignupPhase::ServerCheckedSubmission,
            Self::FullyComplete(_) => SignupPhase::FullyComplete,
        }
    }

    /// The baseline fields.
    pub fn baseline(&self) -> &Baseline {
        match self {
            Self::JustStarted(r) => r.baseline(),
            Self::FormDataEntered(r) => r.baseline(),
            Self::ServerCheckedSubmission(r) => r.baseline(),
            Self::FullyComplete(r) => r.baseline(),
        }
    }

    /// The signup identifier.
    pub fn id(&self) -> SignupId {
        self.baseline().id()
    }

    /// Whether the record is in its terminal phase.
    pub fn is_terminal(&self) -> bool {
        self.phase().is_terminal()
    }

    /// Apply an event with runtime phase checking.
    ///
    /// Mirrors the per-phase transition methods for callers that hold a
    /// record whose phase is only known at runtime.
    ///
    /// # Errors
    ///
    /// Returns the record unchanged inside [`Rejected`] if the event does not
    /// belong to the record's phase ([`SignupError::InvalidTransition`]) or
    /// the transition itself is refused.
    pub fn advance(self, event: SignupEvent<'_>) -> Result<SignupRecord, Rejected<SignupRecord>> {
        match (self, event) {
            (Self::JustStarted(r), SignupEvent::FormSubmitted(form)) => {
                Ok(r.enter_form_data(form).into())
            }
            (Self::FormDataEntered(r), SignupEvent::SubmissionChecked(body)) => r
                .apply_submission_check(body)
                .map(Into::into)
                .map_err(|rejected| rejected.map_record(Into::into)),
            (Self::ServerCheckedSubmission(r), SignupEvent::EmailConfirmed(body)) => r
                .apply_email_confirmation(body)
                .map(Into::into)
                .map_err(|rejected| rejected.map_record(Into::into)),
            (record, event) => {
                let error = SignupError::InvalidTransition {
                    from: record.phase(),
                    event: event.name(),
                };
                tracing::warn!(signup_id = %record.id(), %error, "signup event rejected");
                Err(Rejected { record, error })
            }
        }
    }
}

/// Convert a phase struct into the [`SignupRecord`] union.
macro_rules! impl_into_signup_record {
    ($phase:ident) => {
        impl From<$phase> for SignupRecord {
            fn from(r: $phase) -> Self {
                SignupRecord::$phase(r)
            }
        }
    };
}

impl_into_signup_record!(JustStarted);
impl_into_signup_record!(FormDataEntered);
impl_into_signup_record!(ServerCheckedSubmission);
impl_into_signup_record!(FullyComplete);

// ─── Tests ──────────────────────────────────────────────────────────
