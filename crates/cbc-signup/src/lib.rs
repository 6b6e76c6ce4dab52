//! # cbc-signup: Phase-Indexed Signup Record
//!
//! A signup flow modelled so that a record's fields are determined by its
//! phase, and a server-side check can only be claimed by holding the witness
//! the response parser issued for it.
//!
//! ## Modules
//!
//! - **Baseline** (`baseline.rs`): the id, browser and IP address every
//!   phase carries.
//!
//! - **Browser** (`browser.rs`): the closed set of known browsers plus an
//!   open fallback.
//!
//! - **Verification** (`verification/`): unchecked field types, the witness
//!   types `UniqueUsername`, `ConformantPassword` and `VerifiedEmailAddress`,
//!   and the response parser that alone can construct them.
//!
//! - **Record** (`record.rs`): the four phase structs, the `SignupRecord`
//!   union, and the transitions between phases.
//!
//! - **Form** (`form.rs`): the loose document shape, its legacy boolean
//!   validator, and the conversion into a record.
//!
//! ## Example
//!
//! ```
//! use cbc_core::IpAddress;
//! use cbc_signup::{Baseline, Browser, JustStarted, UncheckedFormData};
//!
//! let baseline = Baseline::new(Browser::Firefox, IpAddress::parse("127.0.0.1").unwrap());
//! let entered = JustStarted::new(baseline)
//!     .enter_form_data(UncheckedFormData::new("Hal", "tunnel", "hal@enfield.edu"));
//!
//! // The server names the password it checked by its SHA-256.
//! let checked = entered
//!     .apply_submission_check(
//!         br#"{
//!             "username": "Hal",
//!             "password_sha256": "94a35fdc30df7d129a447217f9ffade7e4917bdcc90460d7db2f0460c08c0e06",
//!             "username_unique": true,
//!             "password_conformant": true
//!         }"#,
//!     )
//!     .unwrap();
//! let complete = checked
//!     .apply_email_confirmation(br#"{"email":"hal@enfield.edu","verified":true}"#)
//!     .unwrap();
//!
//! assert_eq!(complete.username().as_str(), "Hal");
//! assert_eq!(complete.email().as_str(), "hal@enfield.edu");
//! ```
//!
//! A loose document cannot claim a checked phase:
//!
//! ```
//! use cbc_signup::{FormError, SignupForm, SignupRecord};
//!
//! let form: SignupForm = serde_json::from_value(serde_json::json!({
//!     "browser": "Firefox",
//!     "ipAddress": "127.0.0.1",
//!     "proposedUsername": "Hal Incandenza",
//!     "proposedPassword": "tunnel",
//!     "emailAddress": "hal@enfield.edu",
//!     "usernameIsUnique": true,
//!     "passwordMeetsPolicy": true,
//!     "phase": "serverCheckedSubmission"
//! }))
//! .unwrap();
//!
//! assert!(matches!(
//!     SignupRecord::try_from(form),
//!     Err(FormError::ForgedCheck { .. })
//! ));
//! ```

pub mod baseline;
pub mod browser;
pub mod form;
pub mod record;
pub mod verification;

// ─── Baseline re-exports ────────────────────────────────────────────

pub use baseline::{Baseline, SignupId};
pub use browser::Browser;

// ─── Record re-exports ──────────────────────────────────────────────

pub use record::{
    FormDataEntered, FullyComplete, JustStarted, Rejected, ServerCheckedSubmission, SignupError,
    SignupEvent, SignupPhase, SignupRecord, SignupState, UncheckedFormData,
};

// ─── Verification re-exports ────────────────────────────────────────

pub use verification::{
    ConformantPassword, FailedCheck, UncheckedEmailAddress, UncheckedPassword, UncheckedUsername,
    UniqueUsername, VerificationError, VerifiedEmailAddress,
};

// ─── Form re-exports ────────────────────────────────────────────────

pub use form::{is_valid_ip_address, is_valid_signup_form, FormError, SignupForm};
