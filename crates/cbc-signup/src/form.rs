//! # Loose Signup Documents
//!
//! The flat shape a signup arrives in from a browser or a fixture file: the
//! per-phase fields optional, the phase a free-form string, server checks as
//! booleans.
//! [`is_valid_signup_form`] is the boolean validator that shape needs;
//! [`SignupForm::into_record`] is the conversion boundary into
//! [`SignupRecord`], after which no validator is needed.
//!
//! Only the first two phases can be entered this way. A document claiming
//! `serverCheckedSubmission` or `fullyComplete` carries booleans, not
//! witnesses, and is refused as [`FormError::ForgedCheck`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use cbc_core::{IpAddress, IpPolicy, ValidationError};

use crate::baseline::Baseline;
use crate::record::{FormDataEntered, JustStarted, SignupPhase, SignupRecord, UncheckedFormData};

/// Phase names used by loose documents.
pub const JUST_STARTED: &str = "justStarted";
/// See [`JUST_STARTED`].
pub const FORM_DATA_ENTERED: &str = "formDataEntered";
/// See [`JUST_STARTED`].
pub const SERVER_CHECKED_SUBMISSION: &str = "serverCheckedSubmission";
/// See [`JUST_STARTED`].
pub const FULLY_COMPLETE: &str = "fullyComplete";

/// A signup document as a client would post it.
///
/// `browser`, `ipAddress` and `phase` are required; the rest are optional and
/// which of them may appear depends on `phase`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    /// Browser name; unknown names load as [`Browser::Other`](crate::Browser::Other).
    pub browser: String,
    /// Client IP address, checked under the conversion's [`IpPolicy`].
    pub ip_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_username: Option<String>,
    /// A claimed server check. Only meaningful in the checked phases, which
    /// cannot be loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username_is_unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed_password: Option<String>,
    /// See [`username_is_unique`](Self::username_is_unique).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_meets_policy: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    /// See [`username_is_unique`](Self::username_is_unique).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_verified: Option<bool>,
    /// One of the phase name constants in this module.
    pub phase: String,
}

/// Why a loose document could not become a [`SignupRecord`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormError {
    /// The IP address failed its refinement.
    #[error("invalid baseline: {0}")]
    InvalidBaseline(#[from] ValidationError),

    /// `phase` is not one of the four phase names.
    #[error("unknown signup phase {0:?}")]
    UnknownPhase(String),

    /// Server checks cannot be asserted by a document; they must come from
    /// the response parser.
    #[error("phase {phase} requires server-issued proof and cannot be loaded from a document")]
    ForgedCheck {
        /// The phase the document claimed.
        phase: String,
    },

    /// The document carries fields its phase forbids, or lacks ones it needs.
    #[error("fields do not match phase {phase}: {reason}")]
    FieldMismatch {
        /// The phase the document claimed.
        phase: String,
        /// Which fields were wrong.
        reason: &'static str,
    },
}

impl SignupForm {
    fn form_data_present(&self) -> bool {
        self.proposed_username.is_some()
            && self.proposed_password.is_some()
            && self.email_address.is_some()
    }

    fn form_data_absent(&self) -> bool {
        self.proposed_username.is_none()
            && self.proposed_password.is_none()
            && self.email_address.is_none()
    }

    fn server_checks_absent(&self) -> bool {
        self.username_is_unique.is_none() && self.password_meets_policy.is_none()
    }

    fn server_checks_succeeded(&self) -> bool {
        self.username_is_unique == Some(true) && self.password_meets_policy == Some(true)
    }

    fn mismatch(&self, reason: &'static str) -> FormError {
        FormError::FieldMismatch {
            phase: self.phase.clone(),
            reason,
        }
    }

    /// Convert to a [`SignupRecord`], validating the IP address under `policy`.
    ///
    /// # Errors
    ///
    /// - [`FormError::UnknownPhase`] for a phase name outside the four known.
    /// - [`FormError::ForgedCheck`] for the two phases that need witnesses.
    /// - [`FormError::FieldMismatch`] if fields from another phase are present
    ///   or required fields are missing.
    /// - [`FormError::InvalidBaseline`] if the IP address fails `policy`.
    pub fn into_record(self, policy: IpPolicy) -> Result<SignupRecord, FormError> {
        let phase = match self.phase.as_str() {
            JUST_STARTED => SignupPhase::JustStarted,
            FORM_DATA_ENTERED => SignupPhase::FormDataEntered,
            SERVER_CHECKED_SUBMISSION | FULLY_COMPLETE => {
                return Err(FormError::ForgedCheck {
                    phase: self.phase.clone(),
                })
            }
            _ => return Err(FormError::UnknownPhase(self.phase.clone())),
        };

        if !self.server_checks_absent() {
            return Err(self.mismatch("server check results present"));
        }
        if self.email_verified.is_some() {
            return Err(self.mismatch("email verification result present"));
        }

        let baseline = Baseline::parse(&self.browser, &self.ip_address, policy)?;

        match phase {
            SignupPhase::JustStarted => {
                if !self.form_data_absent() {
                    return Err(self.mismatch("form data present"));
                }
                Ok(JustStarted::new(baseline).into())
            }
            _ => match (self.proposed_username, self.proposed_password, self.email_address) {
                (Some(username), Some(password), Some(email)) => Ok(FormDataEntered::new(
                    baseline,
                    UncheckedFormData::new(username, password, email),
                )
                .into()),
                _ => Err(FormError::FieldMismatch {
                    phase: self.phase,
                    reason: "form data incomplete",
                }),
            },
        }
    }
}

impl TryFrom<SignupForm> for SignupRecord {
    type Error = FormError;

    /// Converts under [`IpPolicy::Strict`].
    fn try_from(form: SignupForm) -> Result<Self, Self::Error> {
        form.into_record(IpPolicy::Strict)
    }
}

/// Legacy IP check: an unanchored search for a dotted quad.
pub fn is_valid_ip_address(ip_address: &str) -> bool {
    IpAddress::parse_permissive(ip_address).is_ok()
}

/// Legacy boolean validator for loose signup documents.
///
/// Checks which fields are present for the claimed phase. It does not look
/// at the browser or IP address, and it accepts `serverCheckedSubmission`
/// and `fullyComplete` documents whose booleans say the checks passed.
pub fn is_valid_signup_form(form: &SignupForm) -> bool {
    match form.phase.as_str() {
        JUST_STARTED => {
            form.form_data_absent() && form.server_checks_absent() && form.email_verified.is_none()
        }
        FORM_DATA_ENTERED => {
            form.form_data_present() && form.server_checks_absent() && form.email_verified.is_none()
        }
        SERVER_CHECKED_SUBMISSION => {
            form.form_data_present()
                && form.server_checks_succeeded()
                && form.email_verified.is_none()
        }
        FULLY_COMPLETE => {
            form.form_data_present()
                && form.server_checks_succeeded()
                && form.email_verified == Some(true)
        }
        other => {
            tracing::warn!(phase = other, "unknown signup phase");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::Browser;

    fn hal(phase: &str) -> SignupForm {
        SignupForm {
            browser: "Firefox".into(),
            ip_address: "127.0.0.1".into(),
            proposed_username: Some("Hal Incandenza".into()),
            proposed_password: Some("tunnel".into()),
            email_address: Some("hal@enfield.edu".into()),
            phase: phase.into(),
            ..SignupForm::default()
        }
    }

    #[test]
    fn deserializes_camel_case() {
        let form: SignupForm = serde_json::from_value(serde_json::json!({
            "browser": "Firefox",
            "ipAddress": "127.0.0.1",
            "proposedUsername": "Hal Incandenza",
            "proposedPassword": "tunnel",
            "emailAddress": "hal@enfield.edu",
            "phase": "formDataEntered"
        }))
        .unwrap();
        assert_eq!(form, hal(FORM_DATA_ENTERED));
    }

    #[test]
    fn legacy_validator_good_and_bad() {
        assert!(is_valid_signup_form(&hal(FORM_DATA_ENTERED)));
        assert!(!is_valid_signup_form(&hal(SERVER_CHECKED_SUBMISSION)));
    }

    #[test]
    fn legacy_validator_accepts_asserted_checks() {
        let mut form = hal(FULLY_COMPLETE);
        form.username_is_unique = Some(true);
        form.password_meets_policy = Some(true);
        form.email_verified = Some(true);
        assert!(is_valid_signup_form(&form));
    }

    #[test]
    fn legacy_validator_unknown_phase() {
        assert!(!is_valid_signup_form(&hal("halfway")));
    }

    #[test]
    fn form_data_entered_converts() {
        let record = SignupRecord::try_from(hal(FORM_DATA_ENTERED)).unwrap();
        assert_eq!(record.phase(), SignupPhase::FormDataEntered);
        assert_eq!(record.baseline().browser(), &Browser::Firefox);
        let SignupRecord::FormDataEntered(entered) = record else {
            panic!("wrong phase");
        };
        assert_eq!(entered.form().username().as_str(), "Hal Incandenza");
    }

    #[test]
    fn just_started_converts() {
        let form = SignupForm {
            browser: "Chrome".into(),
            ip_address: "10.0.0.1".into(),
            phase: JUST_STARTED.into(),
            ..SignupForm::default()
        };
        let record = SignupRecord::try_from(form).unwrap();
        assert_eq!(record.phase(), SignupPhase::JustStarted);
    }

    #[test]
    fn asserted_checks_are_forgeries() {
        let mut form = hal(SERVER_CHECKED_SUBMISSION);
        form.username_is_unique = Some(true);
        form.password_meets_policy = Some(true);
        assert!(is_valid_signup_form(&form));
        assert_eq!(
            SignupRecord::try_from(form).unwrap_err(),
            FormError::ForgedCheck {
                phase: SERVER_CHECKED_SUBMISSION.into()
            }
        );
    }

    #[test]
    fn stray_fields_rejected() {
        let mut form = hal(FORM_DATA_ENTERED);
        form.username_is_unique = Some(true);
        assert!(matches!(
            SignupRecord::try_from(form),
            Err(FormError::FieldMismatch { .. })
        ));

        let mut form = hal(JUST_STARTED);
        form.email_address = None;
        assert!(matches!(
            SignupRecord::try_from(form),
            Err(FormError::FieldMismatch { reason: "form data present", .. })
        ));
    }

    #[test]
    fn incomplete_form_data_rejected() {
        let mut form = hal(FORM_DATA_ENTERED);
        form.proposed_password = None;
        assert!(matches!(
            SignupRecord::try_from(form),
            Err(FormError::FieldMismatch { reason: "form data incomplete", .. })
        ));
    }

    #[test]
    fn ip_policy_applies() {
        let mut form = hal(FORM_DATA_ENTERED);
        form.ip_address = "host 10.0.0.1 ok".into();
        assert!(matches!(
            form.clone().into_record(IpPolicy::Strict),
            Err(FormError::InvalidBaseline(ValidationError::MalformedIpAddress(_)))
        ));
        let record = form.into_record(IpPolicy::Permissive).unwrap();
        assert_eq!(record.baseline().ip_address().as_str(), "host 10.0.0.1 ok");
    }

    #[test]
    fn legacy_ip_check_is_unanchored() {
        assert!(is_valid_ip_address("127.0.0.1"));
        assert!(is_valid_ip_address("999.999.999.999"));
        assert!(is_valid_ip_address("host 10.0.0.1 ok"));
        assert!(!is_valid_ip_address("localhost"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_form() -> impl Strategy<Value = SignupForm> {
            let phase = prop_oneof![
                Just(JUST_STARTED.to_string()),
                Just(FORM_DATA_ENTERED.to_string()),
                Just(SERVER_CHECKED_SUBMISSION.to_string()),
                Just(FULLY_COMPLETE.to_string()),
                "[a-z]{1,8}",
            ];
            let ip = prop_oneof![Just("127.0.0.1".to_string()), "[0-9.a-z ]{0,16}"];
            (
                ip,
                proptest::option::of("[a-z]{1,6}"),
                proptest::option::of(any::<bool>()),
                proptest::option::of("[a-z]{1,6}"),
                proptest::option::of(any::<bool>()),
                proptest::option::of("[a-z]{1,6}@[a-z]{1,6}\\.edu"),
                proptest::option::of(any::<bool>()),
                phase,
            )
                .prop_map(|(ip, u, uu, p, pp, e, ev, phase)| SignupForm {
                    browser: "Firefox".into(),
                    ip_address: ip,
                    proposed_username: u,
                    username_is_unique: uu,
                    proposed_password: p,
                    password_meets_policy: pp,
                    email_address: e,
                    email_verified: ev,
                    phase,
                })
        }

        proptest! {
            #[test]
            fn conversion_implies_legacy_validity(form in arb_form()) {
                let legacy = is_valid_signup_form(&form);
                if form.clone().into_record(IpPolicy::Permissive).is_ok() {
                    prop_assert!(legacy);
                }
            }

            #[test]
            fn legacy_validity_implies_conversion_for_loadable_phases(form in arb_form()) {
                let loadable = form.phase == JUST_STARTED || form.phase == FORM_DATA_ENTERED;
                let ip_ok = IpAddress::parse(&form.ip_address).is_ok();
                if loadable && ip_ok && is_valid_signup_form(&form) {
                    prop_assert!(form.into_record(IpPolicy::Strict).is_ok());
                }
            }
        }
    }
}
