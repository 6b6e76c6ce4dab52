//! # Check Subcommand
//!
//! Loads a loose document, runs the legacy boolean validator over it, then
//! attempts the strict conversion. Exit code 0 when the strict conversion
//! succeeds, 1 when it does not.
//!
//! The two verdicts can disagree. A signup document that asserts its own
//! server checks passes the legacy validator but is refused by the strict
//! conversion; that disagreement is the point of the strict model.

use std::fmt::Display;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde::Serialize;

use cbc_model::{
    is_valid_course_status, is_valid_grading_policy, is_valid_shipping_info,
    is_valid_templated_email, CourseForm, CourseStatus, GradingForm, GradingPolicy, ShippingForm,
    ShippingInfo, TemplatedEmail, TemplatedEmailForm,
};
use cbc_signup::{is_valid_signup_form, SignupForm};

use crate::config::CliConfig;

/// Which kind of loose document to check.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    /// Shipping info: name plus home address or PO box with a phone.
    Shipping,
    /// Grading policy: curve, passing grade and late penalty.
    Grading,
    /// Course status: start, completion and grade.
    Course,
    /// Templated email: headers, body and recipients.
    Email,
    /// Signup document in one of the loadable phases.
    Signup,
}

/// Arguments for the `cbc check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Kind of document.
    #[arg(value_enum)]
    pub kind: DocumentKind,

    /// JSON or YAML file holding the document.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// The two verdicts on one document.
#[derive(Debug)]
pub struct CheckOutcome {
    /// What the legacy validator said.
    pub legacy_valid: bool,
    /// The strict value as JSON, or why conversion failed.
    pub strict: std::result::Result<serde_json::Value, String>,
}

impl CheckOutcome {
    fn new<S: Serialize, E: Display>(
        legacy_valid: bool,
        strict: std::result::Result<S, E>,
    ) -> Result<Self> {
        let strict = match strict {
            Ok(value) => Ok(serde_json::to_value(value)?),
            Err(e) => Err(e.to_string()),
        };
        Ok(Self {
            legacy_valid,
            strict,
        })
    }

    /// Whether the two verdicts agree.
    pub fn agrees(&self) -> bool {
        self.legacy_valid == self.strict.is_ok()
    }
}

/// Load and check one document.
pub fn check_document(kind: DocumentKind, path: &Path, config: &CliConfig) -> Result<CheckOutcome> {
    match kind {
        DocumentKind::Shipping => {
            let form: ShippingForm = crate::load_document(path)?;
            CheckOutcome::new(is_valid_shipping_info(&form), ShippingInfo::try_from(form))
        }
        DocumentKind::Grading => {
            let form: GradingForm = crate::load_document(path)?;
            CheckOutcome::new(is_valid_grading_policy(&form), GradingPolicy::try_from(form))
        }
        DocumentKind::Course => {
            let form: CourseForm = crate::load_document(path)?;
            CheckOutcome::new(is_valid_course_status(&form), CourseStatus::try_from(form))
        }
        DocumentKind::Email => {
            let form: TemplatedEmailForm = crate::load_document(path)?;
            CheckOutcome::new(is_valid_templated_email(&form), TemplatedEmail::try_from(form))
        }
        DocumentKind::Signup => {
            let form: SignupForm = crate::load_document(path)?;
            CheckOutcome::new(is_valid_signup_form(&form), form.into_record(config.ip_policy))
        }
    }
}

/// Execute the check subcommand.
///
/// Returns exit code: 0 if the strict conversion succeeds, 1 otherwise.
pub fn run_check(args: &CheckArgs, config: &CliConfig) -> Result<u8> {
    let outcome = check_document(args.kind, &args.file, config)?;

    if !outcome.agrees() {
        tracing::warn!(
            file = %args.file.display(),
            legacy_valid = outcome.legacy_valid,
            "legacy validator and strict model disagree"
        );
    }

    println!(
        "legacy: {}",
        if outcome.legacy_valid { "valid" } else { "invalid" }
    );
    match &outcome.strict {
        Ok(value) => {
            println!("strict: ok");
            println!("{}", crate::to_pretty_json(value)?);
            Ok(0)
        }
        Err(reason) => {
            println!("strict: rejected: {reason}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn shipping_good_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "shipping.yaml",
            "name: Avril Mondragon\nhomePhone: 555-4444\npoBox: Enfield Tennis Academy\n",
        );
        let outcome = check_document(DocumentKind::Shipping, &path, &CliConfig::default()).unwrap();
        assert!(outcome.legacy_valid);
        let strict = outcome.strict.unwrap();
        assert_eq!(strict["pickupInfo"]["tag"], "POBox");
    }

    #[test]
    fn grading_bad_document_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "grading.json",
            r#"{"curveMinimum":0.5,"curveMaximum":0.8,"passingGrade":0.9}"#,
        );
        let args = CheckArgs {
            kind: DocumentKind::Grading,
            file: path,
        };
        assert_eq!(run_check(&args, &CliConfig::default()).unwrap(), 1);
    }

    #[test]
    fn course_good_document_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "course.yaml", "startedAt: \"2026-01-15T12:00:00Z\"\n");
        let args = CheckArgs {
            kind: DocumentKind::Course,
            file: path,
        };
        assert_eq!(run_check(&args, &CliConfig::default()).unwrap(), 0);
    }

    #[test]
    fn email_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "email.json",
            r#"{"headerKeys":["Subject"],"headerValues":["Hi"],"body":"<p/>","recipients":["hal@enfield.edu"]}"#,
        );
        let outcome = check_document(DocumentKind::Email, &path, &CliConfig::default()).unwrap();
        assert!(outcome.agrees());
        assert!(outcome.strict.is_ok());
    }

    #[test]
    fn forged_signup_disagrees() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "signup.json",
            r#"{
                "browser": "Firefox",
                "ipAddress": "127.0.0.1",
                "proposedUsername": "Hal Incandenza",
                "proposedPassword": "tunnel",
                "emailAddress": "hal@enfield.edu",
                "usernameIsUnique": true,
                "passwordMeetsPolicy": true,
                "phase": "serverCheckedSubmission"
            }"#,
        );
        let outcome = check_document(DocumentKind::Signup, &path, &CliConfig::default()).unwrap();
        assert!(outcome.legacy_valid);
        assert!(outcome.strict.is_err());
        assert!(!outcome.agrees());
    }

    #[test]
    fn signup_respects_ip_policy() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            &dir,
            "signup.yaml",
            "browser: Firefox\nipAddress: 999.999.999.999\nphase: justStarted\n",
        );
        let strict = check_document(DocumentKind::Signup, &path, &CliConfig::default()).unwrap();
        assert!(strict.strict.is_err());

        let permissive = CliConfig {
            ip_policy: cbc_core::IpPolicy::Permissive,
        };
        let outcome = check_document(DocumentKind::Signup, &path, &permissive).unwrap();
        assert_eq!(outcome.strict.unwrap()["phase"], "JustStarted");
    }

    #[test]
    fn unparseable_document_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "grading.json", "not json");
        assert!(check_document(DocumentKind::Grading, &path, &CliConfig::default()).is_err());
    }
}
