//! # Signup Subcommand
//!
//! Loads a loose signup document as a record, then applies the inputs given,
//! in phase order: the raw form data, the server's submission check, then
//! the email confirmation. Prints the record in whatever phase it reached.
//!
//! Only `justStarted` and `formDataEntered` documents load. A `justStarted`
//! record needs `--form-data` before any response applies to it; later
//! phases must be reached by applying responses here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Deserialize;

use cbc_signup::{SignupEvent, SignupForm, SignupRecord, UncheckedFormData};

use crate::config::CliConfig;

/// Arguments for the `cbc signup` subcommand.
#[derive(Args, Debug)]
pub struct SignupArgs {
    /// Loose signup document (JSON or YAML).
    #[arg(long, value_name = "FILE")]
    pub form: PathBuf,

    /// Raw form fields to enter into a `justStarted` record (JSON or YAML
    /// with `proposedUsername`, `proposedPassword` and `emailAddress`).
    #[arg(long, value_name = "FILE")]
    pub form_data: Option<PathBuf>,

    /// Body of the server's username/password check response.
    #[arg(long, value_name = "FILE")]
    pub submission_response: Option<PathBuf>,

    /// Body of the email confirmation response.
    #[arg(long, value_name = "FILE")]
    pub email_confirmation: Option<PathBuf>,
}

/// Where a signup run ended.
#[derive(Debug)]
pub struct SignupOutcome {
    /// The record after every applicable input.
    pub record: SignupRecord,
    /// Why the last input did not advance it, if one did not.
    pub rejection: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct FormDataFile {
    proposed_username: String,
    proposed_password: String,
    email_address: String,
}

impl From<FormDataFile> for UncheckedFormData {
    fn from(f: FormDataFile) -> Self {
        UncheckedFormData::new(f.proposed_username, f.proposed_password, f.email_address)
    }
}

fn read_body(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read response: {}", path.display()))
}

/// Build the record and apply the inputs. Stops at the first input that
/// does not advance the record.
pub fn drive_signup(args: &SignupArgs, config: &CliConfig) -> Result<SignupOutcome> {
    let form: SignupForm = crate::load_document(&args.form)?;
    let mut record = form
        .into_record(config.ip_policy)
        .with_context(|| format!("cannot load signup document: {}", args.form.display()))?;

    tracing::info!(signup_id = %record.id(), phase = %record.phase(), "signup loaded");

    let form_data = args
        .form_data
        .as_deref()
        .map(crate::load_document::<FormDataFile>)
        .transpose()?;
    let submission = args.submission_response.as_deref().map(read_body).transpose()?;
    let confirmation = args.email_confirmation.as_deref().map(read_body).transpose()?;

    let events = form_data
        .map(|data| SignupEvent::FormSubmitted(data.into()))
        .into_iter()
        .chain(submission.as_deref().map(SignupEvent::SubmissionChecked))
        .chain(confirmation.as_deref().map(SignupEvent::EmailConfirmed));

    for event in events {
        match record.advance(event) {
            Ok(next) => record = next,
            Err(rejected) => {
                let (unchanged, error) = rejected.into_parts();
                return Ok(SignupOutcome {
                    record: unchanged,
                    rejection: Some(error.to_string()),
                });
            }
        }
    }

    Ok(SignupOutcome {
        record,
        rejection: None,
    })
}

/// Execute the signup subcommand.
///
/// Returns exit code: 0 if every given input advanced the record, 1 if one
/// did not.
pub fn run_signup(args: &SignupArgs, config: &CliConfig) -> Result<u8> {
    let outcome = drive_signup(args, config)?;
    println!("{}", crate::to_pretty_json(&outcome.record)?);
    match outcome.rejection {
        None => Ok(0),
        Some(reason) => {
            println!("not advanced: {reason}");
            Ok(1)
        }
    }
}
