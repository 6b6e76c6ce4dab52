//! # Refine Subcommand
//!
//! Runs one raw value through a refinement constructor and prints the result,
//! or the reason it was refused.
//!
//! ```bash
//! cbc refine fraction 0.7
//! cbc refine ip 999.999.999.999 --permissive
//! ```

use anyhow::Result;
use clap::{Args, ValueEnum};

use cbc_core::{CbcError, EmailAddress, IpAddress, IpPolicy, PhoneNumber, ProperFraction, Slug};

use crate::config::CliConfig;

/// Which refinement to apply.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefinementKind {
    /// Dotted-quad IPv4 address, under the configured policy.
    Ip,
    /// Number between 0 and 1 inclusive.
    Fraction,
    /// Lowercase letters and hyphens.
    Slug,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

/// Arguments for the `cbc refine` subcommand.
#[derive(Args, Debug)]
pub struct RefineArgs {
    #[arg(value_enum)]
    pub kind: RefinementKind,

    /// The raw value.
    #[arg(value_name = "VALUE", allow_hyphen_values = true)]
    pub value: String,

    /// Use the permissive IP check (unanchored, octets unchecked).
    #[arg(long)]
    pub permissive: bool,
}

/// Apply a refinement, returning the refined value as JSON.
///
/// # Errors
///
/// [`CbcError::Validation`] if the value fails the refinement,
/// [`CbcError::Json`] if a fraction is not a number.
pub fn refine(kind: RefinementKind, raw: &str, policy: IpPolicy) -> Result<serde_json::Value, CbcError> {
    let refined = match kind {
        RefinementKind::Ip => serde_json::to_value(IpAddress::parse_with(raw, policy)?)?,
        RefinementKind::Fraction => {
            let n: f64 = serde_json::from_str(raw.trim())?;
            serde_json::to_value(ProperFraction::new(n)?)?
        }
        RefinementKind::Slug => serde_json::to_value(Slug::new(raw)?)?,
        RefinementKind::Email => serde_json::to_value(EmailAddress::parse(raw)?)?,
        RefinementKind::Phone => serde_json::to_value(PhoneNumber::new(raw)?)?,
    };
    Ok(refined)
}

/// Execute the refine subcommand.
///
/// Returns exit code: 0 if the value was accepted, 1 if refused.
pub fn run_refine(args: &RefineArgs, config: &CliConfig) -> Result<u8> {
    let policy = if args.permissive {
        IpPolicy::Permissive
    } else {
        config.ip_policy
    };
    if args.permissive && args.kind != RefinementKind::Ip {
        tracing::warn!(kind = ?args.kind, "--permissive only affects ip");
    }

    match refine(args.kind, &args.value, policy) {
        Ok(value) => {
            println!("{value}");
            Ok(0)
        }
        Err(e) => {
            println!("rejected: {e}");
            Ok(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cbc_core::ValidationError;

    #[test]
    fn ip_policies() {
        assert_eq!(
            refine(RefinementKind::Ip, "127.0.0.1", IpPolicy::Strict).unwrap(),
            serde_json::json!("127.0.0.1")
        );
        assert!(matches!(
            refine(RefinementKind::Ip, "999.999.999.999", IpPolicy::Strict),
            Err(CbcError::Validation(ValidationError::MalformedIpAddress(_)))
        ));
        assert_eq!(
            refine(RefinementKind::Ip, "host 10.0.0.1 ok", IpPolicy::Permissive).unwrap(),
            serde_json::json!("host 10.0.0.1 ok")
        );
    }

    #[test]
    fn fraction() {
        assert_eq!(
            refine(RefinementKind::Fraction, "0.25", IpPolicy::Strict).unwrap(),
            serde_json::json!(0.25)
        );
        assert!(matches!(
            refine(RefinementKind::Fraction, "1.5", IpPolicy::Strict),
            Err(CbcError::Validation(ValidationError::FractionOutOfRange(_)))
        ));
        assert!(matches!(
            refine(RefinementKind::Fraction, "half", IpPolicy::Strict),
            Err(CbcError::Json(_))
        ));
    }

    #[test]
    fn slug_email_phone() {
        assert!(refine(RefinementKind::Slug, "correct-by-construction", IpPolicy::Strict).is_ok());
        assert!(refine(RefinementKind::Slug, "ABC", IpPolicy::Strict).is_err());
        assert!(refine(RefinementKind::Email, "hal@enfield.edu", IpPolicy::Strict).is_ok());
        assert!(refine(RefinementKind::Email, "hal", IpPolicy::Strict).is_err());
        assert_eq!(
            refine(RefinementKind::Phone, " 555-4444 ", IpPolicy::Strict).unwrap(),
            serde_json::json!("555-4444")
        );
    }

    #[test]
    fn exit_codes() {
        let config = CliConfig::default();
        let ok = RefineArgs {
            kind: RefinementKind::Ip,
            value: "999.999.999.999".into(),
            permissive: true,
        };
        assert_eq!(run_refine(&ok, &config).unwrap(), 0);
        let refused = RefineArgs {
            permissive: false,
            ..ok
        };
        assert_eq!(run_refine(&refused, &config).unwrap(), 1);
    }
}
