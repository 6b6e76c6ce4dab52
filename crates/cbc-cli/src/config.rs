//! CLI configuration.
//!
//! Sources, highest precedence first:
//!
//! 1. `CBC_IP_POLICY` environment variable (`strict` or `permissive`)
//! 2. the YAML or JSON file given by `--config`
//! 3. defaults (strict IP checking)

use std::path::{Path, PathBuf};

use serde::Deserialize;

use cbc_core::{IpPolicy, ValidationError};

/// Environment variable overriding the IP policy.
pub const IP_POLICY_ENV: &str = "CBC_IP_POLICY";

/// Settings shared by all subcommands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// How client IP addresses in signup documents are checked.
    pub ip_policy: IpPolicy,
}

impl CliConfig {
    /// Resolve configuration from the optional file and the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(std::env::var(IP_POLICY_ENV).ok().as_deref())?;
        tracing::debug!(ip_policy = %config.ip_policy, "configuration resolved");
        Ok(config)
    }

    /// Read a configuration file. `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let parsed = if path.extension().is_some_and(|e| e.eq_ignore_ascii_case("json")) {
            serde_json::from_str(&content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(&content).map_err(|e| e.to_string())
        };
        parsed.map_err(|reason| ConfigError::Parse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Apply the value of [`IP_POLICY_ENV`], if set.
    fn apply_env(&mut self, ip_policy: Option<&str>) -> Result<(), ConfigError> {
        if let Some(raw) = ip_policy {
            self.ip_policy = raw.parse().map_err(|source| ConfigError::InvalidEnv {
                var: IP_POLICY_ENV,
                source,
            })?;
        }
        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config file {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },
    #[error("invalid value for {var}: {source}")]
    InvalidEnv {
        var: &'static str,
        source: ValidationError,
    },
}
