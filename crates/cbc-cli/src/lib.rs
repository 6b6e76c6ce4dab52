//! # cbc-cli: Command-Line Interface for the Correct-by-Construction Models
//!
//! Provides the `cbc` binary. Handlers live in this library so they can be
//! tested without spawning a process; each returns an exit code.
//!
//! ## Subcommands
//!
//! - `cbc check`: run a loose document through its legacy validator and its
//!   strict conversion.
//! - `cbc refine`: construct a single refinement type from a raw value.
//! - `cbc signup`: load a signup document and apply server responses.
//!
//! ```bash
//! cbc check shipping order.yaml
//! cbc refine ip "host 10.0.0.1 ok" --permissive
//! cbc signup --form hal.json --submission-response check.json
//! ```

pub mod check;
pub mod config;
pub mod refine;
pub mod signup;

use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Read a JSON or YAML document. Files ending in `.json` are parsed as JSON,
/// everything else as YAML.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))
    } else {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))
    }
}

/// Render a value as pretty JSON for stdout.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to serialize output")
}
