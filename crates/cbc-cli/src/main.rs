//! # cbc CLI entry point
//!
//! Parses command-line arguments, resolves configuration, and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use cbc_cli::check::{run_check, CheckArgs};
use cbc_cli::config::CliConfig;
use cbc_cli::refine::{run_refine, RefineArgs};
use cbc_cli::signup::{run_signup, SignupArgs};

/// Correct-by-construction model toolkit.
///
/// Checks loose documents against their strict models, runs single
/// refinements, and drives signup records through their phases.
#[derive(Parser, Debug)]
#[command(name = "cbc", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check a loose document with its legacy validator and strict model.
    Check(CheckArgs),

    /// Apply one refinement to a raw value.
    Refine(RefineArgs),

    /// Load a signup document and apply server responses.
    Signup(SignupArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };

    let result = match cli.command {
        Commands::Check(args) => run_check(&args, &config),
        Commands::Refine(args) => run_refine(&args, &config),
        Commands::Signup(args) => run_signup(&args, &config),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}
