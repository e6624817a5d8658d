//! CLI argument parsing via `clap`.

use crate::error::UnknownSeverity;
use crate::models::Severity;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "checksy",
    version,
    about = "checksy - inspect and troubleshoot development environments",
    long_about = "checksy runs the shell checks declared in .checksy.yaml (or .yml/.toml) from the workspace root and reports which ones fail.\n\nExit codes: 0 all rules passed, 3 a rule at or above the fail severity failed, 2 operational error.",
    after_help = "Examples:\n  checksy diagnose\n  checksy diagnose --config ci/checks.yaml --fail-severity warn\n  checksy diagnose --min-severity info --output json\n  checksy schema --pretty",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(long, short, global = true, action = clap::ArgAction::SetTrue, help = "Enable debug logging on stderr")]
    pub verbose: bool,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Run configured rules
    #[command(
        about = "Validate the workspace using config-defined rules",
        long_about = "Run every rule at or above --min-severity in the config file's directory. Failures of rules at or above --fail-severity make the command exit with status 3.",
        after_help = "Examples:\n  checksy diagnose --config .checksy.yaml\n  checksy diagnose --fail-severity warn"
    )]
    Diagnose {
        #[arg(long, help = "Path to config file (default: .checksy.yaml|.yml|.toml)")]
        config: Option<PathBuf>,
        #[arg(long, help = "Lowest severity to run: debug|info|warn|error (default: debug)")]
        min_severity: Option<String>,
        #[arg(long, help = "Lowest severity whose failure fails the run (default: error)")]
        fail_severity: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print the config JSON schema
    #[command(
        about = "Print the JSON schema for workspace configuration",
        long_about = "Print the JSON schema that config files are validated against."
    )]
    Schema {
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Pretty-print the JSON schema")]
        pretty: bool,
    },
    /// Show version
    #[command(about = "Print the current build version")]
    Version,
}

/// Parse a severity flag value. An empty value means `debug`.
pub fn parse_severity_flag(raw: &str) -> Result<Severity, UnknownSeverity> {
    if raw.trim().is_empty() {
        return Ok(Severity::Debug);
    }
    Severity::normalize(raw)
}
