//! Error types for configuration loading, schema handling, and diagnose runs.
//!
//! Per-rule execution failures are not errors here: they are recorded as
//! data on each `RuleResult` (see `doctor::ExecError`).

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown severity {0:?} (expected one of: debug, info, warn, error)")]
/// Severity text that does not map to a known level. Keeps the original input.
pub struct UnknownSeverity(pub String);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file {}: {source}", .path.display())]
    Inaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("config file {}: is a directory", .path.display())]
    IsDirectory { path: PathBuf },
    #[error("read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("parse config {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },
    #[error("config validation failed:\n{}", .errors.join("\n"))]
    Validation { errors: Vec<String> },
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("marshal schema: {0}")]
    Render(#[from] serde_json::Error),
    #[error("compile schema: {0}")]
    Compile(String),
}

#[derive(Debug, Error)]
pub enum DiagnoseError {
    #[error("no configuration supplied")]
    MissingConfig,
}
