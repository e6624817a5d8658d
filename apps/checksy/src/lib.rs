//! Checksy core library.
//!
//! This crate exposes programmatic APIs for running workspace health checks
//! declared in a YAML or TOML config file and judging the outcome by severity.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Config file discovery, loading, and rule defaults.
//! - `doctor`: Rule filtering, shell execution, and report aggregation.
//! - `error`: Error types for config, schema, and diagnose failures.
//! - `logging`: `tracing` subscriber setup for the binary.
//! - `models`: Config, rule, and severity models.
//! - `output`: Human/JSON printers for reports.
//! - `schema`: JSON schema generation and validation.
//! - `utils`: Supporting helpers.
pub mod cli;
pub mod config;
pub mod doctor;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod schema;
pub mod utils;
