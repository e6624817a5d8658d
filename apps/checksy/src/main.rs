//! Checksy CLI binary entry point.
//! Loads the config, runs the diagnose engine, prints results, and maps the
//! outcome to an exit code.

use checksy::cli::{parse_severity_flag, Cli, Commands};
use checksy::doctor::{self, DiagnoseOptions};
use checksy::models::{Severity, DEFAULT_FAIL_SEVERITY};
use checksy::schema::{self, ConfigValidator};
use checksy::utils::{error_prefix, note_prefix};
use checksy::{config, output};
use clap::Parser;
use std::path::PathBuf;

/// All rules passed (or only rules below the fail severity failed).
const EXIT_OK: i32 = 0;
/// Operational problem: bad flags, missing or invalid config.
const EXIT_ERROR: i32 = 2;
/// At least one rule at or above the fail severity failed.
const EXIT_FAILURES: i32 = 3;

fn main() {
    let cli = Cli::parse();
    checksy::logging::init(cli.verbose);
    let code = match cli.cmd {
        Commands::Version => {
            println!("checksy {}", env!("CARGO_PKG_VERSION"));
            EXIT_OK
        }
        Commands::Schema { pretty } => match schema::render(pretty) {
            Ok(text) => {
                print!("{}", text);
                EXIT_OK
            }
            Err(e) => {
                eprintln!("{} failed to render schema: {}", error_prefix(), e);
                EXIT_ERROR
            }
        },
        Commands::Diagnose {
            config,
            min_severity,
            fail_severity,
            output,
        } => run_diagnose(
            config,
            min_severity.as_deref(),
            fail_severity.as_deref(),
            output.as_deref().unwrap_or("human"),
        ),
    };
    std::process::exit(code);
}

fn run_diagnose(
    config_path: Option<PathBuf>,
    min_severity: Option<&str>,
    fail_severity: Option<&str>,
    output: &str,
) -> i32 {
    if !output::is_known_output(output) {
        eprintln!(
            "{} --output: unknown mode {:?} (expected one of: {})",
            error_prefix(),
            output,
            output::OUTPUT_MODES.join(", ")
        );
        return EXIT_ERROR;
    }
    let min_severity = match parse_severity_flag(min_severity.unwrap_or("")) {
        Ok(sev) => sev,
        Err(e) => {
            eprintln!("{} --min-severity: {}", error_prefix(), e);
            return EXIT_ERROR;
        }
    };
    let fail_severity = match fail_severity.map(str::trim).filter(|s| !s.is_empty()) {
        None => DEFAULT_FAIL_SEVERITY,
        Some(raw) => match Severity::normalize(raw) {
            Ok(sev) => sev,
            Err(e) => {
                eprintln!("{} --fail-severity: {}", error_prefix(), e);
                return EXIT_ERROR;
            }
        },
    };
    // Rules that can fail the run must always be executed.
    let run_severity = Severity::min(min_severity, fail_severity);

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{} unable to resolve current directory: {}", error_prefix(), e);
            return EXIT_ERROR;
        }
    };
    let path = match config::resolve_path(config_path.as_deref(), &cwd) {
        Ok(Some(path)) => path,
        Ok(None) => {
            eprintln!(
                "{} no configuration file found; specify --config or add {} to the workspace",
                error_prefix(),
                config::CONFIG_CANDIDATES.join("/")
            );
            return EXIT_ERROR;
        }
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return EXIT_ERROR;
        }
    };
    let abs_path = if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    };

    let validator = match ConfigValidator::new() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("{} {}", error_prefix(), e);
            return EXIT_ERROR;
        }
    };
    let cfg = match config::load_with(&validator, &abs_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!(
                "{} failed to load config {}: {}",
                error_prefix(),
                abs_path.display(),
                e
            );
            return EXIT_ERROR;
        }
    };

    let report = match doctor::diagnose(DiagnoseOptions {
        config: Some(&cfg),
        work_dir: abs_path.parent().map(|p| p.to_path_buf()),
        min_severity: Some(run_severity),
        fail_severity: Some(fail_severity),
    }) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} diagnose failed: {}", error_prefix(), e);
            return EXIT_ERROR;
        }
    };

    if report.rules.is_empty() && output != "json" {
        eprintln!(
            "{} no rules at or above severity {} in {}",
            note_prefix(),
            run_severity,
            abs_path.display()
        );
    }
    if let Err(e) = output::print_report(&report, output) {
        eprintln!("{} failed to render report: {}", error_prefix(), e);
        return EXIT_ERROR;
    }

    if report.has_failures() {
        EXIT_FAILURES
    } else {
        EXIT_OK
    }
}
