//! Diagnose engine: filter rules by severity, run each check in the shell,
//! and aggregate the outcomes into a `Report`.
//!
//! Two thresholds are involved and they stay independent:
//! - `min_severity` decides which rules run at all.
//! - `fail_severity` decides which failing rules count against the run.
//!
//! A rule below `fail_severity` still runs and reports its output, it just
//! cannot make the run fail.

use crate::error::DiagnoseError;
use crate::models::{Config, Rule, Severity, DEFAULT_FAIL_SEVERITY};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use thiserror::Error;
use tracing::{debug, info_span, warn};

/// Interpreter used for rule checks unless a runner says otherwise.
pub const DEFAULT_SHELL: &str = "bash";

#[derive(Debug, Error)]
/// Why a single check did not succeed.
pub enum ExecError {
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to collect output from {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },
    #[error("{}", describe_exit(.code))]
    Exit { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {}", c),
        None => "terminated by signal".to_string(),
    }
}

/// Raw outcome of one script execution.
#[derive(Debug, Default)]
pub struct ScriptOutput {
    pub err: Option<ExecError>,
    pub stdout: String,
    pub stderr: String,
}

/// Executes a check script in a working directory.
///
/// `ShellRunner` is the real implementation; tests substitute fakes so the
/// filtering and aggregation logic can be exercised without subprocesses.
pub trait ScriptRunner {
    fn run(&self, script: &str, work_dir: &Path) -> ScriptOutput;
}

/// Feeds scripts to a shell interpreter on stdin.
///
/// The whole body goes to the interpreter, so multi-line scripts, pipes, and
/// builtins all work. An empty body runs `true`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    program: String,
}

impl Default for ShellRunner {
    fn default() -> Self {
        Self::new(DEFAULT_SHELL)
    }
}

impl ShellRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

fn prepare_script(script: &str) -> String {
    let mut body = if script.trim().is_empty() {
        "true".to_string()
    } else {
        script.to_string()
    };
    if !body.ends_with('\n') {
        body.push('\n');
    }
    body
}

impl ScriptRunner for ShellRunner {
    fn run(&self, script: &str, work_dir: &Path) -> ScriptOutput {
        let body = prepare_script(script);
        let mut child = match Command::new(&self.program)
            .current_dir(work_dir)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(source) => {
                return ScriptOutput {
                    err: Some(ExecError::Spawn {
                        program: self.program.clone(),
                        source,
                    }),
                    ..Default::default()
                }
            }
        };

        // Write stdin from a separate thread while output pipes are drained.
        let writer = child.stdin.take().map(|mut stdin| {
            thread::spawn(move || stdin.write_all(body.as_bytes()))
        });

        let waited = child.wait_with_output();

        if let Some(handle) = writer {
            match handle.join() {
                Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => {
                    warn!(program = %self.program, error = %e, "failed to write script to stdin");
                }
                Err(_) => warn!(program = %self.program, "stdin writer panicked"),
                _ => {}
            }
        }

        let output = match waited {
            Ok(output) => output,
            Err(source) => {
                return ScriptOutput {
                    err: Some(ExecError::Wait {
                        program: self.program.clone(),
                        source,
                    }),
                    ..Default::default()
                }
            }
        };

        let err = if output.status.success() {
            None
        } else {
            Some(ExecError::Exit {
                code: output.status.code(),
            })
        };
        ScriptOutput {
            err,
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}

#[derive(Debug)]
/// Outcome of running one rule.
pub struct RuleResult {
    pub rule: Rule,
    pub err: Option<ExecError>,
    pub stdout: String,
    pub stderr: String,
}

impl RuleResult {
    pub fn success(&self) -> bool {
        self.err.is_none()
    }

    pub fn name(&self) -> &str {
        self.rule.display_name()
    }

    pub fn severity(&self) -> Severity {
        self.rule.severity()
    }

    /// True when the check failed and its severity is at or above `threshold`.
    pub fn should_fail(&self, threshold: Severity) -> bool {
        !self.success() && self.severity() >= threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Counts used by printers.
pub struct ReportSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Failed rules at or above the fail severity.
    pub failing: usize,
}

#[derive(Debug)]
/// All rule outcomes of a diagnose run, in declaration order.
pub struct Report {
    pub rules: Vec<RuleResult>,
    pub fail_severity: Severity,
}

impl Report {
    pub fn has_failures(&self) -> bool {
        self.rules
            .iter()
            .any(|r| r.should_fail(self.fail_severity))
    }

    pub fn failures(&self) -> Vec<&RuleResult> {
        self.rules
            .iter()
            .filter(|r| r.should_fail(self.fail_severity))
            .collect()
    }

    pub fn summary(&self) -> ReportSummary {
        let passed = self.rules.iter().filter(|r| r.success()).count();
        ReportSummary {
            total: self.rules.len(),
            passed,
            failed: self.rules.len() - passed,
            failing: self.failures().len(),
        }
    }
}

#[derive(Debug, Default, Clone)]
/// Inputs of a diagnose run.
pub struct DiagnoseOptions<'a> {
    pub config: Option<&'a Config>,
    /// Directory the checks run in; `None` or empty means `"."`.
    pub work_dir: Option<PathBuf>,
    /// Lowest severity that runs; `None` runs everything.
    pub min_severity: Option<Severity>,
    /// Lowest severity whose failure fails the run; `None` means `error`.
    pub fail_severity: Option<Severity>,
}

/// Threshold for rule selection from raw text. Empty or unknown runs everything.
pub fn normalize_min_severity(raw: Option<&str>) -> Severity {
    raw.and_then(|s| Severity::normalize(s).ok())
        .unwrap_or(Severity::Debug)
}

/// Failure threshold from raw text. Empty or unknown falls back to `error`.
pub fn normalize_fail_severity(raw: Option<&str>) -> Severity {
    raw.and_then(|s| Severity::normalize(s).ok())
        .unwrap_or(DEFAULT_FAIL_SEVERITY)
}

/// Rules whose severity is at or above `min_severity`, in declaration order.
pub fn filter_rules(config: &Config, min_severity: Severity) -> Vec<&Rule> {
    config
        .rules
        .iter()
        .filter(|rule| rule.severity() >= min_severity)
        .collect()
}

/// Run one rule with the default shell.
pub fn run_rule(rule: &Rule, work_dir: &Path) -> RuleResult {
    run_rule_with(&ShellRunner::default(), rule, work_dir)
}

/// Run one rule with the given runner.
pub fn run_rule_with<R: ScriptRunner + ?Sized>(
    runner: &R,
    rule: &Rule,
    work_dir: &Path,
) -> RuleResult {
    let span = info_span!("rule", name = %rule.display_name(), severity = %rule.severity());
    let _enter = span.enter();
    debug!(work_dir = %work_dir.display(), "running check");
    let out = runner.run(&rule.check, work_dir);
    match &out.err {
        None => debug!(rule = %rule.display_name(), "check passed"),
        Some(e) => debug!(rule = %rule.display_name(), error = %e, "check failed"),
    }
    RuleResult {
        rule: rule.clone(),
        err: out.err,
        stdout: out.stdout,
        stderr: out.stderr,
    }
}

/// Run every eligible rule of the configuration with the default shell.
pub fn diagnose(opts: DiagnoseOptions<'_>) -> Result<Report, DiagnoseError> {
    diagnose_with(&ShellRunner::default(), opts)
}

/// Run every eligible rule of the configuration with the given runner.
///
/// Fails only when no configuration is supplied; rule failures are recorded
/// in the report and never stop the run.
pub fn diagnose_with<R: ScriptRunner + ?Sized>(
    runner: &R,
    opts: DiagnoseOptions<'_>,
) -> Result<Report, DiagnoseError> {
    let config = opts.config.ok_or(DiagnoseError::MissingConfig)?;
    let work_dir = match opts.work_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => PathBuf::from("."),
    };
    let min_severity = opts.min_severity.unwrap_or(Severity::Debug);
    let fail_severity = opts.fail_severity.unwrap_or(DEFAULT_FAIL_SEVERITY);

    let selected = filter_rules(config, min_severity);
    debug!(
        selected = selected.len(),
        configured = config.rules.len(),
        %min_severity,
        %fail_severity,
        "diagnose started"
    );
    let rules = selected
        .into_iter()
        .map(|rule| run_rule_with(runner, rule, &work_dir))
        .collect();

    Ok(Report {
        rules,
        fail_severity,
    })
}
