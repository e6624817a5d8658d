//! Output rendering for diagnose reports.
//!
//! Supports `human` (default) and `json` outputs. Human output prints one
//! status line per rule on stdout and failure details (captured output,
//! hint, fix) on stderr. The JSON form includes per-rule fields and a
//! top-level summary.

use crate::doctor::{Report, RuleResult};
use crate::models::Severity;
use crate::utils::colors_enabled;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// Accepted `--output` values.
pub const OUTPUT_MODES: [&str; 2] = ["human", "json"];

pub fn is_known_output(output: &str) -> bool {
    OUTPUT_MODES.contains(&output)
}

fn use_colors(output: &str) -> bool {
    output != "json" && colors_enabled()
}

/// Status icon: pass, failure that counts, or failure below the threshold.
pub fn rule_icon(result: &RuleResult, fail_severity: Severity) -> &'static str {
    if result.success() {
        "✅"
    } else if result.should_fail(fail_severity) {
        "❌"
    } else {
        "⚠️"
    }
}

/// Text produced for a single rule: a status line and optional details.
pub struct RuleOutcome {
    pub line: String,
    pub details: String,
}

/// Compose the human output for one rule (pure) for testing.
pub fn compose_rule_outcome(result: &RuleResult, fail_severity: Severity, color: bool) -> RuleOutcome {
    let icon = rule_icon(result, fail_severity);
    let name = result.name();
    let line = if color && !result.success() {
        format!("{} {} {}", icon, name.bold(), format!("[{}]", result.severity()).dimmed())
    } else if result.success() {
        format!("{} {}", icon, name)
    } else {
        format!("{} {} [{}]", icon, name, result.severity())
    };

    let mut details = String::new();
    if !result.success() {
        if !result.stdout.is_empty() {
            details.push_str(&format!("{} stdout:\n{}\n", name, result.stdout));
        }
        if !result.stderr.is_empty() {
            details.push_str(&format!("{} stderr:\n{}\n", name, result.stderr));
        }
        if result.stdout.is_empty() && result.stderr.is_empty() {
            if let Some(err) = &result.err {
                details.push_str(&format!("{} error: {}\n", name, err));
            }
        }
        if let Some(hint) = result.rule.hint.as_deref().filter(|h| !h.is_empty()) {
            let label = if color {
                "hint:".yellow().bold().to_string()
            } else {
                "hint:".to_string()
            };
            details.push_str(&format!("{} {}\n", label, hint));
        }
        if let Some(fix) = result.rule.fix.as_deref().filter(|f| !f.is_empty()) {
            let label = if color {
                "fix:".green().bold().to_string()
            } else {
                "fix:".to_string()
            };
            details.push_str(&format!("{} {}\n", label, fix));
        }
    }
    RuleOutcome { line, details }
}

/// Compose the closing summary (pure) for testing.
pub fn compose_summary(report: &Report, color: bool) -> String {
    let failures = report.failures();
    if failures.is_empty() {
        let summary = report.summary();
        let mut out = "All rules validated 😎".to_string();
        if summary.failed > 0 {
            out.push_str(&format!(
                " ({} below fail severity {})",
                summary.failed, report.fail_severity
            ));
        }
        return if color { out.green().bold().to_string() } else { out };
    }
    let head = format!("{} rules failed validation 😭", failures.len());
    let mut out = if color {
        head.red().bold().to_string()
    } else {
        head
    };
    for failure in failures {
        out.push_str(&format!("\n- {}", failure.name()));
    }
    out
}

/// Print a report in the requested format.
pub fn print_report(report: &Report, output: &str) -> Result<(), serde_json::Error> {
    match output {
        "json" => println!(
            "{}",
            serde_json::to_string_pretty(&compose_report_json(report))?
        ),
        _ => {
            let color = use_colors(output);
            for result in &report.rules {
                let outcome = compose_rule_outcome(result, report.fail_severity, color);
                println!("{}", outcome.line);
                if !outcome.details.is_empty() {
                    eprint!("{}", outcome.details);
                }
            }
            println!("{}", compose_summary(report, color));
        }
    }
    Ok(())
}

/// Compose report JSON object (pure) for testing/snapshot purposes.
pub fn compose_report_json(report: &Report) -> JsonVal {
    let items: Vec<_> = report
        .rules
        .iter()
        .map(|r| {
            json!({
                "name": r.name(),
                "check": r.rule.check,
                "severity": r.severity(),
                "success": r.success(),
                "failing": r.should_fail(report.fail_severity),
                "error": r.err.as_ref().map(|e| e.to_string()),
                "stdout": r.stdout,
                "stderr": r.stderr,
                "hint": r.rule.hint,
                "fix": r.rule.fix,
            })
        })
        .collect();
    let summary = report.summary();
    json!({
        "rules": items,
        "summary": {
            "total": summary.total,
            "passed": summary.passed,
            "failed": summary.failed,
            "failing": summary.failing,
            "failSeverity": report.fail_severity,
            "ok": !report.has_failures(),
        }
    })
}
