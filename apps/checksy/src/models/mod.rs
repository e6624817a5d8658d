//! Configuration data models: the rule list and its rules.

pub mod severity;

use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Metadata, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::json;

pub use severity::{Severity, DEFAULT_FAIL_SEVERITY, DEFAULT_RULE_SEVERITY};

/// Severity spellings accepted in configuration files.
pub const SEVERITY_VALUES: [&str; 5] = ["error", "warn", "warning", "info", "debug"];

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
/// Root configuration: rules in declaration order.
pub struct Config {
    pub rules: Vec<Rule>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
/// A single shell check.
pub struct Rule {
    /// Display label; the check body is shown when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Script body executed by the shell in the workspace root.
    pub check: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "severity_schema")]
    pub severity: Option<String>,
    /// Remediation command. Shown to the user, never executed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fix: Option<String>,
    /// Remediation hint shown when the check fails.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl Rule {
    /// Normalized severity, falling back to [`DEFAULT_RULE_SEVERITY`] when the
    /// value is absent or unrecognized.
    pub fn severity(&self) -> Severity {
        self.severity
            .as_deref()
            .and_then(|raw| Severity::normalize(raw).ok())
            .unwrap_or(DEFAULT_RULE_SEVERITY)
    }

    /// Name if set and non-empty, otherwise the check body.
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.check,
        }
    }
}

fn severity_schema(_gen: &mut SchemaGenerator) -> Schema {
    SchemaObject {
        instance_type: Some(InstanceType::String.into()),
        enum_values: Some(SEVERITY_VALUES.iter().map(|v| json!(v)).collect()),
        metadata: Some(Box::new(Metadata {
            description: Some("Rule severity (debug < info < warn < error)".to_string()),
            default: Some(json!(DEFAULT_RULE_SEVERITY.as_str())),
            ..Default::default()
        })),
        ..Default::default()
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: Option<&str>, check: &str, severity: Option<&str>) -> Rule {
        Rule {
            name: name.map(str::to_string),
            check: check.to_string(),
            severity: severity.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_display_name_prefers_name() {
        assert_eq!(rule(Some("custom"), "echo hi", None).display_name(), "custom");
        assert_eq!(rule(None, "echo hi", None).display_name(), "echo hi");
        assert_eq!(rule(Some(""), "echo hi", None).display_name(), "echo hi");
    }

    #[test]
    fn test_rule_severity_defaults() {
        assert_eq!(rule(None, "true", None).severity(), DEFAULT_RULE_SEVERITY);
        assert_eq!(
            rule(None, "true", Some("bogus")).severity(),
            DEFAULT_RULE_SEVERITY
        );
        assert_eq!(rule(None, "true", Some(" Warning")).severity(), Severity::Warn);
        assert_eq!(rule(None, "true", Some("debug")).severity(), Severity::Debug);
    }

    #[test]
    fn test_deserialize_yaml_rule() {
        let cfg: Config = serde_yaml::from_str(
            "rules:\n  - name: fmt\n    check: cargo fmt --check\n    severity: warn\n    hint: run cargo fmt\n",
        )
        .unwrap();
        assert_eq!(cfg.rules.len(), 1);
        assert_eq!(cfg.rules[0].display_name(), "fmt");
        assert_eq!(cfg.rules[0].hint.as_deref(), Some("run cargo fmt"));
        assert!(cfg.rules[0].fix.is_none());
    }
}
