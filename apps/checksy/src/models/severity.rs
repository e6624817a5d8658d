//! Severity levels shared by rules, thresholds, and output.
//!
//! Ordering (lowest to highest): `debug`, `info`, `warn`, `error`. The
//! canonical warning spelling is `warn`; `warning` is accepted as an alias.
//! Parsing is case-insensitive and ignores surrounding whitespace.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::UnknownSeverity;

/// Severity assigned to a rule that omits `severity` or uses an unknown value.
pub const DEFAULT_RULE_SEVERITY: Severity = Severity::Error;

/// Severity used as the failure threshold when none is supplied.
pub const DEFAULT_FAIL_SEVERITY: Severity = Severity::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
/// Rule severity. Variant order is the ranking order.
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
}

impl Severity {
    /// All severities, lowest first.
    pub const ALL: [Severity; 4] = [
        Severity::Debug,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
    ];

    /// Map raw text onto a canonical severity.
    ///
    /// On failure the returned error keeps the original text untouched so
    /// callers can report exactly what was configured.
    pub fn normalize(raw: &str) -> Result<Severity, UnknownSeverity> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(UnknownSeverity(raw.to_string())),
        }
    }

    /// Comparison rank: debug=0, info=1, warn=2, error=3.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Debug => 0,
            Severity::Info => 1,
            Severity::Warn => 2,
            Severity::Error => 3,
        }
    }

    /// The lower-ranked of two severities.
    pub fn min(a: Severity, b: Severity) -> Severity {
        if a.rank() <= b.rank() {
            a
        } else {
            b
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Debug => "debug",
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::normalize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_canonical_forms() {
        for sev in Severity::ALL {
            assert_eq!(Severity::normalize(sev.as_str()), Ok(sev));
        }
    }

    #[test]
    fn test_normalize_aliases_case_and_whitespace() {
        assert_eq!(Severity::normalize("warning"), Ok(Severity::Warn));
        assert_eq!(Severity::normalize("  Warn "), Ok(Severity::Warn));
        assert_eq!(
            Severity::normalize("  Warn "),
            Severity::normalize("warning")
        );
        assert_eq!(Severity::normalize("ERROR"), Ok(Severity::Error));
        assert_eq!(Severity::normalize("\tInfo\n"), Ok(Severity::Info));
    }

    #[test]
    fn test_normalize_unknown_keeps_original_text() {
        let err = Severity::normalize(" Nope ").unwrap_err();
        assert_eq!(err.0, " Nope ");
        assert!(Severity::normalize("").is_err());
        assert!("critical".parse::<Severity>().is_err());
    }

    #[test]
    fn test_rank_and_ordering_agree() {
        assert_eq!(Severity::Debug.rank(), 0);
        assert_eq!(Severity::Info.rank(), 1);
        assert_eq!(Severity::Warn.rank(), 2);
        assert_eq!(Severity::Error.rank(), 3);
        for a in Severity::ALL {
            for b in Severity::ALL {
                assert_eq!(a < b, a.rank() < b.rank());
            }
        }
    }

    #[test]
    fn test_min_matches_min_rank() {
        assert_eq!(
            Severity::min(Severity::Debug, Severity::Warn),
            Severity::Debug
        );
        assert_eq!(
            Severity::min(Severity::Error, Severity::Warn),
            Severity::Warn
        );
        for a in Severity::ALL {
            for b in Severity::ALL {
                assert_eq!(Severity::min(a, b).rank(), a.rank().min(b.rank()));
            }
        }
    }

    #[test]
    fn test_display_and_serialize_use_canonical_form() {
        assert_eq!(Severity::Warn.to_string(), "warn");
        assert_eq!(
            serde_json::to_value(Severity::Warn).unwrap(),
            serde_json::json!("warn")
        );
    }
}
