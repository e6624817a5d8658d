//! Configuration discovery and loading.
//!
//! Checksy reads `.checksy.yaml`, `.checksy.yml`, or `.checksy.toml` from the
//! current directory unless `--config` names a file explicitly. Every file is
//! decoded to a JSON value, validated against the generated schema, and only
//! then deserialized into `Config`.
//!
//! After loading, rule severities are canonicalized (`warning` becomes
//! `warn`) and rules without one get the default rule severity.

use crate::error::ConfigError;
use crate::models::{Config, Severity, DEFAULT_RULE_SEVERITY};
use crate::schema::ConfigValidator;
use serde_json::Value as Json;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Well-known config file names, checked in this order.
pub const CONFIG_CANDIDATES: [&str; 3] = [".checksy.yaml", ".checksy.yml", ".checksy.toml"];

/// Decide which config file to use.
///
/// An explicit path must exist. Otherwise the well-known names are looked up
/// in `cwd`; `Ok(None)` means none of them exists.
pub fn resolve_path(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = explicit {
        let meta = fs::metadata(path).map_err(|source| ConfigError::Inaccessible {
            path: path.to_path_buf(),
            source,
        })?;
        if meta.is_dir() {
            return Err(ConfigError::IsDirectory {
                path: path.to_path_buf(),
            });
        }
        return Ok(Some(path.to_path_buf()));
    }

    for candidate in CONFIG_CANDIDATES {
        let path = cwd.join(candidate);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_dir() => return Err(ConfigError::IsDirectory { path }),
            Ok(_) => return Ok(Some(path)),
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(source) => return Err(ConfigError::Inaccessible { path, source }),
        }
    }
    Ok(None)
}

/// Load a config file with a freshly compiled validator.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let validator = ConfigValidator::new()?;
    load_with(&validator, path)
}

/// Read, validate, and decode a config file, then apply rule defaults.
pub fn load_with(validator: &ConfigValidator, path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc = parse_document(path, &text)?;
    validator.validate(&doc)?;
    let mut cfg: Config = serde_json::from_value(doc).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    apply_rule_defaults(&mut cfg);
    debug!(path = %path.display(), rules = cfg.rules.len(), "loaded config");
    Ok(cfg)
}

/// Decode config text: TOML for `.toml` files, YAML for everything else.
pub fn parse_document(path: &Path, text: &str) -> Result<Json, ConfigError> {
    let is_toml = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("toml"))
        .unwrap_or(false);
    let parsed = if is_toml {
        toml::from_str::<Json>(text).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str::<Json>(text).map_err(|e| e.to_string())
    };
    parsed.map_err(|message| ConfigError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

/// Canonicalize known severities and fill in missing ones.
///
/// Unknown values are left as written; they fall back to the default when
/// the rule is evaluated.
pub fn apply_rule_defaults(cfg: &mut Config) {
    for rule in &mut cfg.rules {
        let canonical = match rule.severity.as_deref() {
            None => DEFAULT_RULE_SEVERITY,
            Some(raw) if raw.trim().is_empty() => DEFAULT_RULE_SEVERITY,
            Some(raw) => match Severity::normalize(raw) {
                Ok(sev) => sev,
                Err(e) => {
                    warn!(rule = %rule.display_name(), "{}; using {}", e, DEFAULT_RULE_SEVERITY);
                    continue;
                }
            },
        };
        rule.severity = Some(canonical.as_str().to_string());
    }
}
