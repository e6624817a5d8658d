//! JSON schema of the configuration file and a compiled validator for it.
//!
//! The schema is generated from the `Config` model with schemars, so the
//! document printed by `checksy schema` and the one used for validation are
//! always the same.

use crate::error::{ConfigError, SchemaError};
use crate::models::Config;
use serde_json::Value as Json;

/// Schema document for `Config`.
pub fn config_schema() -> Result<Json, SchemaError> {
    let root = schemars::schema_for!(Config);
    Ok(serde_json::to_value(root)?)
}

/// Render the schema as JSON text followed by a newline.
pub fn render(pretty: bool) -> Result<String, SchemaError> {
    let schema = config_schema()?;
    let mut out = if pretty {
        serde_json::to_string_pretty(&schema)?
    } else {
        serde_json::to_string(&schema)?
    };
    out.push('\n');
    Ok(out)
}

/// Compiled configuration validator.
///
/// Build it once and pass it to `config::load_with` for every file that
/// needs checking.
pub struct ConfigValidator {
    validator: jsonschema::Validator,
}

impl ConfigValidator {
    pub fn new() -> Result<Self, SchemaError> {
        Self::from_schema(&config_schema()?)
    }

    /// Compile an arbitrary schema document.
    pub fn from_schema(schema: &Json) -> Result<Self, SchemaError> {
        let validator =
            jsonschema::validator_for(schema).map_err(|e| SchemaError::Compile(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Check a decoded document, reporting every violation.
    pub fn validate(&self, doc: &Json) -> Result<(), ConfigError> {
        let errors: Vec<String> = self
            .validator
            .iter_errors(doc)
            .map(|e| {
                let at = e.instance_path.to_string();
                if at.is_empty() {
                    e.to_string()
                } else {
                    format!("{}: {}", at, e)
                }
            })
            .collect();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation { errors })
        }
    }
}
