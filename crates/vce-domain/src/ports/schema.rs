//! Schema validation port
//!
//! Descriptor files are validated by whoever hosts the engine; the
//! core only needs a `validate(value, schema) -> report` capability.

use serde_json::Value;

/// Outcome of validating a value against a schema reference
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    /// True when the value conforms
    pub valid: bool,

    /// Human-readable findings when it does not
    pub errors: Vec<String>,
}

impl ValidationReport {
    /// A passing report
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// A failing report with findings
    pub fn failed(errors: Vec<String>) -> Self {
        Self {
            valid: false,
            errors,
        }
    }
}

/// Pluggable schema validation capability
pub trait SchemaValidator: Send + Sync {
    /// Validate a value against the named schema
    fn validate(&self, value: &Value, schema_ref: &str) -> ValidationReport;
}
