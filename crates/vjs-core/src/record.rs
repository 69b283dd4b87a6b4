//! # Error Records and Validation Results
//!
//! The output side of a validation call. Field names serialize in camelCase
//! so the JSON shape matches what workflow hosts consume:
//!
//! ```json
//! {
//!   "isValid": false,
//!   "errors": [
//!     {
//!       "keyword": "required",
//!       "instancePath": "",
//!       "schemaPath": "#/required",
//!       "params": { "missingProperty": "foo" },
//!       "message": "\"foo\" is a required property"
//!     }
//!   ]
//! }
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One schema-rule violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    /// The schema keyword that failed, e.g. `required` or `type`.
    pub keyword: String,
    /// JSON Pointer to the offending location in the data. `""` is the root.
    pub instance_path: String,
    /// JSON Pointer fragment to the failing keyword in the schema.
    pub schema_path: String,
    /// Rule-specific diagnostics, e.g. `missingProperty` for `required`.
    #[serde(default)]
    pub params: Map<String, Value>,
    /// Offending property name, for `propertyNames` failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_name: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Value of the failing keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Schema object containing the failing keyword.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_schema: Option<Value>,
    /// The offending data fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl ErrorRecord {
    /// A record with empty params and no optional diagnostics.
    pub fn new(
        keyword: impl Into<String>,
        instance_path: impl Into<String>,
        schema_path: impl Into<String>,
    ) -> Self {
        Self {
            keyword: keyword.into(),
            instance_path: instance_path.into(),
            schema_path: schema_path.into(),
            params: Map::new(),
            property_name: None,
            message: None,
            schema: None,
            parent_schema: None,
            data: None,
        }
    }

    /// Builder-style param insert.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Builder-style message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let location = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        match &self.message {
            Some(message) => write!(f, "{location}: {message}"),
            None => write!(f, "{location}: failed '{}' at {}", self.keyword, self.schema_path),
        }
    }
}

/// Verdict of one validation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Whether the data conforms to the schema.
    pub is_valid: bool,
    /// Violations in engine order. Absent when the data conforms.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<ErrorRecord>>,
}

impl ValidationResult {
    /// A passing verdict.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: None,
        }
    }

    /// Build a verdict from an engine report. `None` and an empty list both
    /// mean the data conforms.
    pub fn from_errors(errors: Option<Vec<ErrorRecord>>) -> Self {
        match errors {
            Some(errors) if !errors.is_empty() => Self {
                is_valid: false,
                errors: Some(errors),
            },
            _ => Self::valid(),
        }
    }

    /// The recorded violations; empty when valid.
    pub fn errors(&self) -> &[ErrorRecord] {
        self.errors.as_deref().unwrap_or_default()
    }

    /// Number of recorded violations.
    pub fn error_count(&self) -> usize {
        self.errors().len()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return write!(f, "valid");
        }
        write!(f, "invalid ({} error(s))", self.error_count())?;
        for record in self.errors() {
            write!(f, "\n  {record}")?;
        }
        Ok(())
    }
}
