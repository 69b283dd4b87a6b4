//! # Error Types
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! - Presence checks fail with a fixed message so hosts can match on it.
//! - Schema compilation failures carry the engine's reason untouched.
//! - A data value that does not conform is not an error at all.

use serde_json::Value;
use thiserror::Error;

/// Top-level error for a validation call.
///
/// `Display` is transparent for the wrapped categories, so a missing data
/// value renders exactly as `data is required`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidateError {
    /// A required input was absent.
    #[error(transparent)]
    Input(#[from] InputError),

    /// A recognised option carried a value of the wrong shape.
    #[error(transparent)]
    Options(#[from] OptionsError),

    /// The schema document could not be compiled.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// An activity input bundle could not be deserialized.
    #[error("malformed inputs: {0}")]
    MalformedInputs(String),
}

/// A required input was absent.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    /// No data value was supplied.
    #[error("data is required")]
    MissingData,

    /// No schema document was supplied.
    #[error("schema is required")]
    MissingSchema,
}

/// The schema document could not be compiled into a validator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("schema compilation failed: {reason}")]
pub struct SchemaError {
    /// Reason reported by the engine.
    pub reason: String,
    /// JSON Pointer into the schema where the fault was found, when the
    /// engine reports one.
    pub location: Option<String>,
}

impl SchemaError {
    /// Create a schema error without a location.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
            location: None,
        }
    }

    /// Attach the schema location of the fault. Empty locations are dropped.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        self.location = (!location.is_empty()).then_some(location);
        self
    }
}

/// A recognised option key carried a malformed value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    /// The options document itself was not a JSON object.
    #[error("options must be an object, got {found}")]
    NotAnObject {
        /// JSON type of the rejected value.
        found: &'static str,
    },

    /// An option had the wrong JSON type.
    #[error("option '{key}' must be {expected}, got {found}")]
    WrongType {
        /// Option key.
        key: String,
        /// Expected JSON type.
        expected: &'static str,
        /// JSON type actually supplied.
        found: &'static str,
    },

    /// An option had the right type but a value the engine does not support.
    #[error("option '{key}' has unsupported value '{value}'")]
    UnsupportedValue {
        /// Option key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// A custom format pattern could not be compiled.
    #[error("format '{name}' has an invalid pattern: {reason}")]
    InvalidFormatPattern {
        /// Format name.
        name: String,
        /// Regex compilation error.
        reason: String,
    },
}

/// JSON type name of a value, as used in error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
