//! # Validation Engine Trait
//!
//! Abstract interface for a JSON Schema compile-and-validate engine.
//!
//! ```text
//! compile(schema, options) -> CompiledSchema
//! CompiledSchema::validate(data) -> Option<Vec<ErrorRecord>>
//! ```
//!
//! The validator owns none of the schema-interpretation logic; any
//! conformant engine can sit behind this seam.

use serde_json::Value;
use vjs_core::{ErrorRecord, ValidateError, ValidatorOptions};

/// A JSON Schema engine.
///
/// Implementations must be `Send + Sync` so one engine value can serve
/// concurrent calls. `compile` must not keep state between calls.
pub trait SchemaEngine: Send + Sync {
    /// The compiled validator produced by this engine.
    type Compiled: CompiledSchema;

    /// Compile `schema`, configured by `options`.
    ///
    /// `None` options must behave exactly like the engine defaults.
    ///
    /// # Errors
    ///
    /// [`ValidateError::Schema`] when the schema cannot be compiled,
    /// [`ValidateError::Options`] when a recognised option is malformed.
    fn compile(
        &self,
        schema: &Value,
        options: Option<&ValidatorOptions>,
    ) -> Result<Self::Compiled, ValidateError>;
}

/// A schema compiled into a reusable validation function.
pub trait CompiledSchema {
    /// Validate `data`. Returns `None` when it conforms, otherwise the
    /// violations in the order the engine emits them.
    fn validate(&self, data: &Value) -> Option<Vec<ErrorRecord>>;
}
