//! # Schema Validation
//!
//! The single validation operation: check inputs, compile, validate once,
//! report.
//!
//! ## Presence Checks
//!
//! `data` and `schema` are required. A value is absent when it is `None` or
//! JSON `null`. Falsy JSON values (`false`, `0`, `""`, `[]`, `{}`) are
//! legitimate data, and boolean schemas are legitimate schemas. The data
//! check runs first.
//!
//! ## Statelessness
//!
//! Every call compiles the schema from scratch through the engine and drops
//! the compiled validator on return. A [`SchemaValidator`] can therefore be
//! shared freely across threads.

use serde_json::Value;
use tracing::debug;
use vjs_core::{InputError, ValidateError, ValidationResult, ValidatorOptions};

use crate::adapter::JsonSchemaEngine;
use crate::engine::{CompiledSchema, SchemaEngine};

/// Validates data values against JSON Schema documents.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator<E = JsonSchemaEngine> {
    engine: E,
}

impl SchemaValidator {
    /// A validator backed by the `jsonschema` crate.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: SchemaEngine> SchemaValidator<E> {
    /// A validator backed by a custom engine.
    pub fn with_engine(engine: E) -> Self {
        Self { engine }
    }

    /// Validate `data` against `schema`.
    ///
    /// `options` is forwarded to the engine untouched; `None` keeps the
    /// engine defaults.
    ///
    /// # Errors
    ///
    /// - [`InputError::MissingData`] / [`InputError::MissingSchema`] when an
    ///   input is absent, before any engine work.
    /// - [`ValidateError::Schema`] when the schema does not compile.
    /// - [`ValidateError::Options`] when the engine rejects an option value.
    ///
    /// Non-conforming data is reported through the returned
    /// [`ValidationResult`], never as an error.
    pub fn validate(
        &self,
        data: Option<&Value>,
        schema: Option<&Value>,
        options: Option<&ValidatorOptions>,
    ) -> Result<ValidationResult, ValidateError> {
        let data = present(data).ok_or(InputError::MissingData)?;
        let schema = present(schema).ok_or(InputError::MissingSchema)?;

        let compiled = self.engine.compile(schema, options)?;
        let result = ValidationResult::from_errors(compiled.validate(data));

        debug!(
            is_valid = result.is_valid,
            error_count = result.error_count(),
            "validation finished"
        );
        Ok(result)
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Validate `data` against `schema` with the default engine.
///
/// Shorthand for `SchemaValidator::new().validate(Some(data), Some(schema), options)`.
pub fn validate(
    data: &Value,
    schema: &Value,
    options: Option<&ValidatorOptions>,
) -> Result<ValidationResult, ValidateError> {
    SchemaValidator::new().validate(Some(data), Some(schema), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use vjs_core::ErrorRecord;

    /// Engine that records what it was handed and fails every value equal
    /// to the `reject` key of the schema.
    #[derive(Default)]
    struct RecordingEngine {
        compiles: AtomicUsize,
        seen_options: Mutex<Vec<Option<ValidatorOptions>>>,
    }

    struct RejectValue(Value);

    impl CompiledSchema for RejectValue {
        fn validate(&self, data: &Value) -> Option<Vec<ErrorRecord>> {
            (data == &self.0).then(|| vec![ErrorRecord::new("reject", "", "#/reject")])
        }
    }

    impl SchemaEngine for RecordingEngine {
        type Compiled = RejectValue;

        fn compile(
            &self,
            schema: &Value,
            options: Option<&ValidatorOptions>,
        ) -> Result<RejectValue, ValidateError> {
            self.compiles.fetch_add(1, Ordering::SeqCst);
            self.seen_options.lock().unwrap().push(options.cloned());
            Ok(RejectValue(schema["reject"].clone()))
        }
    }

    #[test]
    fn missing_data_fails_before_compiling() {
        let validator = SchemaValidator::with_engine(RecordingEngine::default());
        let err = validator.validate(None, Some(&json!({})), None).unwrap_err();
        assert_eq!(err, ValidateError::Input(InputError::MissingData));
        assert_eq!(err.to_string(), "data is required");
        assert_eq!(validator.engine.compiles.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn null_data_counts_as_missing() {
        let err = validate(&Value::Null, &json!({}), None).unwrap_err();
        assert_eq!(err.to_string(), "data is required");
    }

    #[test]
    fn missing_data_wins_over_missing_schema() {
        let err = SchemaValidator::new().validate(None, None, None).unwrap_err();
        assert_eq!(err, ValidateError::Input(InputError::MissingData));
    }

    #[test]
    fn missing_schema_fails_before_compiling() {
        let validator = SchemaValidator::with_engine(RecordingEngine::default());
        for schema in [None, Some(&Value::Null)] {
            let err = validator.validate(Some(&json!({})), schema, None).unwrap_err();
            assert_eq!(err.to_string(), "schema is required");
        }
        assert_eq!(validator.engine.compiles.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn falsy_data_is_validated() {
        for data in [json!(false), json!(0), json!(""), json!([]), json!({})] {
            let result = validate(&data, &json!({}), None).unwrap();
            assert!(result.is_valid, "{data} should be accepted by an empty schema");
        }
    }

    #[test]
    fn boolean_schemas_are_schemas() {
        assert!(validate(&json!(1), &json!(true), None).unwrap().is_valid);
        let result = validate(&json!(1), &json!(false), None).unwrap();
        assert!(!result.is_valid);
        assert_eq!(result.error_count(), 1);
    }

    #[test]
    fn options_are_forwarded_verbatim() {
        let validator = SchemaValidator::with_engine(RecordingEngine::default());
        let opts = ValidatorOptions::new().with("allErrors", true).with("someFutureKnob", 3);
        validator
            .validate(Some(&json!(1)), Some(&json!({"reject": 2})), Some(&opts))
            .unwrap();
        validator
            .validate(Some(&json!(1)), Some(&json!({"reject": 2})), None)
            .unwrap();
        let seen = validator.engine.seen_options.lock().unwrap();
        assert_eq!(seen.as_slice(), &[Some(opts.clone()), None]);
    }

    #[test]
    fn each_call_compiles_afresh() {
        let validator = SchemaValidator::with_engine(RecordingEngine::default());
        let schema = json!({"reject": "x"});
        for _ in 0..3 {
            validator.validate(Some(&json!("y")), Some(&schema), None).unwrap();
        }
        assert_eq!(validator.engine.compiles.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn engine_report_becomes_the_verdict() {
        let validator = SchemaValidator::with_engine(RecordingEngine::default());
        let schema = json!({"reject": "x"});
        let ok = validator.validate(Some(&json!("y")), Some(&schema), None).unwrap();
        assert_eq!(ok, ValidationResult::valid());
        let bad = validator.validate(Some(&json!("x")), Some(&schema), None).unwrap();
        assert!(!bad.is_valid);
        assert_eq!(bad.errors()[0].keyword, "reject");
    }

    #[test]
    fn schema_errors_propagate() {
        let err = validate(&json!(1), &json!({"type": 12}), None).unwrap_err();
        assert!(matches!(err, ValidateError::Schema(_)), "got {err:?}");
    }
}
