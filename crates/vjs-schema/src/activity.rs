//! # Activity Contract
//!
//! Workflow hosts hand the step one input bundle and read one output
//! bundle:
//!
//! ```json
//! { "data": { "bar": "abc" }, "schema": { "required": ["foo"] }, "options": { "allErrors": true } }
//! ```
//!
//! Every input field is optional at the serde level so that a missing
//! `data` or `schema` surfaces as the validator's presence error rather
//! than a deserialization failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use vjs_core::{ValidateError, ValidationResult, ValidatorOptions};

use crate::adapter::JsonSchemaEngine;
use crate::engine::SchemaEngine;
use crate::validate::SchemaValidator;

/// Input bundle of the validation step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidateJsonSchemaInputs {
    /// Data to validate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    /// Schema to validate against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
    /// Engine options, forwarded untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ValidatorOptions>,
}

/// Output bundle of the validation step: `isValid` plus optional `errors`.
pub type ValidateJsonSchemaOutputs = ValidationResult;

/// The validation step as a host-invocable activity.
#[derive(Debug, Clone, Default)]
pub struct ValidateJsonSchema<E = JsonSchemaEngine> {
    validator: SchemaValidator<E>,
}

impl ValidateJsonSchema {
    /// An activity backed by the default engine.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: SchemaEngine> ValidateJsonSchema<E> {
    /// An activity backed by a custom validator.
    pub fn with_validator(validator: SchemaValidator<E>) -> Self {
        Self { validator }
    }

    /// Run the step on a typed input bundle.
    pub fn execute(
        &self,
        inputs: &ValidateJsonSchemaInputs,
    ) -> Result<ValidateJsonSchemaOutputs, ValidateError> {
        self.validator.validate(
            inputs.data.as_ref(),
            inputs.schema.as_ref(),
            inputs.options.as_ref(),
        )
    }

    /// Run the step on a raw JSON input bundle.
    ///
    /// # Errors
    ///
    /// [`ValidateError::MalformedInputs`] when the bundle is not an object
    /// or `options` is not an object, plus everything [`Self::execute`]
    /// returns.
    pub fn execute_value(&self, inputs: Value) -> Result<ValidateJsonSchemaOutputs, ValidateError> {
        let inputs: ValidateJsonSchemaInputs = serde_json::from_value(inputs)
            .map_err(|e| ValidateError::MalformedInputs(e.to_string()))?;
        self.execute(&inputs)
    }
}
