//! # vjs-schema — JSON Schema Validation Step
//!
//! Validates one data value against one JSON Schema document and reports a
//! structured verdict.
//!
//! ## Runtime Validation (`validate`)
//!
//! [`SchemaValidator::validate`] checks that both inputs are present,
//! compiles the schema with a fresh engine instance, runs it once and
//! returns a [`ValidationResult`]. Nothing is cached between calls.
//!
//! ## Engine Seam (`engine`, `adapter`)
//!
//! The compile/validate capability sits behind [`SchemaEngine`] and
//! [`CompiledSchema`]. [`JsonSchemaEngine`] is the default implementation,
//! backed by the `jsonschema` crate. It reads the option keys it recognises
//! from the open [`ValidatorOptions`] map and ignores the rest.
//!
//! ## Formats (`formats`)
//!
//! Format checking is on by default. Besides the engine's built-in formats,
//! a few extra string formats are always registered.
//!
//! ## Activity Contract (`activity`)
//!
//! [`ValidateJsonSchema`] runs the validator from a single
//! `{ data, schema, options }` input bundle, the shape workflow hosts pass.
//!
//! ## Crate Policy
//!
//! - Depends only on `vjs-core` internally.
//! - No network or file I/O during compilation: external `$ref`s are refused.
//! - Non-conforming data is a result, never an error.

pub mod activity;
pub mod adapter;
pub mod document;
pub mod engine;
pub mod formats;
pub mod report;
pub mod validate;

pub use activity::{ValidateJsonSchema, ValidateJsonSchemaInputs, ValidateJsonSchemaOutputs};
pub use adapter::{CompiledJsonSchema, JsonSchemaEngine};
pub use document::{load_document, parse_document, DocumentError, DocumentFormat};
pub use engine::{CompiledSchema, SchemaEngine};
pub use validate::{validate, SchemaValidator};

pub use vjs_core::{
    ErrorRecord, InputError, OptionsError, SchemaError, ValidateError, ValidationResult,
    ValidatorOptions,
};
