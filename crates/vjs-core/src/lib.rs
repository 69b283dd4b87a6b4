//! # vjs-core — Data Model for JSON Schema Validation Steps
//!
//! Defines the values that flow in and out of a single validation call:
//!
//! - [`ValidatorOptions`] — an open configuration map forwarded verbatim to
//!   the validation engine. This crate never enumerates option keys.
//! - [`ErrorRecord`] — one structured rule violation (`keyword`,
//!   `instancePath`, `schemaPath`, `params`, plus optional diagnostics).
//! - [`ValidationResult`] — the verdict: `isValid` and, on failure, the
//!   ordered error records.
//!
//! The error taxonomy lives in [`error`]: a missing input is an
//! [`InputError`], an uncompilable schema is a [`SchemaError`], a recognised
//! option with a malformed value is an [`OptionsError`]. Non-conforming data
//! is never an error; it is a `ValidationResult` with `is_valid == false`.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `vjs-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Serialized field names follow the camelCase wire shape consumed by
//!   workflow hosts (`isValid`, `instancePath`, `missingProperty`, ...).

pub mod error;
pub mod options;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use error::{json_type_name, InputError, OptionsError, SchemaError, ValidateError};
pub use options::ValidatorOptions;
pub use record::{ErrorRecord, ValidationResult};
