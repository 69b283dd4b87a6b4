//! # Run Subcommand
//!
//! Executes an activity input bundle `{ data, schema, options }`, the same
//! shape a workflow host passes to the step.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vjs_core::ValidationResult;
use vjs_schema::ValidateJsonSchema;

use crate::output;

/// Arguments for the `vjs run` subcommand.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Input bundle (JSON or YAML, `-` for JSON on stdin).
    #[arg(value_name = "PATH", default_value = "-")]
    pub inputs: PathBuf,

    /// Print the verdict on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the run subcommand and return the exit code.
pub fn run_bundle(args: &RunArgs) -> Result<u8> {
    let result = evaluate(args)?;
    output::emit(&result, args.compact)
}

/// Load the bundle and execute it, without printing.
pub fn evaluate(args: &RunArgs) -> Result<ValidationResult> {
    let bundle = crate::read_document(&args.inputs)?;
    ValidateJsonSchema::new()
        .execute_value(bundle)
        .with_context(|| format!("cannot run bundle {}", args.inputs.display()))
}
