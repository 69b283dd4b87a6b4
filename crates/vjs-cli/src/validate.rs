//! # Validate Subcommand
//!
//! Validates one data document against one schema document.
//!
//! Options come from an optional JSON/YAML options file, with the
//! `--all-errors` and `--no-formats` flags layered on top. When neither the
//! file nor a flag is given, no options are passed at all and the engine
//! runs on its defaults.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use vjs_core::{ValidationResult, ValidatorOptions};
use vjs_schema::SchemaValidator;

use crate::output;

/// Arguments for the `vjs validate` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Data document (JSON or YAML, `-` for JSON on stdin).
    #[arg(long, value_name = "PATH")]
    pub data: PathBuf,

    /// Schema document (JSON or YAML).
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Engine options document (JSON or YAML object).
    #[arg(long, value_name = "PATH")]
    pub options: Option<PathBuf>,

    /// Collect every violation instead of stopping at the first.
    #[arg(long)]
    pub all_errors: bool,

    /// Skip `format` checks.
    #[arg(long)]
    pub no_formats: bool,

    /// Print the verdict on a single line.
    #[arg(long)]
    pub compact: bool,
}

/// Execute the validate subcommand and return the exit code.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let result = evaluate(args)?;
    output::emit(&result, args.compact)
}

/// Load the documents and validate, without printing.
pub fn evaluate(args: &ValidateArgs) -> Result<ValidationResult> {
    let data = crate::read_document(&args.data)?;
    let schema = crate::read_document(&args.schema)?;
    let options = resolve_options(args)?;

    tracing::debug!(
        data = %args.data.display(),
        schema = %args.schema.display(),
        options = options.as_ref().map_or(0, ValidatorOptions::len),
        "validating"
    );

    SchemaValidator::new()
        .validate(Some(&data), Some(&schema), options.as_ref())
        .with_context(|| format!("cannot validate against {}", args.schema.display()))
}

/// Merge the options file with flag overrides. Returns `None` when nothing
/// was configured.
pub fn resolve_options(args: &ValidateArgs) -> Result<Option<ValidatorOptions>> {
    let mut options = match &args.options {
        Some(path) => {
            let value = crate::read_document(path)?;
            Some(
                ValidatorOptions::try_from(value)
                    .with_context(|| format!("invalid options file {}", path.display()))?,
            )
        }
        None => None,
    };

    let mut overrides = ValidatorOptions::new();
    if args.all_errors {
        overrides.insert("allErrors", true);
    }
    if args.no_formats {
        overrides.insert("validateFormats", false);
    }
    if !overrides.is_empty() {
        options.get_or_insert_with(ValidatorOptions::new).merge(overrides);
    }
    Ok(options)
}
