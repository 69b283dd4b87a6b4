//! # vjs-cli — Local Host for the Validation Step
//!
//! Provides the `vjs` command-line interface:
//!
//! ```bash
//! vjs validate --data order.json --schema order.schema.yaml --all-errors
//! vjs run bundle.json
//! cat bundle.json | vjs run -
//! ```
//!
//! Both subcommands print the verdict as JSON on stdout and exit with
//! 0 (valid), 1 (invalid) or 2 (operational error).
//!
//! ## Crate Policy
//!
//! - Argument parsing is separated from the handlers.
//! - Handlers delegate to `vjs-schema`; no validation logic lives here.

pub mod output;
pub mod run;
pub mod validate;

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use vjs_schema::{load_document, parse_document, DocumentFormat};

/// Exit code for a conforming document.
pub const EXIT_VALID: u8 = 0;
/// Exit code for a non-conforming document.
pub const EXIT_INVALID: u8 = 1;
/// Exit code for input, schema, option or IO failures.
pub const EXIT_ERROR: u8 = 2;

/// Read a JSON or YAML document from `path`, or JSON from stdin when the
/// path is `-`.
pub fn read_document(path: &Path) -> Result<Value> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read stdin")?;
        return parse_document(&text, DocumentFormat::Json).context("failed to parse stdin");
    }
    load_document(path).with_context(|| format!("failed to load {}", path.display()))
}
