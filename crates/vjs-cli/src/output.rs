//! Verdict rendering and exit codes.

use anyhow::Result;
use vjs_core::ValidationResult;

use crate::{EXIT_INVALID, EXIT_VALID};

/// Render a verdict as JSON, pretty unless `compact`.
pub fn render(result: &ValidationResult, compact: bool) -> Result<String> {
    let text = if compact {
        serde_json::to_string(result)?
    } else {
        serde_json::to_string_pretty(result)?
    };
    Ok(text)
}

/// Exit code for a verdict.
pub fn exit_code(result: &ValidationResult) -> u8 {
    if result.is_valid {
        EXIT_VALID
    } else {
        EXIT_INVALID
    }
}

/// Print a verdict on stdout and log a one-line summary.
pub fn emit(result: &ValidationResult, compact: bool) -> Result<u8> {
    println!("{}", render(result, compact)?);
    if result.is_valid {
        tracing::info!("document is valid");
    } else {
        tracing::info!(errors = result.error_count(), "document is invalid");
        for record in result.errors() {
            tracing::debug!("{record}");
        }
    }
    Ok(exit_code(result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vjs_core::ErrorRecord;

    #[test]
    fn compact_rendering() {
        let text = render(&ValidationResult::valid(), true).unwrap();
        assert_eq!(text, r#"{"isValid":true}"#);
    }

    #[test]
    fn exit_codes() {
        assert_eq!(exit_code(&ValidationResult::valid()), EXIT_VALID);
        let invalid = ValidationResult::from_errors(Some(vec![ErrorRecord::new(
            "type",
            "/foo",
            "#/properties/foo/type",
        )]));
        assert_eq!(exit_code(&invalid), EXIT_INVALID);
    }
}
