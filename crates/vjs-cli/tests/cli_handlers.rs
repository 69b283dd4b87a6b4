//! Integration test: the `validate` and `run` handlers against documents on
//! disk.

use std::path::{Path, PathBuf};

use serde_json::json;
use vjs_cli::run::{self, RunArgs};
use vjs_cli::validate::{self, ValidateArgs};
use vjs_cli::{EXIT_INVALID, EXIT_VALID};

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

fn validate_args(data: PathBuf, schema: PathBuf) -> ValidateArgs {
    ValidateArgs {
        data,
        schema,
        options: None,
        all_errors: false,
        no_formats: false,
        compact: true,
    }
}

const SCHEMA_YAML: &str = r#"
type: object
properties:
  foo:
    type: integer
  bar:
    type: integer
  contact:
    type: string
    format: email
"#;

#[test]
fn yaml_schema_and_json_data() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA_YAML);
    let data = write(dir.path(), "data.json", r#"{"foo": 1, "bar": 2}"#);

    let result = validate::evaluate(&validate_args(data.clone(), schema.clone())).unwrap();
    assert!(result.is_valid);
    assert_eq!(validate::run_validate(&validate_args(data, schema)).unwrap(), EXIT_VALID);
}

#[test]
fn all_errors_flag_collects_both_violations() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA_YAML);
    let data = write(dir.path(), "data.json", r#"{"foo": "def", "bar": "abc"}"#);

    let fail_fast = validate::evaluate(&validate_args(data.clone(), schema.clone())).unwrap();
    assert_eq!(fail_fast.error_count(), 1);

    let args = ValidateArgs {
        all_errors: true,
        ..validate_args(data, schema)
    };
    let collected = validate::evaluate(&args).unwrap();
    assert_eq!(collected.error_count(), 2);
    assert_eq!(validate::run_validate(&args).unwrap(), EXIT_INVALID);
}

#[test]
fn no_formats_flag_disables_format_checks() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA_YAML);
    let data = write(dir.path(), "data.json", r#"{"contact": "2962"}"#);

    assert!(!validate::evaluate(&validate_args(data.clone(), schema.clone())).unwrap().is_valid);
    let args = ValidateArgs {
        no_formats: true,
        ..validate_args(data, schema)
    };
    assert!(validate::evaluate(&args).unwrap().is_valid);
}

#[test]
fn options_file_is_forwarded() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.yaml", SCHEMA_YAML);
    let data = write(dir.path(), "data.json", r#"{"foo": "def"}"#);
    let options = write(dir.path(), "options.json", r#"{"verbose": true}"#);

    let args = ValidateArgs {
        options: Some(options),
        ..validate_args(data, schema)
    };
    let result = validate::evaluate(&args).unwrap();
    assert_eq!(result.errors()[0].data, Some(json!("def")));
}

#[test]
fn malformed_schema_is_an_operational_error() {
    let dir = tempfile::tempdir().unwrap();
    let schema = write(dir.path(), "schema.json", r#"{"type": "not-a-type"}"#);
    let data = write(dir.path(), "data.json", "{}");

    let err = validate::run_validate(&validate_args(data, schema)).unwrap_err();
    assert!(format!("{err:#}").contains("schema compilation failed"));
}

#[test]
fn run_executes_an_input_bundle() {
    let dir = tempfile::tempdir().unwrap();
    let bundle = json!({
        "data": {"bar": "abc"},
        "schema": {
            "type": "object",
            "properties": {"foo": {"type": "integer"}, "bar": {"type": "string"}},
            "required": ["foo"]
        }
    });
    let path = write(dir.path(), "bundle.json", &bundle.to_string());

    let args = RunArgs {
        inputs: path,
        compact: true,
    };
    let result = run::evaluate(&args).unwrap();
    assert!(!result.is_valid);
    assert_eq!(result.errors()[0].params["missingProperty"], "foo");
    assert_eq!(run::run_bundle(&args).unwrap(), EXIT_INVALID);
}

#[test]
fn run_reports_missing_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "bundle.yaml", "schema:\n  type: object\n");

    let err = run::evaluate(&RunArgs {
        inputs: path,
        compact: false,
    })
    .unwrap_err();
    assert!(format!("{err:#}").contains("data is required"));
}
