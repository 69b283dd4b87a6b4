//! # Document Loading
//!
//! Reads data, schema and option documents from local files for hosts that
//! keep them on disk. The format follows the file extension: `.yaml` and
//! `.yml` are YAML, everything else is JSON. YAML is converted to the
//! equivalent JSON value tree before it reaches the validator.
//!
//! This is only ever called by hosts; schema compilation itself never
//! touches the filesystem.

use std::path::Path;

use serde_json::{Map, Value};
use thiserror::Error;

/// A document could not be read or parsed.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("failed to read document {path}: {source}")]
    Read {
        /// Path to the document.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The contents are not valid JSON or YAML.
    #[error("failed to parse document {path}: {reason}")]
    Parse {
        /// Path to the document, or `<inline>` for in-memory text.
        path: String,
        /// Human-readable reason.
        reason: String,
    },
}

/// Serialization format of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON text.
    Json,
    /// YAML text (JSON-compatible subset).
    Yaml,
}

impl DocumentFormat {
    /// Pick the format from a file extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Parse in-memory text as a JSON value.
pub fn parse_document(text: &str, format: DocumentFormat) -> Result<Value, DocumentError> {
    parse_named(text, format, "<inline>")
}

/// Read and parse a document from disk.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_named(&content, DocumentFormat::from_path(path), &path.display().to_string())
}

fn parse_named(text: &str, format: DocumentFormat, name: &str) -> Result<Value, DocumentError> {
    let parse_error = |reason: String| DocumentError::Parse {
        path: name.to_string(),
        reason,
    };
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(text).map_err(|e| parse_error(format!("invalid JSON: {e}")))
        }
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value = serde_yaml::from_str(text)
                .map_err(|e| parse_error(format!("invalid YAML: {e}")))?;
            yaml_to_json(yaml, "", name)
        }
    }
}

/// Convert parsed YAML into a JSON value tree.
///
/// Tags are dropped. Number and boolean keys are stringified; other
/// composite keys and non-finite floats are refused with their location.
fn yaml_to_json(
    yaml: serde_yaml::Value,
    location: &str,
    name: &str,
) -> Result<Value, DocumentError> {
    use serde_yaml::Value as Yaml;

    let refuse = |what: String| DocumentError::Parse {
        path: name.to_string(),
        reason: format!("{what} at {}", if location.is_empty() { "(root)" } else { location }),
    };

    Ok(match yaml {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::String(s) => Value::String(s),
        Yaml::Number(n) => {
            yaml_number(&n).ok_or_else(|| refuse(format!("number {n} has no JSON form")))?
        }
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| yaml_to_json(item, &format!("{location}/{i}"), name))
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(mapping) => {
            let mut object = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => {
                        return Err(refuse(format!("{} used as a map key", yaml_kind(&other))));
                    }
                };
                let token = key.replace('~', "~0").replace('/', "~1");
                let child_location = format!("{location}/{token}");
                object.insert(key, yaml_to_json(value, &child_location, name)?);
            }
            Value::Object(object)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value, location, name)?,
    })
}

fn yaml_number(n: &serde_yaml::Number) -> Option<Value> {
    if let Some(i) = n.as_i64() {
        return Some(Value::from(i));
    }
    if let Some(u) = n.as_u64() {
        return Some(Value::from(u));
    }
    n.as_f64().and_then(serde_json::Number::from_f64).map(Value::Number)
}

fn yaml_kind(yaml: &serde_yaml::Value) -> &'static str {
    match yaml {
        serde_yaml::Value::Null => "null",
        serde_yaml::Value::Bool(_) => "boolean",
        serde_yaml::Value::Number(_) => "number",
        serde_yaml::Value::String(_) => "string",
        serde_yaml::Value::Sequence(_) => "sequence",
        serde_yaml::Value::Mapping(_) => "mapping",
        serde_yaml::Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.yaml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("schema")), DocumentFormat::Json);
    }

    #[test]
    fn yaml_converts_to_json() {
        let yaml = r#"
type: object
required: [foo]
properties:
  foo:
    type: integer
    minimum: 0
  ratio:
    type: number
    maximum: 1.5
  enabled:
    const: true
"#;
        let value = parse_document(yaml, DocumentFormat::Yaml).unwrap();
        assert_eq!(value["required"], json!(["foo"]));
        assert_eq!(value["properties"]["foo"]["minimum"], 0);
        assert_eq!(value["properties"]["ratio"]["maximum"], 1.5);
        assert_eq!(value["properties"]["enabled"]["const"], true);
    }

    #[test]
    fn non_string_yaml_keys_are_stringified() {
        let value = parse_document("1: one\ntrue: yes\n", DocumentFormat::Yaml).unwrap();
        assert_eq!(value["1"], "one");
        assert_eq!(value["true"], "yes");
    }

    #[test]
    fn tags_are_dropped() {
        let value = parse_document("when: !date 1963-06-19\n", DocumentFormat::Yaml).unwrap();
        assert_eq!(value, json!({"when": "1963-06-19"}));
    }

    #[test]
    fn non_finite_number_names_its_location() {
        let err = parse_document("limits:\n  - 1\n  - .nan\n", DocumentFormat::Yaml).unwrap_err();
        let DocumentError::Parse { reason, .. } = err else {
            panic!("expected a parse error");
        };
        assert!(reason.ends_with("at /limits/1"), "got {reason}");
    }

    #[test]
    fn composite_key_is_refused() {
        let err = parse_document("? [a, b]\n: 1\n", DocumentFormat::Yaml).unwrap_err();
        let DocumentError::Parse { reason, .. } = err else {
            panic!("expected a parse error");
        };
        assert!(reason.contains("sequence used as a map key"), "got {reason}");
        assert!(reason.ends_with("(root)"), "got {reason}");
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_document("{not json", DocumentFormat::Json).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { ref path, .. } if path == "<inline>"));
    }

    #[test]
    fn load_from_disk() {
        let mut file = tempfile::Builder::new().suffix(".yml").tempfile().unwrap();
        writeln!(file, "foo: 1\nbar: abc").unwrap();
        let value = load_document(file.path()).unwrap();
        assert_eq!(value, json!({"foo": 1, "bar": "abc"}));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
