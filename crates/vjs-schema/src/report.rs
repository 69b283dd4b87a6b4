//! # Error Record Construction
//!
//! Turns `jsonschema` validation errors into [`ErrorRecord`]s.
//!
//! - `keyword` comes from the error kind; kinds without a fixed keyword fall
//!   back to the last segment of the schema path.
//! - `params` use the conventional diagnostic names (`missingProperty`,
//!   `limit`, `allowedValues`, ...).
//! - `schemaPath` is rendered as a URI fragment (`#/properties/foo/type`).
//!   It is the evaluation path, so it may pass through `$ref`.
//! - `schema`, `parentSchema` and `data` are only filled in verbose mode.
//!   The schema nodes are found by walking the evaluation path and following
//!   local `#...` references; when that fails they are left out.

use jsonschema::error::{TypeKind, ValidationErrorKind};
use jsonschema::ValidationError;
use serde_json::{json, Map, Value};
use vjs_core::ErrorRecord;

/// Which optional diagnostics a record carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSettings {
    /// Include `schema`, `parentSchema` and `data`.
    pub verbose: bool,
    /// Include the human-readable `message`.
    pub messages: bool,
}

impl Default for RecordSettings {
    fn default() -> Self {
        Self {
            verbose: false,
            messages: true,
        }
    }
}

/// Builds records against one root schema.
#[derive(Debug, Clone)]
pub struct Reporter {
    root: Value,
    settings: RecordSettings,
}

impl Reporter {
    /// A reporter for errors raised by a validator compiled from `root`.
    pub fn new(root: Value, settings: RecordSettings) -> Self {
        Self { root, settings }
    }

    /// Convert one engine error.
    pub fn record(&self, error: &ValidationError<'_>) -> ErrorRecord {
        let pointer = error.schema_path.to_string();
        let (keyword, params) = keyword_and_params(&error.kind, &pointer);

        let mut record = ErrorRecord::new(
            keyword,
            error.instance_path.to_string(),
            format!("#{pointer}"),
        );
        record.params = params;

        if let ValidationErrorKind::PropertyNames { error: inner } = &error.kind {
            if let Value::String(name) = &*inner.instance {
                record.property_name = Some(name.clone());
            }
        }
        if self.settings.messages {
            record.message = Some(error.to_string());
        }
        if self.settings.verbose {
            record.schema = self.resolve(&pointer).cloned();
            record.parent_schema = self.resolve(parent_pointer(&pointer)).cloned();
            record.data = Some(Value::clone(&error.instance));
        }
        record
    }

    /// Schema node at an evaluation path, following local references.
    fn resolve(&self, pointer: &str) -> Option<&Value> {
        let mut node = &self.root;
        for token in pointer.split('/').skip(1) {
            let token = unescape(token);
            node = match node {
                Value::Object(map) => match map.get(&token)? {
                    Value::String(reference) if token == "$ref" => self.local_ref(reference)?,
                    child => child,
                },
                Value::Array(items) => items.get(token.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(node)
    }

    /// Target of a same-document reference such as `#/$defs/item`.
    fn local_ref(&self, reference: &str) -> Option<&Value> {
        match reference.strip_prefix('#')? {
            "" => Some(&self.root),
            fragment => self.root.pointer(fragment),
        }
    }
}

/// Keyword name and diagnostic params for an error kind.
fn keyword_and_params(kind: &ValidationErrorKind, pointer: &str) -> (String, Map<String, Value>) {
    let (keyword, params) = match kind {
        ValidationErrorKind::Required { property, .. } => {
            ("required", json!({ "missingProperty": property }))
        }
        ValidationErrorKind::Type { kind } => {
            let expected = match kind {
                TypeKind::Single(ty) => ty.to_string(),
                TypeKind::Multiple(types) => (*types)
                    .into_iter()
                    .map(|ty| ty.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            };
            ("type", json!({ "type": expected }))
        }
        ValidationErrorKind::AdditionalProperties { unexpected, .. } => {
            let mut params = json!({ "additionalProperties": unexpected });
            if let [single] = unexpected.as_slice() {
                params["additionalProperty"] = json!(single);
            }
            ("additionalProperties", params)
        }
        ValidationErrorKind::Format { format, .. } => ("format", json!({ "format": format })),
        ValidationErrorKind::Pattern { pattern, .. } => ("pattern", json!({ "pattern": pattern })),
        ValidationErrorKind::Enum { options, .. } => ("enum", json!({ "allowedValues": options })),
        ValidationErrorKind::Constant { expected_value, .. } => {
            ("const", json!({ "allowedValue": expected_value }))
        }
        ValidationErrorKind::MinLength { limit, .. } => ("minLength", json!({ "limit": limit })),
        ValidationErrorKind::MaxLength { limit, .. } => ("maxLength", json!({ "limit": limit })),
        ValidationErrorKind::MinItems { limit, .. } => ("minItems", json!({ "limit": limit })),
        ValidationErrorKind::MaxItems { limit, .. } => ("maxItems", json!({ "limit": limit })),
        ValidationErrorKind::MinProperties { limit, .. } => {
            ("minProperties", json!({ "limit": limit }))
        }
        ValidationErrorKind::MaxProperties { limit, .. } => {
            ("maxProperties", json!({ "limit": limit }))
        }
        ValidationErrorKind::Minimum { limit, .. } => {
            ("minimum", json!({ "comparison": ">=", "limit": limit }))
        }
        ValidationErrorKind::Maximum { limit, .. } => {
            ("maximum", json!({ "comparison": "<=", "limit": limit }))
        }
        ValidationErrorKind::ExclusiveMinimum { limit, .. } => {
            ("exclusiveMinimum", json!({ "comparison": ">", "limit": limit }))
        }
        ValidationErrorKind::ExclusiveMaximum { limit, .. } => {
            ("exclusiveMaximum", json!({ "comparison": "<", "limit": limit }))
        }
        ValidationErrorKind::MultipleOf { multiple_of, .. } => {
            ("multipleOf", json!({ "multipleOf": multiple_of }))
        }
        ValidationErrorKind::AdditionalItems { limit, .. } => {
            ("additionalItems", json!({ "limit": limit }))
        }
        ValidationErrorKind::UniqueItems { .. } => ("uniqueItems", json!({})),
        ValidationErrorKind::Contains { .. } => ("contains", json!({})),
        ValidationErrorKind::Not { .. } => ("not", json!({})),
        ValidationErrorKind::AnyOf { .. } => ("anyOf", json!({})),
        ValidationErrorKind::OneOfNotValid { .. }
        | ValidationErrorKind::OneOfMultipleValid { .. } => ("oneOf", json!({})),
        ValidationErrorKind::FalseSchema { .. } => ("false schema", json!({})),
        ValidationErrorKind::PropertyNames { .. } => ("propertyNames", json!({})),
        _ => return (keyword_from_pointer(pointer), Map::new()),
    };
    let params = match params {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    (keyword.to_string(), params)
}

/// Last reference token of a JSON Pointer, unescaped.
fn keyword_from_pointer(pointer: &str) -> String {
    match pointer.rsplit('/').next() {
        Some(token) if !token.is_empty() => unescape(token),
        _ => "schema".to_string(),
    }
}

fn unescape(token: &str) -> String {
    token.replace("~1", "/").replace("~0", "~")
}

/// Pointer to the object holding the last reference token.
fn parent_pointer(pointer: &str) -> &str {
    pointer.rfind('/').map_or("", |idx| &pointer[..idx])
}
