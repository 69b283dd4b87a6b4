//! # Validator Options
//!
//! An open configuration map forwarded verbatim to the validation engine.
//!
//! The map is deliberately untyped: this crate does not know which keys an
//! engine honours, so keys unknown here stay reachable for engines that do.
//! The typed accessors only check the *shape* of a key when an engine asks
//! for it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{json_type_name, OptionsError};

/// Open option map handed to the engine as-is.
///
/// Serializes transparently as a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidatorOptions(Map<String, Value>);

impl ValidatorOptions {
    /// An empty option map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Insert or replace a key, returning the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Raw value of a key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// All keys, in insertion order of the underlying map.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keys are set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&mut self, other: ValidatorOptions) {
        for (key, value) in other.0 {
            self.0.insert(key, value);
        }
    }

    /// Read a boolean option. `null` counts as unset.
    pub fn bool_flag(&self, key: &str) -> Result<Option<bool>, OptionsError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(wrong_type(key, "boolean", other)),
        }
    }

    /// Read a string option. `null` counts as unset.
    pub fn str_value(&self, key: &str) -> Result<Option<&str>, OptionsError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(wrong_type(key, "string", other)),
        }
    }

    /// Read an object option. `null` counts as unset.
    pub fn object_value(&self, key: &str) -> Result<Option<&Map<String, Value>>, OptionsError> {
        match self.get(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map)),
            Some(other) => Err(wrong_type(key, "object", other)),
        }
    }
}

fn wrong_type(key: &str, expected: &'static str, found: &Value) -> OptionsError {
    OptionsError::WrongType {
        key: key.to_string(),
        expected,
        found: json_type_name(found),
    }
}

impl From<Map<String, Value>> for ValidatorOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for ValidatorOptions {
    type Error = OptionsError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(OptionsError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }
}
