//! # jsonschema Engine Adapter
//!
//! [`JsonSchemaEngine`] implements [`SchemaEngine`] on top of the
//! `jsonschema` crate. Every `compile` call builds a fresh
//! `ValidationOptions`, so no state survives between calls.
//!
//! ## Recognised Options
//!
//! | key                    | type             | effect                                      |
//! |------------------------|------------------|---------------------------------------------|
//! | `allErrors`            | boolean          | collect every violation, not just the first |
//! | `validateFormats`      | boolean          | default `true`                              |
//! | `ignoreUnknownFormats` | boolean          | engine default when unset                   |
//! | `formats`              | object of regex  | extra string formats                        |
//! | `draft`                | string           | force a draft instead of `$schema` detection |
//! | `verbose`              | boolean          | add `schema`, `parentSchema`, `data`        |
//! | `messages`             | boolean          | default `true`; `false` drops `message`     |
//!
//! Unrecognised keys are left alone and logged at `debug`.
//!
//! ## Reference Resolution
//!
//! A retriever that refuses every external URI is installed, so compiling
//! never touches the network or the filesystem. Internal `#/...` references
//! and the bundled draft meta-schemas resolve natively.

use jsonschema::{Draft, Retrieve, Uri, ValidationOptions, Validator};
use regex::Regex;
use serde_json::Value;
use tracing::{debug, trace};
use vjs_core::{ErrorRecord, OptionsError, SchemaError, ValidateError, ValidatorOptions};

use crate::engine::{CompiledSchema, SchemaEngine};
use crate::formats;
use crate::report::{RecordSettings, Reporter};

/// Option keys this adapter reads.
pub const RECOGNISED_OPTIONS: &[&str] = &[
    "allErrors",
    "validateFormats",
    "ignoreUnknownFormats",
    "formats",
    "draft",
    "verbose",
    "messages",
];

/// Retriever that refuses every external `$ref`.
struct OfflineRetriever;

impl Retrieve for OfflineRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        Err(format!("external schema retrieval is disabled: {}", uri.as_str()).into())
    }
}

/// Engine settings read from the open option map.
#[derive(Debug, Clone)]
struct EngineSettings {
    all_errors: bool,
    validate_formats: bool,
    ignore_unknown_formats: Option<bool>,
    draft: Option<Draft>,
    custom_formats: Vec<(String, Regex)>,
    records: RecordSettings,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            all_errors: false,
            validate_formats: true,
            ignore_unknown_formats: None,
            draft: None,
            custom_formats: Vec::new(),
            records: RecordSettings::default(),
        }
    }
}

impl EngineSettings {
    fn from_options(options: Option<&ValidatorOptions>) -> Result<Self, OptionsError> {
        let mut settings = Self::default();
        let Some(options) = options else {
            return Ok(settings);
        };

        for key in options.keys() {
            if !RECOGNISED_OPTIONS.contains(&key) {
                debug!(option = key, "option not recognised by the jsonschema engine; ignored");
            }
        }

        if let Some(all) = options.bool_flag("allErrors")? {
            settings.all_errors = all;
        }
        if let Some(validate) = options.bool_flag("validateFormats")? {
            settings.validate_formats = validate;
        }
        settings.ignore_unknown_formats = options.bool_flag("ignoreUnknownFormats")?;
        if let Some(draft) = options.str_value("draft")? {
            settings.draft = Some(parse_draft(draft)?);
        }
        if let Some(verbose) = options.bool_flag("verbose")? {
            settings.records.verbose = verbose;
        }
        if let Some(messages) = options.bool_flag("messages")? {
            settings.records.messages = messages;
        }
        if let Some(formats) = options.object_value("formats")? {
            for (name, pattern) in formats {
                let Value::String(pattern) = pattern else {
                    return Err(OptionsError::WrongType {
                        key: format!("formats.{name}"),
                        expected: "string",
                        found: vjs_core::json_type_name(pattern),
                    });
                };
                let regex = Regex::new(pattern).map_err(|e| OptionsError::InvalidFormatPattern {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
                settings.custom_formats.push((name.clone(), regex));
            }
        }

        Ok(settings)
    }

    fn build_options(&self) -> ValidationOptions {
        let mut opts = jsonschema::options();
        opts.should_validate_formats(self.validate_formats);
        opts.with_retriever(OfflineRetriever);
        if let Some(draft) = self.draft {
            opts.with_draft(draft);
        }
        if let Some(ignore) = self.ignore_unknown_formats {
            opts.should_ignore_unknown_formats(ignore);
        }
        formats::register_extra_formats(&mut opts);
        // Caller formats go last so they override a same-named extra.
        for (name, regex) in &self.custom_formats {
            let regex = regex.clone();
            opts.with_format(name.clone(), move |value: &str| regex.is_match(value));
        }
        opts
    }
}

/// Map a draft name to a [`Draft`]. Accepts `draft7`, `draft-07`, `7`,
/// `draft2020-12`, `2020-12` and similar spellings.
fn parse_draft(name: &str) -> Result<Draft, OptionsError> {
    let normalized: String = name
        .trim()
        .to_ascii_lowercase()
        .trim_start_matches("draft")
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect();
    match normalized.trim_start_matches('0') {
        "4" => Ok(Draft::Draft4),
        "6" => Ok(Draft::Draft6),
        "7" => Ok(Draft::Draft7),
        "201909" => Ok(Draft::Draft201909),
        "202012" => Ok(Draft::Draft202012),
        _ => Err(OptionsError::UnsupportedValue {
            key: "draft".to_string(),
            value: name.to_string(),
        }),
    }
}

/// [`SchemaEngine`] backed by the `jsonschema` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSchemaEngine;

impl SchemaEngine for JsonSchemaEngine {
    type Compiled = CompiledJsonSchema;

    fn compile(
        &self,
        schema: &Value,
        options: Option<&ValidatorOptions>,
    ) -> Result<CompiledJsonSchema, ValidateError> {
        let settings = EngineSettings::from_options(options)?;
        debug!(
            all_errors = settings.all_errors,
            validate_formats = settings.validate_formats,
            custom_formats = settings.custom_formats.len(),
            "compiling schema"
        );

        let validator = settings.build_options().build(schema).map_err(|e| {
            // Meta-schema failures report the offending schema location as
            // the instance path.
            let location = e.instance_path.to_string();
            SchemaError::new(e.to_string()).at(location)
        })?;

        Ok(CompiledJsonSchema {
            validator,
            reporter: Reporter::new(schema.clone(), settings.records),
            all_errors: settings.all_errors,
        })
    }
}

/// A schema compiled by [`JsonSchemaEngine`].
pub struct CompiledJsonSchema {
    validator: Validator,
    reporter: Reporter,
    all_errors: bool,
}

impl std::fmt::Debug for CompiledJsonSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledJsonSchema")
            .field("all_errors", &self.all_errors)
            .finish_non_exhaustive()
    }
}

impl CompiledSchema for CompiledJsonSchema {
    fn validate(&self, data: &Value) -> Option<Vec<ErrorRecord>> {
        let limit = if self.all_errors { usize::MAX } else { 1 };
        let records: Vec<ErrorRecord> = self
            .validator
            .iter_errors(data)
            .take(limit)
            .map(|error| {
                let record = self.reporter.record(&error);
                trace!(keyword = %record.keyword, instance_path = %record.instance_path, "violation");
                record
            })
            .collect();
        (!records.is_empty()).then_some(records)
    }
}
