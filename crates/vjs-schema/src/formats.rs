//! # String Format Checkers
//!
//! The `jsonschema` crate ships checkers for the standard formats (email,
//! date, time, date-time, duration, uri, uri-reference, uri-template, iri,
//! uuid, hostname, ipv4, ipv6, regex, json-pointer, ...). This module
//! registers the common extras it lacks, so schemas written for other
//! validators keep being enforced:
//!
//! | format                      | accepts                                          |
//! |-----------------------------|--------------------------------------------------|
//! | `iso-time`                  | `HH:MM:SS[.frac]` with an optional time zone     |
//! | `iso-date-time`             | full date, `T`/space, then `iso-time`            |
//! | `byte`                      | padded base64                                    |
//! | `json-pointer-uri-fragment` | `#` followed by a percent-encoded JSON Pointer   |
//! | `binary`, `password`        | any string                                       |
//!
//! Format checks only apply to string instances; the engine skips them for
//! every other type.

use std::sync::OnceLock;

use chrono::NaiveDate;
use jsonschema::ValidationOptions;
use regex::Regex;

/// A string format checker.
pub type FormatCheck = fn(&str) -> bool;

/// Formats registered on top of the engine's built-in set.
pub const EXTRA_FORMATS: &[(&str, FormatCheck)] = &[
    ("iso-time", is_iso_time),
    ("iso-date-time", is_iso_date_time),
    ("byte", is_byte),
    ("json-pointer-uri-fragment", is_json_pointer_uri_fragment),
    ("binary", accept_any),
    ("password", accept_any),
];

/// Register every extra format on `options`.
pub(crate) fn register_extra_formats(options: &mut ValidationOptions) {
    for &(name, check) in EXTRA_FORMATS {
        options.with_format(name, check);
    }
}

fn time_regex() -> &'static Regex {
    static TIME: OnceLock<Regex> = OnceLock::new();
    TIME.get_or_init(|| {
        Regex::new(r"^(\d{2}):(\d{2}):(\d{2})(?:\.\d+)?(?:[zZ]|([+-])(\d{2}):?(\d{2}))?$")
            .expect("time pattern is valid")
    })
}

fn byte_regex() -> &'static Regex {
    static BYTE: OnceLock<Regex> = OnceLock::new();
    BYTE.get_or_init(|| {
        Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{2}==|[A-Za-z0-9+/]{3}=)?$")
            .expect("base64 pattern is valid")
    })
}

fn fragment_regex() -> &'static Regex {
    static FRAGMENT: OnceLock<Regex> = OnceLock::new();
    FRAGMENT.get_or_init(|| {
        Regex::new(r"(?i)^#(?:/(?:[a-z0-9_\-.!$&'()*+,;:=@]|%[0-9a-f]{2}|~0|~1)*)*$")
            .expect("fragment pattern is valid")
    })
}

/// Time of day with an optional zone. Leap seconds (`:60`) are accepted.
pub fn is_iso_time(value: &str) -> bool {
    let Some(caps) = time_regex().captures(value) else {
        return false;
    };
    let field = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<u32>().ok());
    let (Some(hour), Some(minute), Some(second)) = (field(1), field(2), field(3)) else {
        return false;
    };
    if hour > 23 || minute > 59 || second > 60 {
        return false;
    }
    match (field(5), field(6)) {
        (Some(zone_hour), Some(zone_minute)) => zone_hour <= 23 && zone_minute <= 59,
        _ => true,
    }
}

/// Calendar date and time of day, separated by `T`, `t` or a space.
pub fn is_iso_date_time(value: &str) -> bool {
    let Some(split) = value.find(['T', 't', ' ']) else {
        return false;
    };
    let (date, time) = (&value[..split], &value[split + 1..]);
    date.len() == 10 && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok() && is_iso_time(time)
}

/// Padded base64.
pub fn is_byte(value: &str) -> bool {
    byte_regex().is_match(value)
}

/// A JSON Pointer in URI fragment form, e.g. `#/definitions/foo%20bar`.
pub fn is_json_pointer_uri_fragment(value: &str) -> bool {
    fragment_regex().is_match(value)
}

fn accept_any(_: &str) -> bool {
    true
}
