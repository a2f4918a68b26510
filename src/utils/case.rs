// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Conversion between `snake_case` and `camelCase`, for names and JSON keys.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

static CAPITALIZED_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(.)([A-Z][a-z]+)").expect("CAPITALIZED_RUN regex should compile"));
static LOWER_UPPER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z0-9])([A-Z])").expect("LOWER_UPPER regex should compile"));

/// Convert a `camelCase`/`PascalCase` name to `snake_case`.
///
/// Consecutive capitals are treated as one word, so `fooBAR` becomes
/// `foo_bar`. Applying it twice changes nothing.
///
/// ```
/// assert_eq!(textkit::snakify("aaBbCc"), "aa_bb_cc");
/// ```
pub fn snakify(name: &str) -> String {
    let name = CAPITALIZED_RUN.replace_all(name, "${1}_${2}");
    LOWER_UPPER.replace_all(&name, "${1}_${2}").to_lowercase()
}

/// Convert a `snake_case` name to `camelCase`.
///
/// The first segment is kept verbatim and a leading underscore survives as a
/// prefix: `_foo_bar` becomes `_fooBar`.
///
/// ```
/// assert_eq!(textkit::camelize("foo_bar"), "fooBar");
/// ```
pub fn camelize(name: &str) -> String {
    camelize_with(name, capitalize)
}

fn camelize_with(name: &str, segment: fn(&str) -> String) -> String {
    let (prefix, rest) = match name.strip_prefix('_') {
        Some(rest) => ("_", rest),
        None => ("", name),
    };
    let mut parts = rest.split('_');
    let mut out = String::with_capacity(name.len());
    out.push_str(prefix);
    if let Some(first) = parts.next() {
        out.push_str(first);
    }
    for part in parts {
        out.push_str(&segment(part));
    }
    out
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn capitalize_key_segment(word: &str) -> String {
    capitalize(word).replace("Url", "URL")
}

fn camelize_key(key: &str) -> String {
    if key.starts_with('_') {
        return key.to_string();
    }
    camelize_with(key, capitalize_key_segment)
}

/// Return a copy of `value` with every object key camelized.
///
/// Values are untouched; nested objects inside arrays are visited too. Keys
/// starting with `_` are kept, and `url` at the start of any non-leading
/// segment becomes `URL` (`avatar_urls` → `avatarURLs`).
///
/// ```
/// use serde_json::json;
///
/// let out = textkit::camelize_keys(&json!({"avatar_url": "x"}));
/// assert_eq!(out, json!({"avatarURL": "x"}));
/// ```
pub fn camelize_keys(value: &Value) -> Value {
    map_keys(value, &camelize_key)
}

/// Return a copy of `value` with every object key snakified.
pub fn snakify_keys(value: &Value) -> Value {
    map_keys(value, &snakify)
}

fn map_keys(value: &Value, convert: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, inner)| (convert(key), map_keys(inner, convert)))
                .collect::<Map<String, Value>>(),
        ),
        Value::Array(items) => Value::Array(items.iter().map(|v| map_keys(v, convert)).collect()),
        scalar => scalar.clone(),
    }
}
