//! Variable resolution: `{{name}}` and legacy `{name}` substitution.
//!
//! Resolution is a single lexical pass per representation; variables never
//! expand recursively. The legacy single-brace pass exists for backward
//! compatibility with older test cases and runs AFTER the `{{name}}` pass,
//! variable by variable in map iteration order (sorted, since variable maps
//! are `BTreeMap`s). It does not check delimiters, so it can re-match text
//! produced by the first pass; see the compatibility tests pinning this.

use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;

/// Substitute variables into a string.
///
/// `{{name}}` tokens are replaced when `name` is present, otherwise the
/// literal token is kept. Every variable is then replaced in its legacy
/// `{name}` form wherever it appears.
pub fn resolve_str(input: &str, variables: &BTreeMap<String, String>) -> String {
    let pattern = Regex::new(r"\{\{(\w+)\}\}").expect("valid regex");
    let mut resolved = pattern
        .replace_all(input, |caps: &regex::Captures| {
            let name = &caps[1];
            variables
                .get(name)
                .cloned()
                .unwrap_or_else(|| caps[0].to_owned())
        })
        .into_owned();

    // Legacy {name} form, kept for pre-{{ }} test cases
    for (name, value) in variables {
        resolved = resolved.replace(&format!("{{{name}}}"), value);
    }

    resolved
}

/// Substitute variables into every value of a string map (keys unchanged).
pub fn resolve_map(
    map: &BTreeMap<String, String>,
    variables: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    map.iter()
        .map(|(k, v)| (k.clone(), resolve_str(v, variables)))
        .collect()
}

/// Substitute variables into a JSON value, preserving its shape.
///
/// Objects resolve every value, arrays every element, strings via
/// [`resolve_str`]; numbers, booleans, and null pass through unchanged.
pub fn resolve_value(value: &Value, variables: &BTreeMap<String, String>) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), resolve_value(v, variables)))
                .collect(),
        ),
        Value::Array(items) => Value::Array(
            items.iter().map(|item| resolve_value(item, variables)).collect(),
        ),
        Value::String(s) => Value::String(resolve_str(s, variables)),
        other => other.clone(),
    }
}

/// Merge variable sources in ascending precedence order.
///
/// Later sources override earlier ones key-for-key: case defaults, then
/// data-row values, then environment values (environment always wins).
pub fn merge_variables(sources: &[&BTreeMap<String, String>]) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for source in sources {
        for (k, v) in source.iter() {
            merged.insert(k.clone(), v.clone());
        }
    }
    merged
}
