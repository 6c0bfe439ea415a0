//! Assertion rules and their evaluation results.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Assertion type, closed over the supported checks.
///
/// The external authoring format carries the type as a string; unknown
/// strings are preserved in [`AssertionKind::Unknown`] so the engine can
/// report them instead of rejecting the rule at parse time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum AssertionKind {
    StatusCode,
    ResponseTime,
    JsonPath,
    Contains,
    NotContains,
    Header,
    Unknown(String),
}

impl AssertionKind {
    /// Wire name of the assertion type.
    pub fn as_str(&self) -> &str {
        match self {
            AssertionKind::StatusCode => "status_code",
            AssertionKind::ResponseTime => "response_time",
            AssertionKind::JsonPath => "json_path",
            AssertionKind::Contains => "contains",
            AssertionKind::NotContains => "not_contains",
            AssertionKind::Header => "header",
            AssertionKind::Unknown(other) => other,
        }
    }
}

impl From<String> for AssertionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "status_code" => AssertionKind::StatusCode,
            "response_time" => AssertionKind::ResponseTime,
            "json_path" => AssertionKind::JsonPath,
            "contains" => AssertionKind::Contains,
            "not_contains" => AssertionKind::NotContains,
            "header" => AssertionKind::Header,
            _ => AssertionKind::Unknown(s),
        }
    }
}

impl From<AssertionKind> for String {
    fn from(kind: AssertionKind) -> Self {
        kind.as_str().to_owned()
    }
}

/// A single authored assertion rule.
///
/// External shape: `{"type": "...", "field": "a.b.0", "expected": <any>,
/// "header_name": "..."}`. `field` is a dot path for `json_path`;
/// `header_name` applies to `header` rules only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionRule {
    /// Assertion type
    #[serde(rename = "type")]
    pub kind: AssertionKind,
    /// Dot path into the JSON response body
    #[serde(default)]
    pub field: String,
    /// Expected value, compared per the assertion type
    #[serde(default)]
    pub expected: Value,
    /// Response header to inspect (header rules)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_name: Option<String>,
}

/// Outcome of evaluating one assertion against a response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssertionResult {
    /// Assertion type
    #[serde(rename = "type")]
    pub kind: AssertionKind,
    /// Field or header the rule targeted, when applicable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Expected value as recorded for the report
    pub expected: Value,
    /// Observed value
    pub actual: Value,
    /// Whether the check held
    pub passed: bool,
    /// Human-readable outcome
    pub message: String,
}
