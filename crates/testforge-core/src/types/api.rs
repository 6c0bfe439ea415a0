//! API definitions and test cases.

use crate::types::assertion::AssertionRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// HTTP method for requests and mock matching
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
}

impl HttpMethod {
    /// Upper-case wire name of the method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
        }
    }

    /// Parse a method name, accepting any letter case.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Some(HttpMethod::Get),
            "POST" => Some(HttpMethod::Post),
            "PUT" => Some(HttpMethod::Put),
            "PATCH" => Some(HttpMethod::Patch),
            "DELETE" => Some(HttpMethod::Delete),
            "HEAD" => Some(HttpMethod::Head),
            "OPTIONS" => Some(HttpMethod::Options),
            _ => None,
        }
    }

    /// Whether a request body is sent for this method.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API definition shared by many test cases.
///
/// Carries the URL template and the default headers/params/body every test
/// case of this API starts from. Immutable per execution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiDefinition {
    /// Display name of the API
    pub name: String,
    /// URL template, may contain `{{variable}}` placeholders
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Default request headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Default query parameters
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Default request body (JSON)
    #[serde(default)]
    pub body: serde_json::Value,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Owning module/group label
    #[serde(default)]
    pub module: String,
}

/// A single authored test case against one [`ApiDefinition`].
///
/// Never mutated by the engine; overrides are merged over the definition at
/// execution time (case wins on key collision).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiTestCase {
    /// Display name of the case
    pub name: String,
    /// Header overrides merged over the definition's headers
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Query parameter overrides merged over the definition's params
    #[serde(default)]
    pub params: BTreeMap<String, String>,
    /// Body override; used instead of the definition's body when non-empty
    #[serde(default)]
    pub body: serde_json::Value,
    /// Custom assertion rules, evaluated in list order
    #[serde(default)]
    pub assertions: Vec<AssertionRule>,
    /// Default variables, lowest precedence in the merge
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
    /// Expected HTTP status code
    #[serde(default = "default_expected_status")]
    pub expected_status_code: u16,
    /// Optional upper bound on response time, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response_time_ms: Option<f64>,
    /// Disabled cases short-circuit to an error result
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

fn default_expected_status() -> u16 {
    200
}

fn default_active() -> bool {
    true
}

/// True when a JSON body counts as absent for request-building purposes.
pub fn body_is_empty(body: &serde_json::Value) -> bool {
    match body {
        serde_json::Value::Null => true,
        serde_json::Value::String(s) => s.is_empty(),
        serde_json::Value::Object(map) => map.is_empty(),
        serde_json::Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
