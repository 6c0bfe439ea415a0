//! Mock endpoint definitions, inbound request views, and usage records.

use crate::types::api::HttpMethod;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::SystemTime;

/// Normalize a mock path: ensure a leading slash, strip exactly one trailing
/// slash unless the path is the root `/`.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// Invalid mock endpoint configuration
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidMockEndpoint {
    #[error("path must start with /: {0}")]
    Path(String),
    #[error("status code must be within 100-599: {0}")]
    StatusCode(u16),
}

/// A stored (path, method) to canned-response mapping.
///
/// The (path, method) pair is unique across active and inactive endpoints;
/// uniqueness is enforced by the persistence layer, not the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockEndpoint {
    /// Display name
    pub name: String,
    /// URL path, stored normalized (leading slash, no trailing slash)
    pub path: String,
    /// HTTP method to match
    pub method: HttpMethod,
    /// Status code of the canned response
    #[serde(default = "default_status_code")]
    pub response_status_code: u16,
    /// Response headers; an explicit Content-Type here wins over inference
    #[serde(default)]
    pub response_headers: BTreeMap<String, String>,
    /// Response body, returned verbatim (no templating)
    #[serde(default)]
    pub response_body: String,
    /// Simulated latency in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
    /// Inactive endpoints never match
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Free-form description
    #[serde(default)]
    pub description: String,
}

fn default_status_code() -> u16 {
    200
}

fn default_active() -> bool {
    true
}

impl MockEndpoint {
    /// Apply path/method normalization, returning the endpoint.
    pub fn normalized(mut self) -> Self {
        self.path = normalize_path(&self.path);
        self
    }

    /// Check configured invariants (normalized path, status range).
    pub fn validate(&self) -> Result<(), InvalidMockEndpoint> {
        if !self.path.starts_with('/') {
            return Err(InvalidMockEndpoint::Path(self.path.clone()));
        }
        if !(100..=599).contains(&self.response_status_code) {
            return Err(InvalidMockEndpoint::StatusCode(self.response_status_code));
        }
        Ok(())
    }

    /// Effective Content-Type of the response.
    ///
    /// An explicit header wins; otherwise inferred from the body: valid JSON,
    /// XML-looking (`<` prefix), or plain text. Empty bodies are plain text.
    pub fn content_type(&self) -> String {
        if let Some(explicit) = self
            .response_headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone())
        {
            return explicit;
        }
        if self.response_body.is_empty() {
            return "text/plain".to_owned();
        }
        if serde_json::from_str::<serde_json::Value>(&self.response_body).is_ok() {
            return "application/json".to_owned();
        }
        if self.response_body.trim_start().starts_with('<') {
            return "application/xml".to_owned();
        }
        "text/plain".to_owned()
    }

    /// Full URL the hosting server exposes this mock under.
    pub fn full_url(&self) -> String {
        format!("/mock{}", self.path)
    }

    /// Signature listed in 404 discovery payloads: `METHOD /path (name)`.
    pub fn signature(&self) -> String {
        format!("{} {} ({})", self.method, self.path, self.name)
    }
}

/// Inbound request as seen by the dispatcher.
///
/// Headers keep transport order and casing; `method` is the raw token and is
/// upper-cased during matching.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockRequest {
    pub path: String,
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
    pub remote_addr: String,
}

impl MockRequest {
    /// First value of the named header, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Client IP: first `X-Forwarded-For` entry, else the remote address.
    pub fn client_ip(&self) -> String {
        self.header("x-forwarded-for")
            .and_then(|chain| chain.split(',').next())
            .map(|ip| ip.trim().to_owned())
            .filter(|ip| !ip.is_empty())
            .unwrap_or_else(|| self.remote_addr.clone())
    }
}

/// Synthesized response for an inbound mock request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

/// One row per inbound request served or rejected by the dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MockUsageRecord {
    /// Name of the matched endpoint, `None` on a miss
    pub endpoint: Option<String>,
    /// Normalized request path
    pub request_path: String,
    /// Upper-cased request method
    pub request_method: String,
    /// Request headers minus Authorization/Cookie
    pub request_headers: BTreeMap<String, String>,
    /// Request body, capped at 1000 characters with a truncation marker
    pub request_body: String,
    pub response_status_code: u16,
    pub client_ip: String,
    #[serde(default)]
    pub user_agent: String,
    pub timestamp: SystemTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn endpoint(body: &str, headers: &[(&str, &str)]) -> MockEndpoint {
        MockEndpoint {
            name: "sample".to_string(),
            path: "/mock/a".to_string(),
            method: HttpMethod::Get,
            response_status_code: 200,
            response_headers: headers
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            response_body: body.to_string(),
            delay_ms: 0,
            is_active: true,
            description: String::new(),
        }
    }

    #[rstest]
    #[case("/api/users", "/api/users")]
    #[case("api/users", "/api/users")]
    #[case("/api/users/", "/api/users")]
    #[case("/api/users//", "/api/users/")]
    #[case("/", "/")]
    #[case("", "/")]
    fn test_normalize_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_path(input), expected);
    }

    #[rstest]
    #[case("", "text/plain")]
    #[case("plain text", "text/plain")]
    #[case("{\"ok\": true}", "application/json")]
    #[case("[1, 2]", "application/json")]
    #[case("<note>hi</note>", "application/xml")]
    #[case("  <xml/>", "application/xml")]
    fn test_content_type_inference(#[case] body: &str, #[case] expected: &str) {
        assert_eq!(endpoint(body, &[]).content_type(), expected);
    }

    #[rstest]
    fn test_content_type_explicit_header_wins() {
        let ep = endpoint("{\"ok\": true}", &[("content-type", "text/csv")]);
        assert_eq!(ep.content_type(), "text/csv");
    }

    #[rstest]
    fn test_validate_rejects_bad_status() {
        let mut ep = endpoint("", &[]);
        ep.response_status_code = 99;
        assert_eq!(ep.validate(), Err(InvalidMockEndpoint::StatusCode(99)));

        ep.response_status_code = 600;
        assert!(ep.validate().is_err());

        ep.response_status_code = 599;
        assert!(ep.validate().is_ok());
    }

    #[rstest]
    fn test_signature_and_full_url() {
        let ep = endpoint("", &[]);
        assert_eq!(ep.signature(), "GET /mock/a (sample)");
        assert_eq!(ep.full_url(), "/mock/mock/a");
    }

    #[rstest]
    fn test_client_ip_prefers_forwarded_for() {
        let request = MockRequest {
            headers: vec![("X-Forwarded-For".to_string(), "10.0.0.1, 10.0.0.2".to_string())],
            remote_addr: "127.0.0.1".to_string(),
            ..MockRequest::default()
        };
        assert_eq!(request.client_ip(), "10.0.0.1");

        let bare = MockRequest {
            remote_addr: "127.0.0.1".to_string(),
            ..MockRequest::default()
        };
        assert_eq!(bare.client_ip(), "127.0.0.1");
    }
}
