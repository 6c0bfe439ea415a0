//! Response snapshot handed to the assertion engine.

use std::collections::BTreeMap;

/// Snapshot of one HTTP response.
///
/// Headers keep the order and casing the transport returned; lookups are
/// case-insensitive, matching how the assertion engine addresses them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers in transport order
    pub headers: Vec<(String, String)>,
    /// Response body decoded as UTF-8 (lossy)
    pub body: String,
    /// Wall-clock time of the request in milliseconds
    pub elapsed_ms: f64,
}

impl HttpResponse {
    /// First value of the named header, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Headers as a map for result snapshots (later duplicates win).
    pub fn headers_map(&self) -> BTreeMap<String, String> {
        self.headers
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Parse the body as JSON.
    pub fn body_json(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}
