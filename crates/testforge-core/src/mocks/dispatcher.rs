//! Mock endpoint dispatch: normalize, match, delay, respond.

use crate::mocks::registry::MockRegistry;
use crate::types::mock::{
    normalize_path, MockEndpoint, MockRequest, MockResponse, MockUsageRecord,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};
use tracing::info;

/// Longest request body stored in a usage record.
const MAX_LOGGED_BODY_CHARS: usize = 1000;

/// Number of active mock signatures listed in a 404 payload.
const DISCOVERY_LIMIT: usize = 10;

/// Serves inbound requests from a set of registered mock endpoints.
///
/// Per request: `Normalize → Match → (Found: Delay → Respond) |
/// (NotFound: Respond404)`. The simulated latency is an async suspension, so
/// a delayed mock never occupies a runtime worker thread.
#[derive(Debug, Clone)]
pub struct MockDispatcher {
    registry: MockRegistry,
}

impl MockDispatcher {
    pub fn new(registry: MockRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &MockRegistry {
        &self.registry
    }

    /// Handle one inbound request.
    ///
    /// Always produces exactly one usage record, matched or not; the caller
    /// is responsible for appending it to the usage log.
    pub async fn dispatch(&self, request: &MockRequest) -> (MockResponse, MockUsageRecord) {
        let path = normalize_path(&request.path);
        let method = request.method.to_uppercase();

        info!(%method, %path, "mock request");

        let Some(endpoint) = self.registry.find(&path, &method) else {
            let response = self.not_found_response(&method, &path);
            let record = usage_record(None, &path, &method, response.status, request);
            info!(status = response.status, %method, %path, "mock response");
            return (response, record);
        };

        if endpoint.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(endpoint.delay_ms)).await;
        }

        let mut headers = endpoint.response_headers.clone();
        if !headers.keys().any(|k| k.eq_ignore_ascii_case("content-type")) {
            headers.insert("Content-Type".to_string(), endpoint.content_type());
        }

        let response = MockResponse {
            status: endpoint.response_status_code,
            headers,
            body: endpoint.response_body.clone(),
        };
        let record = usage_record(Some(endpoint), &path, &method, response.status, request);
        info!(status = response.status, %method, %path, "mock response");

        (response, record)
    }

    fn not_found_response(&self, method: &str, path: &str) -> MockResponse {
        let body = json!({
            "error": "Mock API not found",
            "message": format!("No active mock found for {method} {path}"),
            "available_mocks": self.registry.active_signatures(DISCOVERY_LIMIT),
            "suggestion": format!(
                "You can create a mock for {method} {path} in the Mock Server management page."
            ),
        });

        MockResponse {
            status: 404,
            headers: BTreeMap::from([(
                "Content-Type".to_string(),
                "application/json".to_string(),
            )]),
            body: body.to_string(),
        }
    }
}

fn usage_record(
    endpoint: Option<&MockEndpoint>,
    path: &str,
    method: &str,
    status: u16,
    request: &MockRequest,
) -> MockUsageRecord {
    // Sensitive request headers never reach the stored snapshot
    let request_headers = request
        .headers
        .iter()
        .filter(|(name, _)| {
            !name.eq_ignore_ascii_case("authorization") && !name.eq_ignore_ascii_case("cookie")
        })
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect();

    let request_body = if request.body.chars().count() > MAX_LOGGED_BODY_CHARS {
        let capped: String = request.body.chars().take(MAX_LOGGED_BODY_CHARS).collect();
        format!("{capped}...[truncated]")
    } else {
        request.body.clone()
    };

    MockUsageRecord {
        endpoint: endpoint.map(|ep| ep.name.clone()),
        request_path: path.to_string(),
        request_method: method.to_string(),
        request_headers,
        request_body,
        response_status_code: status,
        client_ip: request.client_ip(),
        user_agent: request.header("user-agent").unwrap_or_default().to_string(),
        timestamp: SystemTime::now(),
    }
}
