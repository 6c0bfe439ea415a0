//! Outbound HTTP execution with bounded timeout and failure classification.

use crate::http::response::HttpResponse;
use crate::types::api::{body_is_empty, HttpMethod};
use reqwest::header::{HeaderName, HeaderValue};
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::warn;

/// Fixed execution timeout applied to every single-case execution.
pub const EXECUTION_TIMEOUT_MS: u64 = 30_000;

/// Transport-level failure, classified for reporting.
///
/// Each variant's message is the error text surfaced on the resulting
/// `error`-status [`ExecutionResult`](crate::types::result::ExecutionResult).
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("request timed out")]
    Timeout,
    #[error("connection failed: unable to reach target server")]
    Connection,
    #[error("execution error: {0}")]
    Other(String),
}

impl ExecutorError {
    fn classify(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ExecutorError::Timeout
        } else if err.is_connect() {
            ExecutorError::Connection
        } else {
            ExecutorError::Other(err.to_string())
        }
    }
}

/// Issues one HTTP request per call over a shared client.
#[derive(Debug, Clone)]
pub struct HttpExecutor {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpExecutor {
    /// Executor with the fixed platform timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_millis(EXECUTION_TIMEOUT_MS))
    }

    /// Executor with a hosting-configured timeout. There is no per-test-case
    /// override; the bound applies to every execution.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// Execute one request and snapshot the response.
    ///
    /// The body is attached only for POST/PUT/PATCH and only when non-empty.
    /// Elapsed time covers send through full body read.
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: &str,
        headers: &BTreeMap<String, String>,
        params: &BTreeMap<String, String>,
        body: &serde_json::Value,
    ) -> Result<HttpResponse, ExecutorError> {
        let mut request = self
            .client
            .request(to_reqwest_method(method), url)
            .timeout(self.timeout);

        if !params.is_empty() {
            request = request.query(params);
        }
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes())
                .map_err(|e| ExecutorError::Other(format!("invalid header key `{key}`: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ExecutorError::Other(format!("invalid header value `{value}`: {e}")))?;
            request = request.header(name, value);
        }
        if method.allows_body() && !body_is_empty(body) {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|e| {
            warn!(url, method = %method, error = %e, "request failed");
            ExecutorError::classify(e)
        })?;

        let status = response.status().as_u16();
        let response_headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    value.to_str().unwrap_or("<binary>").to_owned(),
                )
            })
            .collect();
        let bytes = response.bytes().await.map_err(ExecutorError::classify)?;
        let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
            elapsed_ms,
        })
    }
}

impl Default for HttpExecutor {
    fn default() -> Self {
        Self::new()
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}
