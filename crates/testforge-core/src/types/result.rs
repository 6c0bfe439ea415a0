//! Execution results.

use crate::types::assertion::AssertionResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Overall status of one execution.
///
/// `Failed` is an expected business outcome (an assertion did not hold);
/// `Error` covers configuration and transport failures.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed,
    Error,
}

impl CaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "passed",
            CaseStatus::Failed => "failed",
            CaseStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one HTTP execution attempt (or of a whole data-driven run,
/// when used as a summary).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExecutionResult {
    pub status: CaseStatus,
    /// HTTP status code of the response, absent on transport errors
    pub response_code: Option<u16>,
    /// Wall-clock response time in milliseconds, absent on transport errors
    pub response_time_ms: Option<f64>,
    /// Response body snapshot (or the summary payload for data-driven runs)
    #[serde(default)]
    pub response_body: String,
    /// Response headers snapshot
    #[serde(default)]
    pub response_headers: BTreeMap<String, String>,
    /// Per-assertion outcomes, in evaluation order
    #[serde(default)]
    pub assertion_results: Vec<AssertionResult>,
    /// First failing check's message, empty when passed
    #[serde(default)]
    pub error_message: String,
}

impl ExecutionResult {
    /// Result for a run that never produced a response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: CaseStatus::Error,
            response_code: None,
            response_time_ms: None,
            response_body: String::new(),
            response_headers: BTreeMap::new(),
            assertion_results: Vec::new(),
            error_message: message.into(),
        }
    }
}
