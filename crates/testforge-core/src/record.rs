//! Usage/result recording boundary.
//!
//! The engine only APPENDS records; persistence is implemented by the
//! hosting layer behind [`UsageRecorder`]. Execution results are plain
//! return values and never pass through this trait, which keeps every
//! runner testable without a database.

use crate::types::mock::MockUsageRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Mutex;

/// Audit entry written whenever an execution uses an environment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentUsage {
    /// Name of the environment that was used
    pub environment: String,
    /// Usage scenario, e.g. `api_test`
    pub action: String,
    /// Execution context (test case name, resolved URL, method)
    pub context: Value,
}

/// Append-only sink for usage records.
pub trait UsageRecorder: Send + Sync {
    fn record_environment_usage(&self, usage: EnvironmentUsage);
    fn record_mock_usage(&self, record: MockUsageRecord);
}

/// Recorder that drops everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRecorder;

impl UsageRecorder for NullRecorder {
    fn record_environment_usage(&self, _usage: EnvironmentUsage) {}
    fn record_mock_usage(&self, _record: MockUsageRecord) {}
}

/// In-memory recorder for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryRecorder {
    environment_usage: Mutex<Vec<EnvironmentUsage>>,
    mock_usage: Mutex<Vec<MockUsageRecord>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn environment_usage(&self) -> Vec<EnvironmentUsage> {
        self.environment_usage.lock().expect("recorder lock").clone()
    }

    pub fn mock_usage(&self) -> Vec<MockUsageRecord> {
        self.mock_usage.lock().expect("recorder lock").clone()
    }
}

impl UsageRecorder for MemoryRecorder {
    fn record_environment_usage(&self, usage: EnvironmentUsage) {
        self.environment_usage.lock().expect("recorder lock").push(usage);
    }

    fn record_mock_usage(&self, record: MockUsageRecord) {
        self.mock_usage.lock().expect("recorder lock").push(record);
    }
}
