//! Core library for the Testforge API testing and mocking platform.
//!
//! Two engines share this crate: the test execution side (variable
//! resolution, HTTP execution, assertion evaluation, single-case and
//! data-driven runners) and the mock dispatch side (endpoint registry and
//! request dispatcher). Both evaluate user-authored configuration; the
//! hosting CRUD layer loads that configuration and persists the results the
//! runners return.

pub mod assertions;
pub mod config;
pub mod http;
pub mod mocks;
pub mod record;
pub mod resolver;
pub mod runner;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use assertions::evaluate;
pub use http::{ExecutorError, HttpExecutor, HttpResponse, EXECUTION_TIMEOUT_MS};
pub use mocks::{MockDispatcher, MockRegistry};
pub use record::{EnvironmentUsage, MemoryRecorder, NullRecorder, UsageRecorder};
pub use runner::{run_case, run_dataset, run_test_case, DataDrivenReport, RowContext};
pub use types::api::{ApiDefinition, ApiTestCase, HttpMethod};
pub use types::assertion::{AssertionKind, AssertionResult, AssertionRule};
pub use types::dataset::TestDataset;
pub use types::environment::{Environment, EnvironmentVariable};
pub use types::mock::{MockEndpoint, MockRequest, MockResponse, MockUsageRecord};
pub use types::result::{CaseStatus, ExecutionResult};
