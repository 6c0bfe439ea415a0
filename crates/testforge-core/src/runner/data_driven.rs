//! Data-driven execution: one run per dataset row, plus a summary.

use crate::config::error::DatasetError;
use crate::http::executor::HttpExecutor;
use crate::record::UsageRecorder;
use crate::runner::single::{run_case, RowContext};
use crate::types::api::{ApiDefinition, ApiTestCase};
use crate::types::dataset::TestDataset;
use crate::types::environment::Environment;
use crate::types::result::{CaseStatus, ExecutionResult};
use serde_json::{json, Value};
use tracing::debug;

/// Outcome of a whole data-driven run.
///
/// Row results are returned alongside the summary so the hosting layer can
/// persist both the granular and the aggregate view.
#[derive(Debug, Clone, PartialEq)]
pub struct DataDrivenReport {
    /// Aggregate result; its body carries the structured summary payload
    pub summary: ExecutionResult,
    /// Per-row results in dataset order, one per row
    pub row_results: Vec<ExecutionResult>,
}

impl DataDrivenReport {
    /// Report with no per-row executions.
    pub fn summary_only(summary: ExecutionResult) -> Self {
        Self {
            summary,
            row_results: Vec::new(),
        }
    }
}

/// Map a dataset parse failure onto the single `error` result that aborts
/// the whole run.
pub fn dataset_error_result(err: &DatasetError) -> ExecutionResult {
    ExecutionResult::error(format!("dataset parse failed: {err}"))
}

/// Execute a test case once per dataset row, strictly in file order.
pub async fn run_dataset(
    test_case: &ApiTestCase,
    api: &ApiDefinition,
    dataset: &TestDataset,
    environment: Option<&Environment>,
    executor: &HttpExecutor,
    recorder: &dyn UsageRecorder,
) -> DataDrivenReport {
    if !test_case.is_active {
        return DataDrivenReport::summary_only(ExecutionResult::error("test case disabled"));
    }
    if dataset.is_empty() {
        return DataDrivenReport::summary_only(ExecutionResult::error("no data rows found"));
    }

    let total = dataset.len();
    let mut row_results = Vec::with_capacity(total);
    let mut passed = 0usize;
    let mut failed = 0usize;
    let mut errors = 0usize;

    for index in 0..total {
        let row = RowContext {
            index: index + 1,
            variables: dataset.row_variables(index),
        };
        let result = run_case(test_case, api, environment, Some(&row), executor, recorder).await;

        match result.status {
            CaseStatus::Passed => passed += 1,
            CaseStatus::Failed => failed += 1,
            CaseStatus::Error => errors += 1,
        }
        row_results.push(result);
    }

    let overall = if errors > 0 {
        CaseStatus::Error
    } else if failed > 0 {
        CaseStatus::Failed
    } else {
        CaseStatus::Passed
    };

    debug!(case = %test_case.name, total, passed, failed, errors, "data-driven run finished");

    let body = json!({
        "data_driven_summary": {
            "total_tests": total,
            "passed": passed,
            "failed": failed,
            "errors": errors,
            "success_rate": format!("{:.1}%", passed as f64 / total as f64 * 100.0),
        },
        "individual_results": row_results
            .iter()
            .enumerate()
            .map(|(i, result)| {
                json!({
                    "row": i + 1,
                    "status": result.status.as_str(),
                    "response_code": result.response_code,
                    "response_time": result.response_time_ms,
                    "error_message": if result.error_message.is_empty() {
                        Value::Null
                    } else {
                        json!(result.error_message)
                    },
                })
            })
            .collect::<Vec<_>>(),
    });

    let error_message = if overall == CaseStatus::Error {
        "data-driven run failed".to_string()
    } else {
        format!("data-driven run complete: {passed}/{total} passed")
    };

    let summary = ExecutionResult {
        status: overall,
        response_code: None,
        response_time_ms: None,
        response_body: body.to_string(),
        response_headers: Default::default(),
        assertion_results: Vec::new(),
        error_message,
    };

    DataDrivenReport {
        summary,
        row_results,
    }
}
