//! Single-case execution: merge, resolve, execute, assert.

use crate::assertions::{evaluate, response_time_check, status_code_check};
use crate::http::executor::HttpExecutor;
use crate::record::{EnvironmentUsage, UsageRecorder};
use crate::resolver::{merge_variables, resolve_map, resolve_str, resolve_value};
use crate::types::api::{body_is_empty, ApiDefinition, ApiTestCase};
use crate::types::environment::Environment;
use crate::types::result::{CaseStatus, ExecutionResult};
use serde_json::json;
use std::collections::BTreeMap;
use tracing::debug;

/// Per-row context when invoked from the data-driven runner.
#[derive(Debug, Clone, Default)]
pub struct RowContext {
    /// 1-based row index, used in `[row N]` message prefixes
    pub index: usize,
    /// Variables zipped from the dataset row
    pub variables: BTreeMap<String, String>,
}

fn prefix_row(row: Option<&RowContext>, message: String) -> String {
    match row {
        Some(ctx) => format!("[row {}] {}", ctx.index, message),
        None => message,
    }
}

/// Execute one test case and return its result.
///
/// The result is RETURNED, never persisted here; environment usage is the
/// only side effect and goes through the recorder.
pub async fn run_case(
    test_case: &ApiTestCase,
    api: &ApiDefinition,
    environment: Option<&Environment>,
    row: Option<&RowContext>,
    executor: &HttpExecutor,
    recorder: &dyn UsageRecorder,
) -> ExecutionResult {
    if !test_case.is_active {
        return ExecutionResult::error(prefix_row(row, "test case disabled".to_string()));
    }

    // Effective request: definition defaults overridden by the case
    let mut headers = api.headers.clone();
    headers.extend(test_case.headers.clone());
    let mut params = api.params.clone();
    params.extend(test_case.params.clone());
    let body = if body_is_empty(&test_case.body) {
        api.body.clone()
    } else {
        test_case.body.clone()
    };

    // Case defaults, then row values, then environment (environment wins)
    let empty = BTreeMap::new();
    let row_variables = row.map(|ctx| &ctx.variables).unwrap_or(&empty);
    let env_variables = environment.map(|env| env.variable_map()).unwrap_or_default();
    let variables = merge_variables(&[&test_case.variables, row_variables, &env_variables]);

    let (url, headers, params, body) = if variables.is_empty() {
        (api.url.clone(), headers, params, body)
    } else {
        (
            resolve_str(&api.url, &variables),
            resolve_map(&headers, &variables),
            resolve_map(&params, &variables),
            resolve_value(&body, &variables),
        )
    };

    if let Some(env) = environment {
        recorder.record_environment_usage(EnvironmentUsage {
            environment: env.name.clone(),
            action: "api_test".to_string(),
            context: json!({
                "test_case_name": test_case.name,
                "api_url": url,
                "api_method": api.method.as_str(),
            }),
        });
    }

    debug!(case = %test_case.name, method = %api.method, url = %url, "executing test case");

    let response = match executor.execute(api.method, &url, &headers, &params, &body).await {
        Ok(response) => response,
        Err(err) => return ExecutionResult::error(prefix_row(row, err.to_string())),
    };

    let mut assertion_results = Vec::new();
    let mut status = CaseStatus::Passed;
    let mut error_message = String::new();

    let mut status_check = status_code_check(&json!(test_case.expected_status_code), &response);
    if !status_check.passed {
        status_check.message = prefix_row(row, status_check.message);
        status = CaseStatus::Failed;
        error_message = status_check.message.clone();
    }
    assertion_results.push(status_check);

    if let Some(max_ms) = test_case.max_response_time_ms {
        let mut time_check = response_time_check(max_ms, response.elapsed_ms);
        if !time_check.passed {
            time_check.message = prefix_row(row, time_check.message);
            status = CaseStatus::Failed;
            if error_message.is_empty() {
                error_message = time_check.message.clone();
            }
        }
        assertion_results.push(time_check);
    }

    for rule in &test_case.assertions {
        let mut result = evaluate(rule, &response);
        if !result.passed {
            result.message = prefix_row(row, result.message);
            status = CaseStatus::Failed;
            if error_message.is_empty() {
                error_message = result.message.clone();
            }
        }
        assertion_results.push(result);
    }

    ExecutionResult {
        status,
        response_code: Some(response.status),
        response_time_ms: Some(response.elapsed_ms),
        response_body: response.body.clone(),
        response_headers: response.headers_map(),
        assertion_results,
        error_message,
    }
}
