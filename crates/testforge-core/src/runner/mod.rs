//! Test execution: single-case and data-driven runners.

pub mod data_driven;
pub mod single;

pub use data_driven::{dataset_error_result, run_dataset, DataDrivenReport};
pub use single::{run_case, RowContext};

use crate::http::executor::HttpExecutor;
use crate::record::UsageRecorder;
use crate::types::api::{ApiDefinition, ApiTestCase};
use crate::types::dataset::TestDataset;
use crate::types::environment::Environment;

/// Plan-execution entry point: fan out to the data-driven runner when a
/// dataset is attached, else run the case once.
pub async fn run_test_case(
    test_case: &ApiTestCase,
    api: &ApiDefinition,
    dataset: Option<&TestDataset>,
    environment: Option<&Environment>,
    executor: &HttpExecutor,
    recorder: &dyn UsageRecorder,
) -> DataDrivenReport {
    match dataset {
        Some(dataset) => {
            run_dataset(test_case, api, dataset, environment, executor, recorder).await
        }
        None => DataDrivenReport::summary_only(
            run_case(test_case, api, environment, None, executor, recorder).await,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::NullRecorder;
    use crate::testutil::TestServer;
    use crate::types::api::HttpMethod;
    use crate::types::result::CaseStatus;
    use std::collections::BTreeMap;

    fn fixture(url: &str) -> (ApiTestCase, ApiDefinition) {
        let api = ApiDefinition {
            name: "ping".to_string(),
            url: url.to_string(),
            method: HttpMethod::Get,
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            body: serde_json::Value::Null,
            description: String::new(),
            module: String::new(),
        };
        let case = ApiTestCase {
            name: "ping responds".to_string(),
            headers: BTreeMap::new(),
            params: BTreeMap::new(),
            body: serde_json::Value::Null,
            assertions: Vec::new(),
            variables: BTreeMap::new(),
            expected_status_code: 200,
            max_response_time_ms: None,
            is_active: true,
            description: String::new(),
        };
        (case, api)
    }

    #[tokio::test]
    async fn test_without_dataset_runs_once() {
        let server = TestServer::respond_with(200, "text/plain", "ok");
        let (case, api) = fixture(&server.url("/ping"));

        let report = run_test_case(
            &case,
            &api,
            None,
            None,
            &HttpExecutor::new(),
            &NullRecorder,
        )
        .await;

        assert_eq!(report.summary.status, CaseStatus::Passed);
        assert!(report.row_results.is_empty());
        assert_eq!(report.summary.response_code, Some(200));
    }

    #[tokio::test]
    async fn test_with_dataset_fans_out() {
        let server = TestServer::respond_with(200, "text/plain", "ok");
        let (case, api) = fixture(&server.url("/ping"));
        let dataset = TestDataset::new(
            vec!["user".to_string()],
            vec![vec!["u1".to_string()], vec!["u2".to_string()]],
        );

        let report = run_test_case(
            &case,
            &api,
            Some(&dataset),
            None,
            &HttpExecutor::new(),
            &NullRecorder,
        )
        .await;

        assert_eq!(report.row_results.len(), 2);
        assert!(report.summary.response_code.is_none());
    }
}
