//! Assertion evaluation against HTTP responses.
//!
//! `evaluate` is total: any internal failure (unparseable body, missing
//! field, unsupported type) is reported as a failed [`AssertionResult`],
//! never an error crossing the component boundary.

use crate::http::response::HttpResponse;
use crate::types::assertion::{AssertionKind, AssertionResult, AssertionRule};
use serde_json::{json, Value};

/// Evaluate one assertion rule against a response.
pub fn evaluate(rule: &AssertionRule, response: &HttpResponse) -> AssertionResult {
    match &rule.kind {
        AssertionKind::StatusCode => status_code_check(&rule.expected, response),
        AssertionKind::ResponseTime => {
            let max_ms = rule.expected.as_f64().unwrap_or(0.0);
            response_time_check(max_ms, response.elapsed_ms)
        }
        AssertionKind::JsonPath => json_path_assertion(rule, response),
        AssertionKind::Contains => contains_assertion(rule, response, false),
        AssertionKind::NotContains => contains_assertion(rule, response, true),
        AssertionKind::Header => header_assertion(rule, response),
        AssertionKind::Unknown(kind) => AssertionResult {
            kind: rule.kind.clone(),
            field: None,
            expected: rule.expected.clone(),
            actual: Value::Null,
            passed: false,
            message: format!("unsupported assertion type: {kind}"),
        },
    }
}

/// Built-in status code check (also backs `status_code` rules).
pub fn status_code_check(expected: &Value, response: &HttpResponse) -> AssertionResult {
    let actual = json!(response.status);
    let passed = *expected == actual;
    let message = if passed {
        "status code check passed".to_string()
    } else {
        format!(
            "status code assertion failed: expected {expected}, got {}",
            response.status
        )
    };
    AssertionResult {
        kind: AssertionKind::StatusCode,
        field: None,
        expected: expected.clone(),
        actual,
        passed,
        message,
    }
}

/// Built-in maximum response time check (also backs `response_time` rules).
pub fn response_time_check(max_ms: f64, elapsed_ms: f64) -> AssertionResult {
    let passed = elapsed_ms <= max_ms;
    let message = if passed {
        "response time check passed".to_string()
    } else {
        format!("response time assertion failed: expected under {max_ms}ms, got {elapsed_ms:.2}ms")
    };
    AssertionResult {
        kind: AssertionKind::ResponseTime,
        field: None,
        expected: json!(format!("<{max_ms}ms")),
        actual: json!(format!("{elapsed_ms:.2}ms")),
        passed,
        message,
    }
}

fn json_path_assertion(rule: &AssertionRule, response: &HttpResponse) -> AssertionResult {
    let field = rule.field.clone();
    match response.body_json() {
        Ok(body) => {
            let actual = json_path_value(&body, &rule.field);
            let passed = actual == rule.expected;
            AssertionResult {
                kind: AssertionKind::JsonPath,
                field: Some(field.clone()),
                expected: rule.expected.clone(),
                actual,
                passed,
                message: format!(
                    "json path {field} assertion {}",
                    if passed { "passed" } else { "failed" }
                ),
            }
        }
        Err(err) => AssertionResult {
            kind: AssertionKind::JsonPath,
            field: Some(field),
            expected: rule.expected.clone(),
            actual: Value::Null,
            passed: false,
            message: format!("json path assertion failed to execute: {err}"),
        },
    }
}

fn contains_assertion(rule: &AssertionRule, response: &HttpResponse, negated: bool) -> AssertionResult {
    let needle = match &rule.expected {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let found = response.body.contains(&needle);
    let passed = found != negated;
    let (kind, label, expected) = if negated {
        (
            AssertionKind::NotContains,
            "not contains",
            json!(format!("does not contain: {needle}")),
        )
    } else {
        (AssertionKind::Contains, "contains", rule.expected.clone())
    };
    AssertionResult {
        kind,
        field: None,
        expected,
        actual: json!(format!("response body length: {}", response.body.len())),
        passed,
        message: format!("{label} assertion {}", if passed { "passed" } else { "failed" }),
    }
}

fn header_assertion(rule: &AssertionRule, response: &HttpResponse) -> AssertionResult {
    let name = rule.header_name.clone().unwrap_or_default();
    let actual = match response.header(&name) {
        Some(value) => json!(value),
        None => Value::Null,
    };
    let passed = actual == rule.expected;
    AssertionResult {
        kind: AssertionKind::Header,
        field: Some(name.clone()),
        expected: rule.expected.clone(),
        actual,
        passed,
        message: format!(
            "response header {name} assertion {}",
            if passed { "passed" } else { "failed" }
        ),
    }
}

/// Walk a dot path into a JSON value.
///
/// A numeric segment indexes into a list (0-based); any other lookup treats
/// the segment as a map key. Missing keys, out-of-range indexes, and
/// non-traversable nodes all yield `Null`.
fn json_path_value(data: &Value, path: &str) -> Value {
    let mut current = data;
    for key in path.split('.') {
        current = match current {
            Value::Object(map) => match map.get(key) {
                Some(value) => value,
                None => return Value::Null,
            },
            Value::Array(items) => {
                match key.parse::<usize>().ok().and_then(|i| items.get(i)) {
                    Some(value) => value,
                    None => return Value::Null,
                }
            }
            _ => return Value::Null,
        };
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body: body.to_string(),
            elapsed_ms: 42.0,
        }
    }

    fn rule(kind: &str, field: &str, expected: Value) -> AssertionRule {
        AssertionRule {
            kind: AssertionKind::from(kind.to_string()),
            field: field.to_string(),
            expected,
            header_name: None,
        }
    }

    #[rstest]
    #[case(json!({"data": {"user": [{"name": "John"}]}}), "data.user.0.name", json!("John"))]
    #[case(json!({"a": {"b": 2}}), "a.b", json!(2))]
    #[case(json!([1, 2, 3]), "1", json!(2))]
    #[case(json!({"a": [10]}), "a.5", Value::Null)]
    #[case(json!({"a": [10]}), "a.x", Value::Null)]
    #[case(json!({"a": 1}), "missing", Value::Null)]
    #[case(json!({"a": 1}), "a.deeper", Value::Null)]
    #[case(json!({"0": "map key"}), "0", json!("map key"))]
    fn test_json_path_value(#[case] data: Value, #[case] path: &str, #[case] expected: Value) {
        assert_eq!(json_path_value(&data, path), expected);
    }

    #[rstest]
    fn test_json_path_assertion_passes() {
        let result = evaluate(
            &rule("json_path", "data.user.0.name", json!("John")),
            &response(200, r#"{"data": {"user": [{"name": "John"}]}}"#),
        );
        assert!(result.passed);
        assert_eq!(result.actual, json!("John"));
        assert_eq!(result.message, "json path data.user.0.name assertion passed");
    }

    #[rstest]
    fn test_json_path_missing_field_compares_null() {
        let result = evaluate(
            &rule("json_path", "data.missing", json!("x")),
            &response(200, r#"{"data": {}}"#),
        );
        assert!(!result.passed);
        assert_eq!(result.actual, Value::Null);

        // expected null matches a missing path
        let result = evaluate(
            &rule("json_path", "data.missing", Value::Null),
            &response(200, r#"{"data": {}}"#),
        );
        assert!(result.passed);
    }

    #[rstest]
    fn test_json_path_unparseable_body_fails() {
        let result = evaluate(
            &rule("json_path", "a", Value::Null),
            &response(200, "not json"),
        );
        assert!(!result.passed);
        assert_eq!(result.actual, Value::Null);
        assert!(result.message.starts_with("json path assertion failed to execute"));
    }

    #[rstest]
    #[case("contains", "ok", true)]
    #[case("contains", "missing", false)]
    #[case("not_contains", "missing", true)]
    #[case("not_contains", "ok", false)]
    fn test_contains_family(#[case] kind: &str, #[case] needle: &str, #[case] passes: bool) {
        let result = evaluate(
            &rule(kind, "", json!(needle)),
            &response(200, r#"{"status": "ok"}"#),
        );
        assert_eq!(result.passed, passes);
        assert_eq!(result.actual, json!("response body length: 16"));
    }

    #[rstest]
    fn test_not_contains_records_negated_expectation() {
        let result = evaluate(&rule("not_contains", "", json!("x")), &response(200, "body"));
        assert_eq!(result.expected, json!("does not contain: x"));
    }

    #[rstest]
    fn test_header_assertion_case_insensitive() {
        let mut header_rule = rule("header", "", json!("application/json"));
        header_rule.header_name = Some("content-type".to_string());

        let result = evaluate(&header_rule, &response(200, "{}"));
        assert!(result.passed);
        assert_eq!(result.field.as_deref(), Some("content-type"));
    }

    #[rstest]
    fn test_header_assertion_missing_header() {
        let mut header_rule = rule("header", "", json!("value"));
        header_rule.header_name = Some("X-Missing".to_string());

        let result = evaluate(&header_rule, &response(200, "{}"));
        assert!(!result.passed);
        assert_eq!(result.actual, Value::Null);
    }

    #[rstest]
    fn test_status_code_rule() {
        let result = evaluate(&rule("status_code", "", json!(404)), &response(404, ""));
        assert!(result.passed);

        let result = evaluate(&rule("status_code", "", json!(200)), &response(404, ""));
        assert!(!result.passed);
        assert_eq!(
            result.message,
            "status code assertion failed: expected 200, got 404"
        );
    }

    #[rstest]
    #[case(100.0, true)]
    #[case(42.0, true)]
    #[case(10.0, false)]
    fn test_response_time_rule(#[case] max_ms: f64, #[case] passes: bool) {
        let result = evaluate(&rule("response_time", "", json!(max_ms)), &response(200, ""));
        assert_eq!(result.passed, passes);
    }

    #[rstest]
    fn test_response_time_check_formats() {
        let result = response_time_check(500.0, 612.345);
        assert!(!result.passed);
        assert_eq!(result.expected, json!("<500ms"));
        assert_eq!(result.actual, json!("612.35ms"));
        assert_eq!(
            result.message,
            "response time assertion failed: expected under 500ms, got 612.35ms"
        );
    }

    #[rstest]
    fn test_unknown_type_always_fails() {
        let result = evaluate(&rule("regex", "", json!("^a")), &response(200, "abc"));
        assert!(!result.passed);
        assert_eq!(result.message, "unsupported assertion type: regex");
    }

    // Same rule, same response, twice: identical results
    #[rstest]
    fn test_evaluation_deterministic() {
        let r = rule("json_path", "data.0", json!(1));
        let resp = response(200, r#"{"data": [1]}"#);
        assert_eq!(evaluate(&r, &resp), evaluate(&r, &resp));
    }
}
