//! Endpoint behaviour over raw JSON bodies.

use calc_service::{handle_action_json, handle_evaluate_json, Calculator};
use calc_types::Limits;
use serde_json::{json, Value};

// ──────────────────────────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────────────────────────

fn action(body: Value) -> Value {
    let response = handle_action_json(&body.to_string());
    serde_json::from_str(&response).unwrap()
}

fn evaluate(expression: &str) -> Value {
    let body = json!({ "expression": expression }).to_string();
    serde_json::from_str(&handle_evaluate_json(&body)).unwrap()
}

fn calculate(expression: &str) -> Value {
    action(json!({ "action": "calculate", "expression": expression }))
}

// ──────────────────────────────────────────────────────────────────────────────
// Action endpoint
// ──────────────────────────────────────────────────────────────────────────────

#[test]
fn test_calculate_action() {
    assert_eq!(
        calculate("2+2"),
        json!({ "success": true, "result": "4", "display": "4" })
    );
    assert_eq!(
        calculate("2×3"),
        json!({ "success": true, "result": "6", "display": "6" })
    );
}

#[test]
fn test_calculate_action_reports_failures_as_results() {
    for (expression, shown) in [
        ("1/0", "Cannot divide by zero"),
        ("2 +", "Syntax Error"),
        ("foo(1)", "Use of foo not allowed"),
        ("sqrt(-1)", "Error"),
    ] {
        assert_eq!(
            calculate(expression),
            json!({ "success": true, "result": shown, "display": shown }),
            "for {expression:?}"
        );
    }
}

#[test]
fn test_calculate_action_empty_expression() {
    assert_eq!(action(json!({ "action": "calculate" }))["result"], "0");
}

#[test]
fn test_percentage_action() {
    let response = action(json!({ "action": "percentage", "current_value": "50" }));
    assert_eq!(response, json!({ "success": true, "result": "0.5", "display": "0.5" }));
    let response = action(json!({ "action": "percentage", "current_value": 100 }));
    assert_eq!(response["result"], "1.0");
    let response = action(json!({ "action": "percentage", "current_value": "Error" }));
    assert_eq!(response["result"], "Error");
    assert_eq!(response["success"], true);
}

#[test]
fn test_toggle_sign_action() {
    let response = action(json!({ "action": "toggle_sign", "current_value": "42" }));
    assert_eq!(response["display"], "-42");
    let response = action(json!({ "action": "toggle_sign", "current_value": "-42" }));
    assert_eq!(response["display"], "42");
}

#[test]
fn test_clear_action() {
    let response = action(json!({ "action": "clear", "expression": "1+1", "current_value": "9" }));
    assert_eq!(response, json!({ "success": true, "result": "0", "display": "0" }));
}

#[test]
fn test_invalid_action() {
    let expected = json!({ "success": false, "result": "Invalid action", "display": "" });
    assert_eq!(action(json!({ "action": "explode" })), expected);
    assert_eq!(action(json!({})), expected);
    assert_eq!(action(json!({ "action": null })), expected);
}

#[test]
fn test_malformed_action_body() {
    let response: Value = serde_json::from_str(&handle_action_json("not json")).unwrap();
    assert_eq!(response["success"], false);
    assert_eq!(response["result"], "Invalid request");
    let response: Value =
        serde_json::from_str(&handle_action_json(r#"{"action": 5}"#)).unwrap();
    assert_eq!(response["result"], "Invalid request");
}

// ──────────────────────────────────────────────────────────────────────────────
// Evaluate endpoint
// ──────────────────────────────────────────────────────────────────────────────

#[test]
fn test_evaluate_endpoint() {
    assert_eq!(evaluate("sqrt(16)"), json!({ "success": true, "result": "4" }));
    assert_eq!(evaluate("pi"), json!({ "success": true, "result": "3.1415926536" }));
    assert_eq!(evaluate(""), json!({ "success": true, "result": "0" }));
}

#[test]
fn test_evaluate_failures() {
    assert_eq!(
        evaluate("1/0"),
        json!({ "success": false, "result": "Cannot divide by zero" })
    );
    assert_eq!(evaluate("import os"), json!({ "success": false, "result": "Syntax Error" }));
    assert_eq!(evaluate("log(-1)"), json!({ "success": false, "result": "Error" }));
}

#[test]
fn test_evaluate_name_rejection_is_not_a_failure() {
    assert_eq!(
        evaluate("open(1)"),
        json!({ "success": true, "result": "Use of open not allowed" })
    );
}

#[test]
fn test_malformed_evaluate_body() {
    let response: Value = serde_json::from_str(&handle_evaluate_json("{")).unwrap();
    assert_eq!(response, json!({ "success": false, "result": "Invalid request" }));
}

// ──────────────────────────────────────────────────────────────────────────────
// Configuration
// ──────────────────────────────────────────────────────────────────────────────

#[test]
fn test_calculator_uses_its_limits() {
    let calculator = Calculator::new(Limits {
        max_input_len: 5,
        ..Limits::default()
    });
    assert_eq!(calculator.calculate("1+2+3"), "6");
    assert_eq!(calculator.calculate("1+2+3+4"), "Syntax Error");
    let body = json!({ "expression": "123456" }).to_string();
    let response: Value = serde_json::from_str(&calculator.handle_evaluate_json(&body)).unwrap();
    assert_eq!(response["success"], false);
}

#[test]
fn test_responses_are_deterministic() {
    let body = json!({ "action": "calculate", "expression": "sin(1) / 3" }).to_string();
    let first = handle_action_json(&body);
    for _ in 0..100 {
        assert_eq!(handle_action_json(&body), first);
    }
}
