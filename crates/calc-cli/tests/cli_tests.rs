use std::io::Write;
use std::process::{Command, Output, Stdio};

// ──────────────────────────────────────────────────────────────────────────────
// Helpers
// ──────────────────────────────────────────────────────────────────────────────

fn calc(args: &[&str]) -> Output {
    Command::new(assert_cmd::cargo::cargo_bin!("calc"))
        .args(args)
        .output()
        .expect("run calc")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn serve(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(assert_cmd::cargo::cargo_bin!("calc"))
        .arg("serve")
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn calc");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for calc")
}

// ──────────────────────────────────────────────────────────────────────────────
// eval
// ──────────────────────────────────────────────────────────────────────────────

#[test]
fn eval_prints_result() {
    let output = calc(&["eval", "2 + 2 * 3"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "8\n");
}

#[test]
fn eval_accepts_leading_minus() {
    let output = calc(&["eval", "-5 + 2"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "-3\n");
}

#[test]
fn eval_failure_exits_nonzero() {
    let output = calc(&["eval", "1/0"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Cannot divide by zero\n");

    let output = calc(&["eval", "foo(2)"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Use of foo not allowed\n");
}

#[test]
fn eval_json() {
    let output = calc(&["eval", "--json", "sqrt(16)"]);
    assert!(output.status.success());
    let response: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(response, serde_json::json!({ "success": true, "result": "4" }));
}

#[test]
fn eval_respects_limits() {
    let output = calc(&["--max-length", "3", "eval", "1+2+3"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "Syntax Error\n");
}

#[test]
fn debug_logging_goes_to_stderr() {
    let output = calc(&["--log-level", "debug", "eval", "nope"]);
    assert_eq!(stdout(&output), "Use of nope not allowed\n");
    assert!(!output.stderr.is_empty());
}

// ──────────────────────────────────────────────────────────────────────────────
// serve
// ──────────────────────────────────────────────────────────────────────────────

#[test]
fn serve_evaluate_lines() {
    let output = serve(&[], "{\"expression\":\"1/3\"}\n\n{\"expression\":\"1/0\"}\nnot json\n");
    assert!(output.status.success());
    let lines: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(
        lines,
        [
            serde_json::json!({ "success": true, "result": "0.3333333333" }),
            serde_json::json!({ "success": false, "result": "Cannot divide by zero" }),
            serde_json::json!({ "success": false, "result": "Invalid request" }),
        ]
    );
}

#[test]
fn serve_action_lines() {
    let input = concat!(
        "{\"action\":\"calculate\",\"expression\":\"2×3\"}\n",
        "{\"action\":\"percentage\",\"current_value\":\"50\"}\n",
        "{\"action\":\"toggle_sign\",\"current_value\":\"7\"}\n",
        "{\"action\":\"clear\"}\n",
        "{\"action\":\"nope\"}\n",
    );
    let output = serve(&["--endpoint", "action"], input);
    assert!(output.status.success());
    let results: Vec<serde_json::Value> = stdout(&output)
        .lines()
        .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["result"].clone())
        .collect();
    assert_eq!(results, ["6", "0.5", "-7", "0", "Invalid action"]);
}
