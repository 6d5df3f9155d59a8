//! Tests for the `odata-dsl` command-line driver

use serde_json::{json, Value};
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

fn run(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_odata-dsl"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut child_stdin = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            child_stdin.write_all(input.as_bytes()).unwrap();
        }
    }

    child.wait_with_output().unwrap()
}

fn stdout_json(output: &Output) -> Value {
    use serde::Deserialize;
    let mut deserializer = serde_json::Deserializer::from_slice(&output.stdout);
    deserializer.disable_recursion_limit();
    Value::deserialize(&mut deserializer).unwrap()
}

#[test]
fn test_cli_reads_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("query.json");
    std::fs::write(
        &path,
        json!({
            "$filter": {
                "type": "operator",
                "op": "eq",
                "children": [
                    { "type": "field", "name": "status" },
                    { "type": "literal", "value": "open" }
                ]
            },
            "$top": 5
        })
        .to_string(),
    )
    .unwrap();

    let output = run(&["--input", path.to_str().unwrap()], None);

    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output),
        json!({
            "from": 0,
            "size": 5,
            "query": { "term": { "status": "open" } },
            "_source": [],
            "sort": []
        })
    );
}

#[test]
fn test_cli_reads_stdin_with_options() {
    let output = run(
        &["--default-size", "25", "--project-single-field", "--pretty"],
        Some(r#"{ "$select": ["id"] }"#),
    );

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout.clone()).unwrap();
    assert!(stdout.contains('\n'));
    assert_eq!(
        stdout_json(&output),
        json!({ "from": 0, "size": 25, "query": {}, "_source": ["id"], "sort": [] })
    );
}

#[test]
fn test_cli_reports_translation_errors() {
    let input = json!({
        "$filter": {
            "type": "operator",
            "op": "xor",
            "children": [
                { "type": "field", "name": "a" },
                { "type": "literal", "value": "b" }
            ]
        }
    })
    .to_string();

    let output = run(&[], Some(&input));

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unsupported operator `xor`"));
}

fn or_chain(depth: usize) -> Value {
    let eq = |i: usize| {
        json!({ "type": "operator", "op": "eq", "children": [
            { "type": "field", "name": "f" },
            { "type": "literal", "value": i }
        ] })
    };
    let mut filter = eq(0);
    for i in 1..depth {
        filter = json!({ "type": "operator", "op": "or", "children": [eq(i), filter] });
    }
    filter
}

#[test]
fn test_cli_honors_max_depth_on_deep_filters() {
    let input = json!({ "$filter": or_chain(100) }).to_string();

    let output = run(&[], Some(&input));
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("filter expression exceeds the maximum depth of 64"), "{}", stderr);

    let output = run(&["--max-depth", "100"], Some(&input));
    assert!(output.status.success());
    assert_eq!(
        stdout_json(&output)["query"]["bool"]["should"][0],
        json!({ "term": { "f": 99 } })
    );
}

#[test]
fn test_cli_rejects_missing_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("missing.json");

    let output = run(&["--input", path.to_str().unwrap()], None);

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("failed to read query options"));
}
