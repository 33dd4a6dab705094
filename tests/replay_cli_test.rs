use httpmock::prelude::*;
use serde_json::json;
use std::process::{Command, Output};

const API_PATH: &str = "/api/userphoneapplets/index";

fn run_replay(server: &MockServer) -> Output {
    Command::new(env!("CARGO_BIN_EXE_replay_payload"))
        .args([
            "--endpoint",
            &server.url(API_PATH),
            "--token",
            "cli-token",
            "--delay-ms",
            "0",
        ])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run replay_payload")
}

#[test]
fn test_cli_full_replay_exits_zero() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .header("token", "cli-token")
            .json_body_partial(r#"{"s": "Works.save"}"#);
        then.status(200).json_body(json!({"data": {"id": 987}}));
    });
    let order_mock = server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Order.create", "works_id": "987"}"#);
        then.status(200).json_body(json!({"ret": 200}));
    });
    let wait_mock = server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Machine.wait"}"#);
        then.status(200).json_body(json!({"ret": 200}));
    });

    let output = run_replay(&server);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "stdout: {}", stdout);
    order_mock.assert();
    wait_mock.assert();
    assert!(stdout.contains("📤 Sending Works.save..."));
    assert!(stdout.contains("✅ Works.save response:"));
    assert!(stdout.contains("📤 Sending Machine.wait..."));
}

#[test]
fn test_cli_missing_works_id_exits_one() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Works.save"}"#);
        then.status(200).json_body(json!({"ret": 200, "data": null}));
    });
    let order_mock = server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Order.create"}"#);
        then.status(200).json_body(json!({"ret": 200}));
    });

    let output = run_replay(&server);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("❌ No works_id returned. Exiting."));
    order_mock.assert_hits(0);
}

#[test]
fn test_cli_order_failure_exits_zero() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Works.save"}"#);
        then.status(200).json_body(json!({"data": {"id": 3}}));
    });
    server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Order.create"}"#);
        then.status(503).body("unavailable");
    });
    let wait_mock = server.mock(|when, then| {
        when.method(POST)
            .path(API_PATH)
            .json_body_partial(r#"{"s": "Machine.wait"}"#);
        then.status(200).json_body(json!({"ret": 200}));
    });

    let output = run_replay(&server);
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("❌ Error during Order.create:"));
    wait_mock.assert();
}

#[test]
fn test_cli_invalid_endpoint_exits_one() {
    let output = Command::new(env!("CARGO_BIN_EXE_replay_payload"))
        .args(["--endpoint", "ftp://example.com/api"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to run replay_payload");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
