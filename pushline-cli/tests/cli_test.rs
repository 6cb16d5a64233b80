//! Integration tests for the pushline binary.

use assert_cmd::Command;
use assert_cmd::assert::OutputAssertExt;
use predicates::prelude::*;
use std::io::Write;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pushline() -> Command {
    let mut cmd = Command::cargo_bin("pushline").unwrap();
    cmd.env_clear().arg("--no-color");
    cmd
}

#[test]
fn test_types_lists_every_push_type() {
    pushline()
        .arg("types")
        .assert()
        .success()
        .stdout(predicate::str::contains("alert"))
        .stdout(predicate::str::contains("background"))
        .stdout(predicate::str::contains("apns-priority: 5"))
        .stdout(predicate::str::contains("pushtotalk"));
}

#[test]
fn test_missing_settings_fails() {
    pushline()
        .args(["message", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("device_token"));
}

#[test]
fn test_unknown_push_type_is_rejected() {
    pushline()
        .args(["send", "--type", "silent", "{}"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown push type"));
}

#[test]
fn test_connection_failure_is_reported() {
    pushline()
        .args([
            "--device-token",
            "abc123",
            "--auth-token",
            "jwt",
            "--bundle-id",
            "com.example.app",
            "--base-url",
            "http://127.0.0.1:9",
            "message",
            "hi",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Transport error"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_from_settings_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/3/device/abc123"))
        .and(header("apns-push-type", "background"))
        .and(header("apns-priority", "5"))
        .respond_with(ResponseTemplate::new(200).insert_header("apns-id", "0e5d8d2a-7c8b-4b4e-9d9a-1f0c2b3a4d5e"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("push.toml");
    let mut file = std::fs::File::create(&config).unwrap();
    writeln!(
        file,
        "device_token = \"abc123\"\nauthorization_token = \"jwt\"\nbundle_id = \"com.example.app\"\n\n[http]\nbase_url = \"{}\"",
        server.uri()
    )
    .unwrap();

    let output = tokio::task::spawn_blocking(move || {
        pushline()
            .arg("--config")
            .arg(&config)
            .args(["send", "--type", "background", r#"{"aps":{"content-available":1}}"#])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .success()
        .stdout(predicate::str::contains("200 OK"))
        .stdout(predicate::str::contains("0e5d8d2a-7c8b-4b4e-9d9a-1f0c2b3a4d5e"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejection_prints_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"reason":"BadDeviceToken"}"#))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        pushline()
            .args([
                "--device-token",
                "abc123",
                "--auth-token",
                "jwt",
                "--bundle-id",
                "com.example.app",
                "--base-url",
                uri.as_str(),
                "message",
                "hi",
            ])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    output
        .assert()
        .failure()
        .stderr(predicate::str::contains("400 Bad Request"))
        .stderr(predicate::str::contains("BadDeviceToken"));
}
