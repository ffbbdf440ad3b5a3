//! Integration tests for structured exit codes.
//!
//! These tests verify that `sumo` prints `<Kind>: <message>` to stderr and
//! returns the matching exit code for each failure category.

mod common;

use common::*;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_client_error_returns_exit_code_4() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "message": "Query parse error" })),
        )
        .mount(&server)
        .await;

    sumo_cmd_with_base_url(&server.uri())
        .args(["-q", "| bogus"])
        .assert()
        .code(4)
        .stdout("")
        .stderr(predicate::str::contains("ClientError: Query parse error"));
}

#[tokio::test]
async fn test_server_error_returns_exit_code_5() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;

    sumo_cmd_with_base_url(&server.uri())
        .args(["-q", "TEST"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("ServerError: Error sending API request"));
}

#[test]
fn test_missing_credentials_returns_exit_code_2() {
    let dir = tempfile::tempdir().unwrap();

    sumo_cmd()
        .env_remove("SUMO_CREDS")
        .env("SUMO_CONFIG_PATH", dir.path().join("missing_creds"))
        .args(["-q", "TEST"])
        .assert()
        .code(2)
        .stderr(predicate::str::starts_with("NoCredsFound:"));
}

#[test]
fn test_connection_refused_returns_exit_code_3() {
    // Use a port that's unlikely to be open
    sumo_cmd_with_base_url("http://127.0.0.1:1")
        .args(["-q", "TEST"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("HttpError"));
}

#[tokio::test]
async fn test_disallowed_redirect_returns_exit_code_6() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "https://api.evil.example.com/"),
        )
        .mount(&server)
        .await;

    sumo_cmd_with_base_url(&server.uri())
        .args(["-q", "TEST"])
        .assert()
        .code(6)
        .stderr(predicate::str::contains(
            "DisallowedRedirectHost: Redirect to disallowed host: api.evil.example.com",
        ));
}

#[test]
fn test_invalid_base_url_is_general_error() {
    sumo_cmd_with_base_url("ftp://example.com")
        .args(["-q", "TEST"])
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("ConfigError:"));
}
