//! Shared test utilities for sumo CLI integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Mount the search job endpoints a successful CLI run needs.
//!
//! Invariants / Assumptions:
//! - `SUMO_CREDS` is set to `creds@email.com:test` unless overridden.
//! - Redirects are allowed to `127.0.0.1`, where every mock server lives.

use assert_cmd::Command;
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[allow(dead_code)]
pub const JOB_ID: &str = "6F1C0E4A2D3B5C7E";

/// Returns a hermetic `sumo` command for integration testing.
pub fn sumo_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("sumo");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("SUMO_CREDS", "creds@email.com:test");
    cmd.env("SUMO_ALLOWED_DOMAIN", "127.0.0.1");

    // Clear potential host leakage
    cmd.env_remove("SUMO_BASE_URL")
        .env_remove("SUMO_CONFIG_PATH")
        .env_remove("SUMO_CREDENTIAL")
        .env_remove("SUMO_TIMEOUT")
        .env_remove("RUST_LOG");

    cmd
}

/// Returns a hermetic `sumo` command pointed at `base_url`.
#[allow(dead_code)]
pub fn sumo_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = sumo_cmd();
    cmd.env("SUMO_BASE_URL", base_url);
    cmd
}

/// Wrap rows the way the service does: `{"<key>": [{"map": row}, ...]}`.
#[allow(dead_code)]
pub fn envelope(key: &str, rows: &[Value]) -> Value {
    let entries: Vec<Value> = rows.iter().map(|row| json!({ "map": row })).collect();
    let mut body = serde_json::Map::new();
    body.insert(key.to_string(), Value::Array(entries));
    Value::Object(body)
}

/// Mount job creation, a finished status, and one page of `kind` rows.
#[allow(dead_code)]
pub async fn mount_finished_job(server: &MockServer, kind: &str, rows: &[Value]) {
    let count = rows.len();
    let (messages, records) = if kind == "records" { (0, count) } else { (count, 0) };

    Mock::given(method("POST"))
        .and(path("/api/v1/search/jobs"))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({ "id": JOB_ID })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "state": "DONE GATHERING RESULTS",
            "messageCount": messages,
            "recordCount": records,
            "pendingErrors": [],
            "pendingWarnings": []
        })))
        .mount(server)
        .await;

    if count > 0 {
        Mock::given(method("GET"))
            .and(path(format!("/api/v1/search/jobs/{JOB_ID}/{kind}")))
            .and(query_param("offset", "0"))
            .and(query_param("limit", count.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(kind, rows)))
            .expect(1)
            .mount(server)
            .await;
    }
}
