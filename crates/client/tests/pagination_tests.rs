//! End-to-end pagination over HTTP.
//!
//! # Invariants
//! - Pages are requested with `offset`/`limit` query parameters, at most 1000
//!   rows each, in order
//! - No page is requested while the job reports no rows beyond the offset
//! - The memoized sequences restart from offset zero on each walk

mod common;

use common::*;
use futures::TryStreamExt;
use sumo_client::states;
use wiremock::matchers::{method, path, query_param};

const JOB_ID: &str = "6F1C0E4A2D3B5C7E";

fn status_body(state: &str, messages: u64, records: u64) -> serde_json::Value {
    serde_json::json!({
        "state": state,
        "messageCount": messages,
        "recordCount": records,
        "histogramBuckets": [],
        "pendingErrors": [],
        "pendingWarnings": []
    })
}

async fn job_on(server: &MockServer) -> sumo_client::SearchJob {
    Mock::given(method("POST"))
        .and(path("/api/v1/search/jobs"))
        .respond_with(ResponseTemplate::new(202).set_body_json(load_fixture("search/create_job.json")))
        .mount(server)
        .await;

    test_client(&server.uri())
        .search(&SearchRequest::new("error"))
        .await
        .unwrap()
}

async fn mount_page(server: &MockServer, kind: &str, rows: &[sumo_client::Row], offset: usize, limit: usize) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}/{kind}")))
        .and(query_param("offset", offset.to_string()))
        .and(query_param("limit", limit.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(page_envelope(kind, &rows[offset..offset + limit])),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_messages_walk_three_pages() {
    let mock_server = MockServer::start().await;
    let job = job_on(&mock_server).await;
    let rows = sample_rows(2500);

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_body(states::DONE_GATHERING_RESULTS, 2500, 0)),
        )
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "messages", &rows, 0, 1000).await;
    mount_page(&mock_server, "messages", &rows, 1000, 1000).await;
    mount_page(&mock_server, "messages", &rows, 2000, 500).await;

    let collected = job.messages().collect_rows().await.unwrap();

    assert_eq!(collected.len(), 2500);
    assert_eq!(collected, rows);
}

#[tokio::test]
async fn test_records_wait_for_gathering_job() {
    let mock_server = MockServer::start().await;
    let job = job_on(&mock_server).await;
    let rows = sample_rows(2);

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body(states::NOT_STARTED, 0, 0)))
        .up_to_n_times(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(status_body(states::GATHERING_RESULTS, 10, 2)),
        )
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_body(states::DONE_GATHERING_RESULTS, 10, 2)),
        )
        .mount(&mock_server)
        .await;

    mount_page(&mock_server, "records", &rows, 0, 2).await;

    let collected: Vec<_> = job.records().rows().try_collect().await.unwrap();

    assert_eq!(collected, rows);

    let status_polls = mock_server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == format!("/api/v1/search/jobs/{JOB_ID}"))
        .count();
    assert_eq!(status_polls, 4);
}

#[tokio::test]
async fn test_page_error_stops_the_stream() {
    let mock_server = MockServer::start().await;
    let job = job_on(&mock_server).await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_body(states::DONE_GATHERING_RESULTS, 5, 0)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}/messages")))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = job.messages().collect_rows().await.unwrap_err();

    assert!(err.is_server_error());
    assert_eq!(err.to_string(), "Error sending API request");
}

#[tokio::test]
async fn test_memoized_sequence_can_be_walked_twice() {
    let mock_server = MockServer::start().await;
    let job = job_on(&mock_server).await;
    let rows = sample_rows(3);

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(status_body(states::DONE_GATHERING_RESULTS, 3, 0)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/api/v1/search/jobs/{JOB_ID}/messages")))
        .and(query_param("offset", "0"))
        .and(query_param("limit", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page_envelope("messages", &rows)))
        .expect(2)
        .mount(&mock_server)
        .await;

    let mut seen = 0;
    job.messages().for_each_row(|_| seen += 1).await.unwrap();
    let again = job.messages().collect_rows().await.unwrap();

    assert_eq!(seen, 3);
    assert_eq!(again, rows);
}
