//! Search job endpoints.

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::client::SumoClient;
use crate::endpoints::request::ApiRequest;
use crate::endpoints::url_encoding::encode_path_segment;
use crate::error::{Result, SumoError};
use crate::models::{CreatedJob, JobStatus, ResultKind, Row, SearchRequest, unwrap_rows};

const JOBS_PATH: &str = "/search/jobs";

/// Longest query prefix written to logs.
const LOGGED_QUERY_CHARS: usize = 32;

/// Path of a single job, relative to the API version prefix.
pub fn job_path(job_id: &str) -> String {
    format!("{JOBS_PATH}/{}", encode_path_segment(job_id))
}

fn redact_query(query: &str) -> String {
    let mut chars = query.chars();
    let prefix: String = chars.by_ref().take(LOGGED_QUERY_CHARS).collect();
    if chars.next().is_some() {
        format!("{prefix}...")
    } else {
        prefix
    }
}

fn parse_json<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|e| SumoError::InvalidResponse(format!("Failed to parse {what}: {e}")))
}

/// Submit a new search job.
pub async fn create_job(client: &SumoClient, request: &SearchRequest) -> Result<CreatedJob> {
    debug!(query = %redact_query(&request.query), "Creating search job");

    let body = serde_json::to_string(request)
        .map_err(|e| SumoError::InvalidRequest(format!("Failed to encode search: {e}")))?;
    let response = client.send(&ApiRequest::post(JOBS_PATH).body(body)).await?;
    let created: CreatedJob = parse_json(&response, "job creation response")?;

    debug!(job_id = %created.id, "Search job created");
    Ok(created)
}

/// Fetch a fresh status snapshot.
pub async fn get_job_status(client: &SumoClient, job_id: &str) -> Result<JobStatus> {
    let response = client.send(&ApiRequest::get(job_path(job_id))).await?;
    let status: JobStatus = parse_json(&response, "job status")?;

    debug!(
        job_id,
        state = %status.state,
        messages = status.message_count,
        records = status.record_count,
        "Job status"
    );
    Ok(status)
}

/// Delete (cancel) a job.
pub async fn delete_job(client: &SumoClient, job_id: &str) -> Result<()> {
    debug!(job_id, "Deleting search job");
    client.send(&ApiRequest::delete(job_path(job_id))).await?;
    Ok(())
}

/// Fetch `limit` rows of one result kind starting at `offset`.
pub async fn get_page(
    client: &SumoClient,
    job_id: &str,
    kind: ResultKind,
    offset: u64,
    limit: u64,
) -> Result<Vec<Row>> {
    debug!(job_id, %kind, offset, limit, "Fetching result page");

    let request = ApiRequest::get(format!("{}/{}", job_path(job_id), kind.path_segment()))
        .query("offset", offset)
        .query("limit", limit);
    let response = client.send(&request).await?;
    unwrap_rows(&response, kind)
}

pub async fn get_messages(
    client: &SumoClient,
    job_id: &str,
    offset: u64,
    limit: u64,
) -> Result<Vec<Row>> {
    get_page(client, job_id, ResultKind::Messages, offset, limit).await
}

pub async fn get_records(
    client: &SumoClient,
    job_id: &str,
    offset: u64,
    limit: u64,
) -> Result<Vec<Row>> {
    get_page(client, job_id, ResultKind::Records, offset, limit).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_path_encodes_id() {
        assert_eq!(job_path("ABC123"), "/search/jobs/ABC123");
        assert_eq!(job_path("a/b"), "/search/jobs/a%2Fb");
    }

    #[test]
    fn test_redact_query() {
        assert_eq!(redact_query("error"), "error");
        let long = "_sourceCategory=prod/app/web AND error | count by _sourceHost";
        let redacted = redact_query(long);
        assert!(redacted.ends_with("..."));
        assert_eq!(redacted.chars().count(), LOGGED_QUERY_CHARS + 3);
    }
}
