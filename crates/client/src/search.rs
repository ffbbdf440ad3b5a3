//! Handle to one remote search job.
//!
//! # What this module handles:
//! - Submitting a job and keeping the client it was created with
//! - Status, deletion, and raw page fetches for that job
//! - The memoized message and record sequences
//!
//! # What this module does NOT handle:
//! - The polling/paging algorithm (see [`crate::pagination`])
//!
//! # Invariants
//! - Every call for a job goes through the client that created it
//! - `messages()` and `records()` each build their paginator at most once

use std::sync::OnceLock;

use crate::client::SumoClient;
use crate::endpoints;
use crate::error::Result;
use crate::models::{JobStatus, ResultKind, Row, SearchRequest};
use crate::pagination::{PageSource, Paginator};

/// Pages of one result kind of one job, read over HTTP.
#[derive(Debug, Clone)]
pub struct JobPages {
    client: SumoClient,
    job_id: String,
    kind: ResultKind,
}

impl JobPages {
    pub fn kind(&self) -> ResultKind {
        self.kind
    }
}

impl PageSource for JobPages {
    async fn status(&self) -> Result<JobStatus> {
        endpoints::get_job_status(&self.client, &self.job_id).await
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<Row>> {
        endpoints::get_page(&self.client, &self.job_id, self.kind, offset, limit).await
    }
}

/// A submitted search job.
#[derive(Debug)]
pub struct SearchJob {
    id: String,
    client: SumoClient,
    messages: OnceLock<Paginator<JobPages>>,
    records: OnceLock<Paginator<JobPages>>,
}

impl SearchJob {
    /// Submit `request` and return a handle to the new job.
    pub async fn create(client: &SumoClient, request: &SearchRequest) -> Result<Self> {
        let created = endpoints::create_job(client, request).await?;
        Ok(Self::new(client.clone(), created.id))
    }

    fn new(client: SumoClient, id: String) -> Self {
        Self {
            id,
            client,
            messages: OnceLock::new(),
            records: OnceLock::new(),
        }
    }

    /// Service-assigned job id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The client this job was created with.
    pub fn client(&self) -> &SumoClient {
        &self.client
    }

    /// Fetch a fresh status snapshot.
    pub async fn status(&self) -> Result<JobStatus> {
        endpoints::get_job_status(&self.client, &self.id).await
    }

    /// Delete the job on the service.
    ///
    /// Later status calls for the same id are expected to fail with a
    /// [`ClientError`](crate::SumoError::ClientError).
    pub async fn delete(&self) -> Result<()> {
        endpoints::delete_job(&self.client, &self.id).await
    }

    pub async fn fetch_messages(&self, offset: u64, limit: u64) -> Result<Vec<Row>> {
        endpoints::get_messages(&self.client, &self.id, offset, limit).await
    }

    pub async fn fetch_records(&self, offset: u64, limit: u64) -> Result<Vec<Row>> {
        endpoints::get_records(&self.client, &self.id, offset, limit).await
    }

    /// Every message of the job, as a lazily paged sequence.
    pub fn messages(&self) -> &Paginator<JobPages> {
        self.messages
            .get_or_init(|| self.paginator(ResultKind::Messages))
    }

    /// Every aggregate record of the job, as a lazily paged sequence.
    pub fn records(&self) -> &Paginator<JobPages> {
        self.records.get_or_init(|| self.paginator(ResultKind::Records))
    }

    /// Sequence for `kind`; same as [`messages`](Self::messages) or [`records`](Self::records).
    pub fn results(&self, kind: ResultKind) -> &Paginator<JobPages> {
        match kind {
            ResultKind::Messages => self.messages(),
            ResultKind::Records => self.records(),
        }
    }

    fn paginator(&self, kind: ResultKind) -> Paginator<JobPages> {
        let pages = JobPages {
            client: self.client.clone(),
            job_id: self.id.clone(),
            kind,
        };
        Paginator::new(pages, kind.count_key()).with_poll_interval(self.client.poll_interval())
    }
}

impl SumoClient {
    /// Submit a search job. Shorthand for [`SearchJob::create`].
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchJob> {
        SearchJob::create(self, request).await
    }
}
