//! Search job models.
//!
//! # What this module handles:
//! - The job submission body
//! - Job status snapshots
//! - Unwrapping message/record pages from their envelope
//!
//! # What this module does NOT handle:
//! - HTTP transport (see [`crate::endpoints::search`])
//! - Pagination (see [`crate::pagination`])

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SumoError};

/// One result row: field name to value.
pub type Row = serde_json::Map<String, Value>;

/// Job state labels reported by the status endpoint.
pub mod states {
    pub const NOT_STARTED: &str = "NOT STARTED";
    pub const GATHERING_RESULTS: &str = "GATHERING RESULTS";
    pub const DONE_GATHERING_RESULTS: &str = "DONE GATHERING RESULTS";
    /// Prefix shared by every finished state.
    pub const DONE_PREFIX: &str = "DONE";
}

/// Parameters for a new search job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(rename = "timeZone", skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    /// Start of the search window (ISO 8601).
    pub fn from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// End of the search window (ISO 8601).
    pub fn to(mut self, to: impl Into<String>) -> Self {
        self.to = Some(to.into());
        self
    }

    /// Time zone the window bounds are expressed in.
    pub fn time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

/// Response to a job submission.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJob {
    pub id: String,
}

/// Which result set of a job to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Messages,
    Records,
}

impl ResultKind {
    /// Status field holding the number of rows of this kind.
    pub fn count_key(self) -> &'static str {
        match self {
            Self::Messages => "messageCount",
            Self::Records => "recordCount",
        }
    }

    /// Sub-resource of the job, also the envelope key of a page.
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Messages => "messages",
            Self::Records => "records",
        }
    }
}

impl std::fmt::Display for ResultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// Snapshot of a job's progress.
///
/// Fields other than the state and the two counts (pending errors, histogram
/// buckets, ...) are kept verbatim in `extra`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobStatus {
    #[serde(default)]
    pub state: String,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub message_count: u64,
    #[serde(
        default,
        deserialize_with = "crate::serde_helpers::u64_from_string_or_number"
    )]
    pub record_count: u64,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl JobStatus {
    /// Value of the named count field; unknown or non-numeric fields count as zero.
    pub fn count(&self, count_key: &str) -> u64 {
        match count_key {
            "messageCount" => self.message_count,
            "recordCount" => self.record_count,
            other => self.extra.get(other).and_then(Value::as_u64).unwrap_or(0),
        }
    }

    /// The job has finished gathering; no rows beyond the current counts will appear.
    pub fn is_done(&self) -> bool {
        self.state.starts_with(states::DONE_PREFIX)
    }

    /// The job is still producing rows.
    pub fn has_more(&self) -> bool {
        self.state == states::NOT_STARTED || self.state == states::GATHERING_RESULTS
    }

    /// No further rows will arrive, either because the job finished or because
    /// it reports a state this client does not recognize.
    pub fn is_terminal(&self) -> bool {
        !self.has_more()
    }
}

/// Unwrap a page body such as `{"messages": [{"map": {...}}, ...]}` into rows.
pub fn unwrap_rows(body: &str, kind: ResultKind) -> Result<Vec<Row>> {
    let value: Value = serde_json::from_str(body).map_err(|e| {
        SumoError::InvalidResponse(format!("Failed to parse {kind} page: {e}"))
    })?;

    let entries = value
        .get(kind.path_segment())
        .and_then(Value::as_array)
        .ok_or_else(|| SumoError::InvalidResponse(format!("Missing {kind} array in page")))?;

    entries
        .iter()
        .map(|entry| {
            entry
                .get("map")
                .and_then(Value::as_object)
                .cloned()
                .ok_or_else(|| SumoError::InvalidResponse(format!("{kind} entry without map")))
        })
        .collect()
}
