//! Testing utilities for search client tests.
//!
//! This module provides fixture loading, sample rows, and a scripted
//! [`PageSource`] that replays status snapshots without any HTTP.
//! Available when running tests or when the `test-utils` feature is enabled.
//!
//! # Example
//! ```ignore
//! use sumo_client::testing::{ScriptedSource, job_status, sample_rows};
//!
//! let source = ScriptedSource::new(sample_rows(10))
//!     .with_statuses([job_status("DONE GATHERING RESULTS", 10)]);
//! ```

use std::collections::VecDeque;
use std::path::Path;
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{Result, SumoError};
use crate::models::{JobStatus, Row};
use crate::pagination::PageSource;

/// Load a JSON fixture file from the fixtures directory.
///
/// # Panics
/// - If the fixture file cannot be read
/// - If the file content is not valid JSON
pub fn load_fixture(fixture_path: &str) -> Value {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    let full_path = manifest_dir.join("fixtures").join(fixture_path);
    let content = std::fs::read_to_string(&full_path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", full_path.display()));
    serde_json::from_str(&content).expect("Invalid JSON in fixture")
}

/// A status snapshot reporting `count` messages and `count` records.
pub fn job_status(state: &str, count: u64) -> JobStatus {
    JobStatus {
        state: state.to_string(),
        message_count: count,
        record_count: count,
        ..Default::default()
    }
}

/// `n` rows of the form `{"_raw": "message <i>", "seq": <i>}`.
pub fn sample_rows(n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            let mut row = Row::new();
            row.insert("_raw".to_string(), Value::String(format!("message {i}")));
            row.insert("seq".to_string(), Value::from(i));
            row
        })
        .collect()
}

/// The wire envelope for a page of rows, e.g. `{"messages": [{"map": ...}]}`.
pub fn page_envelope(key: &str, rows: &[Row]) -> Value {
    let entries: Vec<Value> = rows
        .iter()
        .map(|row| serde_json::json!({ "map": row }))
        .collect();
    let mut envelope = serde_json::Map::new();
    envelope.insert(key.to_string(), Value::Array(entries));
    Value::Object(envelope)
}

/// A [`PageSource`] that replays scripted status snapshots over fixed rows.
///
/// Statuses are returned in order; the last one repeats once the script runs
/// out. Pages are sliced from the rows given at construction. Every call is
/// recorded for later assertions.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    rows: Vec<Row>,
    statuses: Mutex<VecDeque<JobStatus>>,
    last: Mutex<Option<JobStatus>>,
    status_error: Mutex<Option<SumoError>>,
    status_calls: Mutex<usize>,
    page_requests: Mutex<Vec<(u64, u64)>>,
}

impl ScriptedSource {
    pub fn new(rows: Vec<Row>) -> Self {
        Self {
            rows,
            ..Default::default()
        }
    }

    pub fn with_statuses(self, statuses: impl IntoIterator<Item = JobStatus>) -> Self {
        self.statuses.lock().unwrap().extend(statuses);
        self
    }

    /// Fail the next status call with `error`.
    pub fn with_status_error(self, error: SumoError) -> Self {
        *self.status_error.lock().unwrap() = Some(error);
        self
    }

    pub fn status_calls(&self) -> usize {
        *self.status_calls.lock().unwrap()
    }

    /// `(offset, limit)` of every page requested so far.
    pub fn page_requests(&self) -> Vec<(u64, u64)> {
        self.page_requests.lock().unwrap().clone()
    }

    fn next_status(&self) -> Result<JobStatus> {
        *self.status_calls.lock().unwrap() += 1;
        if let Some(error) = self.status_error.lock().unwrap().take() {
            return Err(error);
        }

        let mut last = self.last.lock().unwrap();
        if let Some(status) = self.statuses.lock().unwrap().pop_front() {
            *last = Some(status);
        }
        last.clone()
            .ok_or_else(|| SumoError::InvalidResponse("no scripted status".to_string()))
    }

    fn slice(&self, offset: u64, limit: u64) -> Vec<Row> {
        self.page_requests.lock().unwrap().push((offset, limit));
        self.rows
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect()
    }
}

impl PageSource for ScriptedSource {
    async fn status(&self) -> Result<JobStatus> {
        self.next_status()
    }

    async fn page(&self, offset: u64, limit: u64) -> Result<Vec<Row>> {
        Ok(self.slice(offset, limit))
    }
}
