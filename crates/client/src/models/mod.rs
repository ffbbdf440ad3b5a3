//! Data models for search API requests and responses.
//!
//! Types are organized by resource in submodules and re-exported here
//! for convenient access.

pub mod jobs;

pub use jobs::{
    CreatedJob, JobStatus, ResultKind, Row, SearchRequest, states, unwrap_rows,
};
