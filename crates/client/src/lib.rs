//! Search job client for the Sumo Logic API.
//!
//! This crate submits search jobs, polls their status, and pages through
//! their messages or records as a single lazy stream of rows. The transport
//! authenticates with HTTP Basic credentials, keeps a session cookie per host,
//! and follows redirects only within the allowed domain.
//!
//! ```rust,ignore
//! use futures::TryStreamExt;
//! use sumo_client::{SearchRequest, SumoClient};
//!
//! let client = SumoClient::builder().from_config(&config).build()?;
//! let job = client.search(&SearchRequest::new("error | count by _sourceHost")).await?;
//! let records = job.records().collect_rows().await?;
//! job.delete().await?;
//! ```

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod pagination;
pub mod search;
mod serde_helpers;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::BasicAuth;
pub use client::SumoClient;
pub use client::builder::SumoClientBuilder;
pub use endpoints::ApiRequest;
pub use error::{Result, SumoError};
pub use models::{CreatedJob, JobStatus, ResultKind, Row, SearchRequest, states};
pub use pagination::{PageSource, Paginator, page_limit};
pub use search::{JobPages, SearchJob};
