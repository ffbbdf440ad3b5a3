//! Lazy, self-polling pagination over a job's result set.
//!
//! A [`Paginator`] turns "poll status, fetch a page, repeat" into a single
//! [`Stream`] of rows. Each step of the stream is driven by an immutable
//! cursor holding only the offset already consumed:
//!
//! 1. Poll status until the job reports more than `offset` rows or reaches a
//!    state in which no further rows will appear. Status is fetched fresh on
//!    every poll, with `poll_interval` between polls.
//! 2. Request `min(1000, total - offset)` rows, or nothing if that is zero.
//! 3. Emit the rows in order.
//! 4. Continue at `offset + limit` if the job was still `NOT STARTED` or
//!    `GATHERING RESULTS` when its status was resolved, or if the resolved
//!    total already reaches past this page.
//!
//! # Invariants
//! - A page at offset `o` is never requested before the job reports more
//!   than `o` rows, unless the job is terminal
//! - No page request exceeds [`MAX_PAGE_SIZE`] rows
//! - Requests are strictly sequential; the stream never has two in flight
//!
//! Streams are forward-only. Calling [`Paginator::rows`] again starts a new
//! walk from offset zero.

use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use futures::stream::{self, Stream, TryStreamExt};
use sumo_config::constants::{DEFAULT_POLL_INTERVAL, MAX_PAGE_SIZE};
use tracing::debug;

use crate::error::{Result, SumoError};
use crate::models::{JobStatus, Row};

/// Where a paginator gets status snapshots and pages from.
pub trait PageSource: Send + Sync {
    fn status(&self) -> impl Future<Output = Result<JobStatus>> + Send;

    fn page(&self, offset: u64, limit: u64) -> impl Future<Output = Result<Vec<Row>>> + Send;
}

/// Rows to request for a page starting at `offset` when `total` are known.
pub fn page_limit(total: u64, offset: u64) -> u64 {
    total.saturating_sub(offset).min(MAX_PAGE_SIZE)
}

#[derive(Debug, Clone, Copy)]
struct Cursor {
    offset: u64,
}

/// Result sequence over one [`PageSource`].
#[derive(Debug)]
pub struct Paginator<S> {
    source: S,
    count_key: String,
    poll_interval: Duration,
}

impl<S: PageSource> Paginator<S> {
    /// `count_key` names the status field holding the total, e.g. `messageCount`.
    pub fn new(source: S, count_key: impl Into<String>) -> Self {
        Self {
            source,
            count_key: count_key.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn count_key(&self) -> &str {
        &self.count_key
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    async fn resolve_status(&self, offset: u64) -> Result<JobStatus> {
        loop {
            let status = self.source.status().await?;
            if status.count(&self.count_key) > offset || status.is_terminal() {
                return Ok(status);
            }

            debug!(
                state = %status.state,
                offset,
                count_key = %self.count_key,
                "Waiting for more results"
            );
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// One item per page, in order. Pages may be empty.
    pub fn pages(&self) -> impl Stream<Item = Result<Vec<Row>>> + Send + '_ {
        stream::try_unfold(Some(Cursor { offset: 0 }), move |cursor| async move {
            let Some(Cursor { offset }) = cursor else {
                return Ok::<_, SumoError>(None);
            };

            let status = self.resolve_status(offset).await?;
            let total = status.count(&self.count_key);
            let limit = page_limit(total, offset);
            let rows = if limit > 0 {
                self.source.page(offset, limit).await?
            } else {
                Vec::new()
            };

            let next_offset = offset + limit;
            let next = (status.has_more() || next_offset < total).then_some(Cursor {
                offset: next_offset,
            });
            debug!(
                offset,
                limit,
                total,
                state = %status.state,
                more = next.is_some(),
                "Result page"
            );
            Ok(Some((rows, next)))
        })
    }

    /// Every row, in order, fetched lazily as the stream is polled.
    pub fn rows(&self) -> impl Stream<Item = Result<Row>> + Send + '_ {
        self.pages()
            .map_ok(|rows| stream::iter(rows.into_iter().map(Ok)))
            .try_flatten()
    }

    /// Call `f` with each row in order, stopping at the first error.
    pub async fn for_each_row<F>(&self, mut f: F) -> Result<()>
    where
        F: FnMut(Row),
    {
        let mut rows = pin!(self.rows());
        while let Some(row) = rows.try_next().await? {
            f(row);
        }
        Ok(())
    }

    /// Walk the whole sequence and return every row.
    pub async fn collect_rows(&self) -> Result<Vec<Row>> {
        self.rows().try_collect().await
    }
}
