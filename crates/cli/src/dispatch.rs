//! Search execution for the CLI.
//!
//! Responsibilities:
//! - Resolve configuration from flags, environment, and the credentials file.
//! - Submit the search and stream every row of the chosen kind to stdout.
//!
//! Does NOT handle:
//! - Exit code mapping (see `error`).
//!
//! Invariants:
//! - stdout carries only result rows, one per line; diagnostics go to stderr.
//! - Rows are written as they arrive, not after the search completes.

use std::io::{BufWriter, Write};
use std::pin::pin;
use std::time::Duration;

use anyhow::{Context, Result};
use futures::TryStreamExt;
use sumo_client::{ResultKind, SearchRequest, SumoClient, SumoError};
use sumo_config::{Config, ConfigLoader};
use tracing::info;

use crate::args::{Cli, non_blank};
use crate::formatters::RowFormat;

/// Flags first, then environment, then defaults.
pub fn load_config(cli: &Cli) -> std::result::Result<Config, SumoError> {
    let mut loader = ConfigLoader::new();

    if let Some(url) = non_blank(cli.base_url.as_deref()) {
        loader = loader.with_base_url(url);
    }
    if let Some(path) = &cli.config_path
        && !path.to_string_lossy().trim().is_empty()
    {
        loader = loader.with_config_path(path.clone());
    }
    if let Some(name) = non_blank(cli.credential.as_deref()) {
        loader = loader.with_credential_name(name);
    }
    if let Some(secs) = cli.timeout {
        loader = loader.with_timeout(Duration::from_secs(secs));
    }

    Ok(loader.from_env()?.build()?)
}

pub fn search_request(cli: &Cli) -> Result<SearchRequest> {
    let query = non_blank(cli.query.as_deref()).context("A non-empty --query is required")?;

    let mut request = SearchRequest::new(query);
    if let Some(from) = non_blank(cli.from.as_deref()) {
        request = request.from(from);
    }
    if let Some(to) = non_blank(cli.to.as_deref()) {
        request = request.to(to);
    }
    if let Some(tz) = non_blank(cli.time_zone.as_deref()) {
        request = request.time_zone(tz);
    }
    Ok(request)
}

pub async fn run_command(cli: Cli) -> Result<()> {
    let request = search_request(&cli)?;
    let config = load_config(&cli)?;
    let client = SumoClient::builder().from_config(&config).build()?;

    let kind = if cli.records {
        ResultKind::Records
    } else {
        ResultKind::Messages
    };
    let format = RowFormat::for_kind(kind, cli.extract_key.clone());

    let job = client.search(&request).await?;
    info!(job_id = %job.id(), %kind, "Search job created");

    let mut out = BufWriter::new(std::io::stdout());
    let mut rows = pin!(job.results(kind).rows());
    let mut printed = 0u64;
    while let Some(row) = rows.try_next().await? {
        writeln!(out, "{}", format.format(&row)?)?;
        printed += 1;
        if printed % 1000 == 0 {
            out.flush()?;
        }
    }
    out.flush()?;

    info!(job_id = %job.id(), rows = printed, "Search finished");
    Ok(())
}
