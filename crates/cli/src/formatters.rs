//! Row formatting for stdout.
//!
//! Responsibilities:
//! - Render a message as its `_raw` text, or one key of `_raw` parsed as JSON.
//! - Render a record as a single JSON line.
//!
//! Does NOT handle:
//! - Writing to stdout (see `dispatch`).

use anyhow::{Context, Result};
use serde_json::Value;
use sumo_client::{ResultKind, Row};

/// Field holding a message's original log line.
pub const RAW_FIELD: &str = "_raw";

/// How rows are turned into output lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowFormat {
    /// Print `_raw` as-is.
    Raw,
    /// Parse `_raw` as JSON and print one key.
    ExtractKey(String),
    /// Print the whole row as JSON.
    Json,
}

impl RowFormat {
    pub fn for_kind(kind: ResultKind, extract_key: Option<String>) -> Self {
        match (kind, extract_key) {
            (ResultKind::Records, _) => RowFormat::Json,
            (ResultKind::Messages, Some(key)) => RowFormat::ExtractKey(key),
            (ResultKind::Messages, None) => RowFormat::Raw,
        }
    }

    pub fn format(&self, row: &Row) -> Result<String> {
        match self {
            RowFormat::Raw => Ok(raw_text(row).to_string()),
            RowFormat::ExtractKey(key) => extract_key(row, key),
            RowFormat::Json => Ok(Value::Object(row.clone()).to_string()),
        }
    }
}

fn raw_text(row: &Row) -> &str {
    row.get(RAW_FIELD).and_then(Value::as_str).unwrap_or_default()
}

/// Strings print without quotes; a missing key prints an empty line.
fn extract_key(row: &Row, key: &str) -> Result<String> {
    let parsed: Value = serde_json::from_str(raw_text(row))
        .with_context(|| format!("Message {RAW_FIELD} is not JSON, cannot extract {key:?}"))?;

    Ok(match parsed.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    })
}
