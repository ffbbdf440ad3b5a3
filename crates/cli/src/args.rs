//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read connection overrides from flags or their environment variables.
//!
//! Non-responsibilities:
//! - Does not run the search (see `dispatch` module).

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sumo")]
#[command(about = "Run a Sumo Logic search and print its messages or records", long_about = None)]
#[command(disable_version_flag = true)]
#[command(
    after_help = "Examples:\n  sumo -q 'error' -f 2014-01-01T00:00:00 -t 2014-01-02T00:00:00 -z EST\n  sumo -q '_sourceCategory=app' -e msg\n  sumo -q 'error | count by _sourceHost' -r\n"
)]
pub struct Cli {
    /// The query that will be sent to Sumo
    #[arg(short, long, required_unless_present = "version")]
    pub query: Option<String>,

    /// The start time of the query (ISO 8601)
    #[arg(short, long, value_name = "FROM")]
    pub from: Option<String>,

    /// The end time of the query (ISO 8601)
    #[arg(short, long, value_name = "TO")]
    pub to: Option<String>,

    /// The time zone of the FROM and TO times
    #[arg(short = 'z', long, value_name = "TZ")]
    pub time_zone: Option<String>,

    /// The key to extract from each message's raw JSON
    #[arg(short, long, value_name = "KEY", conflicts_with = "records")]
    pub extract_key: Option<String>,

    /// Print aggregate records instead of messages
    #[arg(short, long)]
    pub records: bool,

    /// Print the version
    #[arg(short = 'v', long)]
    pub version: bool,

    /// API endpoint (e.g., https://api.us2.sumologic.com)
    #[arg(long, env = "SUMO_BASE_URL")]
    pub base_url: Option<String>,

    /// Path to the credentials file (default: ~/.sumo_creds)
    #[arg(long, env = "SUMO_CONFIG_PATH", value_name = "FILE")]
    pub config_path: Option<PathBuf>,

    /// Name of the entry to use from the credentials file
    #[arg(long, env = "SUMO_CREDENTIAL", value_name = "NAME")]
    pub credential: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "SUMO_TIMEOUT")]
    pub timeout: Option<u64>,
}

/// `Some` only for values that are not blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
