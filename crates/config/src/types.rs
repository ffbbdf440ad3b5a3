//! Configuration types for the Sumo search client.
//!
//! Responsibilities:
//! - Define the resolved connection settings handed to the client crate.
//! - Define the credential pair used for HTTP Basic authentication.
//!
//! Does NOT handle:
//! - Reading values from the environment or files (see `loader` and `credentials`).
//!
//! Invariants:
//! - The credential secret is always a `secrecy::SecretString` and never appears in `Debug` output.
//! - `Credentials` are immutable once constructed.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::constants::{DEFAULT_ALLOWED_DOMAIN, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Authentication pair for the search API.
///
/// `access_id` is the identifier half (historically an email address) and
/// `access_key` the secret half.
#[derive(Debug, Clone)]
pub struct Credentials {
    access_id: String,
    access_key: SecretString,
}

impl Credentials {
    pub fn new(access_id: impl Into<String>, access_key: SecretString) -> Self {
        Self {
            access_id: access_id.into(),
            access_key,
        }
    }

    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    pub fn access_key(&self) -> &SecretString {
        &self.access_key
    }
}

/// Connection configuration.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the API endpoint, without trailing slash.
    pub base_url: String,
    /// Domain suffix a redirect target must belong to.
    pub allowed_domain: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            allowed_domain: DEFAULT_ALLOWED_DOMAIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub connection: ConnectionConfig,
    /// Name of the entry to read from the credentials file.
    pub credential_name: String,
    /// Credentials file chosen explicitly; `None` means `~/.sumo_creds`.
    pub config_path: Option<PathBuf>,
}
