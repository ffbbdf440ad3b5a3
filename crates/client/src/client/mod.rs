//! Main search API client.
//!
//! This module provides the primary [`SumoClient`]: an authenticated transport
//! that tracks a session cookie per host and follows same-domain redirects.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `connection`: Per-host connection state and the connection cache
//! - `transport`: The send loop with redirect handling
//!
//! # What this module does NOT handle:
//! - Search job endpoints (see [`crate::endpoints::search`] and [`crate::search`])
//! - Credential lookup (see `sumo_config::CredentialResolver`)
//!
//! # Invariants
//! - Cloning a client shares its connection cache and cookies
//! - Requests are never retried except to follow a redirect

pub mod builder;
pub(crate) mod connection;
mod transport;

use std::sync::Arc;
use std::time::Duration;

use crate::auth::BasicAuth;
use connection::ConnectionPool;

#[derive(Debug)]
pub(crate) struct ClientInner {
    pub(crate) http: reqwest::Client,
    pub(crate) auth: BasicAuth,
    pub(crate) pool: ConnectionPool,
    pub(crate) allowed_domain: String,
    pub(crate) poll_interval: Duration,
}

/// Search API client.
///
/// # Creating a Client
///
/// ```rust,ignore
/// use sumo_client::SumoClient;
/// use sumo_config::Credentials;
/// use secrecy::SecretString;
///
/// let client = SumoClient::builder()
///     .credentials(Credentials::new("id", SecretString::new("key".to_string().into())))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct SumoClient {
    pub(crate) inner: Arc<ClientInner>,
}

impl SumoClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SumoClientBuilder {
        builder::SumoClientBuilder::new()
    }

    /// Origin that new requests are sent to.
    ///
    /// Starts as the configured base URL and moves when a redirect to another
    /// allowed host completes.
    pub fn base_url(&self) -> String {
        self.inner
            .pool
            .active()
            .origin()
            .as_str()
            .trim_end_matches('/')
            .to_string()
    }

    pub fn allowed_domain(&self) -> &str {
        &self.inner.allowed_domain
    }

    pub fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    /// Identifier half of the credentials in use.
    pub fn access_id(&self) -> &str {
        self.inner.auth.access_id()
    }

    /// Session cookie remembered for the active host.
    pub fn cookie(&self) -> Option<String> {
        self.inner.pool.active().cookie()
    }

    /// Number of distinct hosts this client has opened connections to.
    pub fn connection_count(&self) -> usize {
        self.inner.pool.len()
    }

    /// Whether a connection to `host_key` (`host` or `host:port`) exists.
    pub fn has_connection(&self, host_key: &str) -> bool {
        self.inner.pool.contains(host_key)
    }
}
