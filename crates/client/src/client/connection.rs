//! Per-host connections and the host-keyed connection cache.
//!
//! # What this module handles:
//! - One [`Connection`] per distinct host, holding its origin URL and the
//!   session cookie last seen from that host
//! - The redirect allow-list check
//! - Building request URLs from a connection and a versioned path
//!
//! # Invariants
//! - A connection is created at most once per host key and lives as long as
//!   the client that owns the pool
//! - No connection is ever created for a host outside the allowed domain

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::debug;
use url::Url;

use crate::error::{Result, SumoError};

/// `host` or `host:port` when the URL carries a non-default port.
pub fn host_key(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| SumoError::InvalidUrl(format!("URL has no host: {url}")))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}

/// A host belongs to `domain` when it equals it or is a subdomain of it.
pub fn is_allowed_host(host: &str, domain: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let domain = domain.trim_start_matches('.').to_ascii_lowercase();
    !domain.is_empty() && (host == domain || host.ends_with(&format!(".{domain}")))
}

/// Leaving `https` for any other scheme would expose the Basic credentials.
pub fn is_scheme_downgrade(from: &Url, to: &Url) -> bool {
    from.scheme() == "https" && to.scheme() != "https"
}

/// Reduce `Set-Cookie` values to the `name=value` pairs sent back in `Cookie`.
fn cookie_from_headers(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| !pair.is_empty())
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Session state for one host.
#[derive(Debug)]
pub struct Connection {
    origin: Url,
    host_key: String,
    cookie: Mutex<Option<String>>,
}

impl Connection {
    pub fn new(url: &Url) -> Result<Self> {
        let host_key = host_key(url)?;
        let mut origin = url.clone();
        origin.set_path("/");
        origin.set_query(None);
        origin.set_fragment(None);
        Ok(Self {
            origin,
            host_key,
            cookie: Mutex::new(None),
        })
    }

    /// Scheme, host and port of this connection, with an empty path.
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn host_key(&self) -> &str {
        &self.host_key
    }

    /// The cookie to send with the next request, if one has been seen.
    pub fn cookie(&self) -> Option<String> {
        self.cookie
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the remembered cookie when the response set one.
    pub fn capture_cookie(&self, headers: &HeaderMap) {
        if let Some(cookie) = cookie_from_headers(headers) {
            debug!(host = %self.host_key, "Captured session cookie");
            *self.cookie.lock().unwrap_or_else(PoisonError::into_inner) = Some(cookie);
        }
    }

    /// Absolute URL for an already-versioned path plus query pairs.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url> {
        let mut url = self
            .origin
            .join(path)
            .map_err(|e| SumoError::InvalidUrl(format!("{path}: {e}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query.iter());
        }
        Ok(url)
    }
}

/// Host-keyed cache of connections plus the host requests currently go to.
#[derive(Debug)]
pub struct ConnectionPool {
    connections: Mutex<HashMap<String, Arc<Connection>>>,
    active: Mutex<Arc<Connection>>,
}

impl ConnectionPool {
    pub fn new(base_url: &Url) -> Result<Self> {
        let initial = Arc::new(Connection::new(base_url)?);
        let mut connections = HashMap::new();
        connections.insert(initial.host_key().to_string(), Arc::clone(&initial));
        Ok(Self {
            connections: Mutex::new(connections),
            active: Mutex::new(initial),
        })
    }

    /// Connection that new logical requests start on.
    pub fn active(&self) -> Arc<Connection> {
        Arc::clone(&self.active.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn set_active(&self, connection: &Arc<Connection>) {
        let mut active = self.active.lock().unwrap_or_else(PoisonError::into_inner);
        if active.host_key() != connection.host_key() {
            debug!(host = %connection.host_key(), "Switching active host");
            *active = Arc::clone(connection);
        }
    }

    /// Cached connection for the host of `url`, created on first use.
    pub fn get_or_create(&self, url: &Url) -> Result<Arc<Connection>> {
        let key = host_key(url)?;
        let mut connections = self
            .connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = connections.get(&key) {
            return Ok(Arc::clone(existing));
        }

        debug!(host = %key, "Opening connection");
        let connection = Arc::new(Connection::new(url)?);
        connections.insert(key, Arc::clone(&connection));
        Ok(connection)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.connections
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
