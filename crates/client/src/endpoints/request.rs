//! Logical request description and response classification.
//!
//! This module turns an [`ApiRequest`] into the concrete pieces sent on the
//! wire (versioned path, merged headers) and turns a response status into a
//! body or a typed error. It never performs I/O itself; the send loop lives
//! in [`crate::client::transport`].

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue};
use sumo_config::constants::{API_VERSION, DEFAULT_ERROR_MESSAGE};

use crate::error::{Result, SumoError};

/// A logical API request.
///
/// The same value is resent unchanged when a redirect moves the client to a
/// different host; only the host changes between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            headers: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Add a header; it replaces a default header of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Prefix `/api/v{N}` unless the path already carries it.
pub fn versioned_path(path: &str) -> String {
    let prefix = format!("/api/v{API_VERSION}");
    let path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };

    if path == prefix || path.starts_with(&format!("{prefix}/")) {
        path
    } else {
        format!("{prefix}{path}")
    }
}

/// Merge default headers with the caller's.
///
/// Defaults are `Authorization`, `Content-Type`, `Accept` and, when a session
/// cookie has been seen, `Cookie`. Caller headers win on a name clash
/// (case-insensitive). Headers whose value ends up empty are left out.
pub fn merged_headers(
    authorization: &str,
    cookie: Option<&str>,
    extra: &[(String, String)],
) -> Result<HeaderMap> {
    let mut entries: Vec<(HeaderName, String)> = vec![
        (AUTHORIZATION, authorization.to_string()),
        (CONTENT_TYPE, "application/json".to_string()),
        (ACCEPT, "application/json".to_string()),
        (COOKIE, cookie.unwrap_or_default().to_string()),
    ];

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SumoError::InvalidRequest(format!("invalid header name {name:?}: {e}")))?;
        entries.retain(|(existing, _)| *existing != name);
        entries.push((name, value.clone()));
    }

    let mut headers = HeaderMap::new();
    for (name, value) in entries {
        if value.trim().is_empty() {
            continue;
        }
        let value = HeaderValue::from_str(&value).map_err(|_| {
            SumoError::InvalidRequest(format!("invalid value for header {name}"))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Statuses that carry a `Location` to follow.
pub fn is_redirect_status(status: u16) -> bool {
    matches!(status, 301 | 302 | 303 | 307 | 308)
}

/// The `message` field of a JSON error body, or the default message.
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| DEFAULT_ERROR_MESSAGE.to_string())
}

/// Map a final (non-redirect) status and body to the caller's result.
pub fn classify_response(status: u16, body: String) -> Result<String> {
    match status {
        400..=499 => Err(SumoError::ClientError {
            status,
            message: extract_error_message(&body),
        }),
        500..=599 => Err(SumoError::ServerError {
            status,
            message: extract_error_message(&body),
        }),
        _ => Ok(body),
    }
}
