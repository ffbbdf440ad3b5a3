//! The send loop: one logical request, possibly several HTTP attempts.
//!
//! # Invariants
//! - Every attempt for a logical request sends the same method, path, query,
//!   body and caller headers; a redirect only changes the host
//! - At most `MAX_REDIRECT_DEPTH + 1` attempts are made
//! - The cookie is captured from every response, redirects and errors included

use std::sync::Arc;

use reqwest::header::LOCATION;
use sumo_config::constants::MAX_REDIRECT_DEPTH;
use tracing::debug;

use crate::client::SumoClient;
use crate::client::connection::{Connection, is_allowed_host, is_scheme_downgrade};
use crate::endpoints::request::{
    ApiRequest, classify_response, is_redirect_status, merged_headers, versioned_path,
};
use crate::error::{Result, SumoError};

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done { status: u16, body: String },
    Redirect(String),
}

impl SumoClient {
    /// Send a logical request and return the response body.
    ///
    /// # Errors
    ///
    /// - [`SumoError::ClientError`] / [`SumoError::ServerError`] for 4xx / 5xx
    /// - [`SumoError::DisallowedRedirectHost`] when a redirect leaves the
    ///   allowed domain or downgrades from `https`
    /// - [`SumoError::TooManyRedirects`] after the tenth redirected attempt
    /// - [`SumoError::Http`] for transport failures
    pub async fn send(&self, request: &ApiRequest) -> Result<String> {
        let path = versioned_path(&request.path);
        let mut connection = self.inner.pool.active();
        let mut depth = 0usize;

        loop {
            match self.attempt(&connection, request, &path).await? {
                Attempt::Done { status, body } => {
                    self.inner.pool.set_active(&connection);
                    return classify_response(status, body);
                }
                Attempt::Redirect(location) => {
                    let target = connection.origin().join(&location).map_err(|e| {
                        SumoError::InvalidUrl(format!("bad redirect location {location:?}: {e}"))
                    })?;
                    let host = target.host_str().unwrap_or_default().to_string();

                    if !is_allowed_host(&host, &self.inner.allowed_domain) {
                        debug!(%host, "Refusing redirect outside allowed domain");
                        return Err(SumoError::DisallowedRedirectHost(host));
                    }
                    if is_scheme_downgrade(connection.origin(), &target) {
                        debug!(%host, scheme = target.scheme(), "Refusing redirect off https");
                        return Err(SumoError::DisallowedRedirectHost(host));
                    }
                    if depth >= MAX_REDIRECT_DEPTH {
                        return Err(SumoError::TooManyRedirects(depth + 1));
                    }

                    depth += 1;
                    debug!(%host, depth, "Following redirect");
                    connection = self.inner.pool.get_or_create(&target)?;
                }
            }
        }
    }

    async fn attempt(
        &self,
        connection: &Arc<Connection>,
        request: &ApiRequest,
        path: &str,
    ) -> Result<Attempt> {
        let url = connection.url_for(path, &request.query)?;
        let cookie = connection.cookie();
        let headers = merged_headers(
            self.inner.auth.header_value(),
            cookie.as_deref(),
            &request.headers,
        )?;

        debug!(
            method = %request.method,
            host = %connection.host_key(),
            path,
            "Sending API request"
        );

        let mut builder = self
            .inner
            .http
            .request(request.method.clone(), url)
            .headers(headers);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        connection.capture_cookie(response.headers());

        if is_redirect_status(status)
            && let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|v| v.to_str().ok())
        {
            return Ok(Attempt::Redirect(location.to_string()));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) if status >= 400 => {
                debug!(status, error = %e, "Could not read error response body");
                String::new()
            }
            Err(e) => return Err(e.into()),
        };
        debug!(status, bytes = body.len(), "Received API response");

        Ok(Attempt::Done { status, body })
    }
}
