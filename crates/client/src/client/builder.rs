//! Client builder for constructing [`SumoClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Resolving credentials, either given directly or through a resolver
//! - Validating and normalizing the base URL
//! - Configuring the underlying HTTP client (timeout, no automatic redirects)
//!
//! # What this module does NOT handle:
//! - Sending requests (see `transport`)
//! - Reading configuration from the environment (see `sumo_config::ConfigLoader`)
//!
//! # Invariants
//! - reqwest never follows redirects on its own; the client's send loop does,
//!   so that the allow-list and hop bound apply to every hop

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use sumo_config::{
    Config, CredentialResolver, Credentials,
    constants::{DEFAULT_ALLOWED_DOMAIN, DEFAULT_BASE_URL, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT_SECS},
};
use url::Url;

use crate::auth::BasicAuth;
use crate::client::connection::ConnectionPool;
use crate::client::{ClientInner, SumoClient};
use crate::error::{Result, SumoError};

/// Builder for creating a new [`SumoClient`].
///
/// Every option has a default except the credentials, which must come from
/// [`credentials`](Self::credentials) or a [`resolver`](Self::resolver).
pub struct SumoClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    resolver: Option<Box<dyn CredentialResolver>>,
    allowed_domain: String,
    timeout: Duration,
    poll_interval: Duration,
}

impl fmt::Debug for SumoClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SumoClientBuilder")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("resolver", &self.resolver.is_some())
            .field("allowed_domain", &self.allowed_domain)
            .field("timeout", &self.timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Default for SumoClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials: None,
            resolver: None,
            allowed_domain: DEFAULT_ALLOWED_DOMAIN.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl SumoClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the API endpoint, e.g. `https://api.us2.sumologic.com`.
    ///
    /// Trailing slashes are removed.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Use these credentials. Takes precedence over a resolver.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Resolve credentials at build time.
    pub fn resolver(mut self, resolver: impl CredentialResolver + 'static) -> Self {
        self.resolver = Some(Box::new(resolver));
        self
    }

    /// Domain suffix redirect targets must belong to.
    pub fn allowed_domain(mut self, domain: impl Into<String>) -> Self {
        self.allowed_domain = domain.into();
        self
    }

    /// Set the request timeout.
    ///
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Wait between job status polls. Default is one second.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Create a client builder from configuration.
    ///
    /// Credentials are looked up lazily at [`build`](Self::build) time through
    /// the resolver chain the configuration describes.
    pub fn from_config(mut self, config: &Config) -> Self {
        self.base_url = config.connection.base_url.clone();
        self.allowed_domain = config.connection.allowed_domain.clone();
        self.timeout = config.connection.timeout;
        self.resolver = Some(Box::new(config.credential_resolver()));
        self
    }

    fn normalize_base_url(url: &str) -> Result<Url> {
        let trimmed = url.trim().trim_end_matches('/');
        let parsed =
            Url::parse(trimmed).map_err(|e| SumoError::InvalidUrl(format!("{trimmed}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(SumoError::InvalidUrl(format!(
                "{trimmed}: expected an http(s) URL with a host"
            )));
        }
        Ok(parsed)
    }

    /// Build the [`SumoClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`SumoError::InvalidUrl`] for an unusable base URL,
    /// [`SumoError::NoCredsFound`] when no credentials can be resolved, and
    /// [`SumoError::Http`] if the HTTP client fails to build.
    pub fn build(self) -> Result<SumoClient> {
        let base_url = Self::normalize_base_url(&self.base_url)?;

        let credentials = match (self.credentials, self.resolver) {
            (Some(credentials), _) => credentials,
            (None, Some(resolver)) => resolver.resolve()?,
            (None, None) => {
                return Err(SumoError::NoCredsFound(
                    "No credentials were provided to the client".to_string(),
                ));
            }
        };

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(SumoClient {
            inner: Arc::new(ClientInner {
                http,
                auth: BasicAuth::new(&credentials),
                pool: ConnectionPool::new(&base_url)?,
                allowed_domain: self.allowed_domain.trim().trim_start_matches('.').to_lowercase(),
                poll_interval: self.poll_interval,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use sumo_config::{ConfigError, ConnectionConfig};

    fn creds() -> Credentials {
        Credentials::new("id", SecretString::new("key".to_string().into()))
    }

    struct NoCreds;

    impl CredentialResolver for NoCreds {
        fn resolve(&self) -> std::result::Result<Credentials, ConfigError> {
            Err(ConfigError::NoCredsFound("nothing configured".to_string()))
        }
    }

    struct Fixed;

    impl CredentialResolver for Fixed {
        fn resolve(&self) -> std::result::Result<Credentials, ConfigError> {
            Ok(Credentials::new("resolved", SecretString::new("s".to_string().into())))
        }
    }

    #[test]
    fn test_normalizes_base_url() {
        let client = SumoClient::builder()
            .base_url("https://api.us2.sumologic.com//")
            .credentials(creds())
            .build()
            .unwrap();
        assert_eq!(client.base_url(), "https://api.us2.sumologic.com");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = SumoClient::builder()
            .base_url("ftp://api.sumologic.com")
            .credentials(creds())
            .build()
            .unwrap_err();
        assert!(matches!(err, SumoError::InvalidUrl(_)));

        let err = SumoClient::builder()
            .base_url("not a url")
            .credentials(creds())
            .build()
            .unwrap_err();
        assert!(matches!(err, SumoError::InvalidUrl(_)));
    }

    #[test]
    fn test_missing_credentials() {
        let err = SumoClient::builder().build().unwrap_err();
        assert!(matches!(err, SumoError::NoCredsFound(_)));
    }

    #[test]
    fn test_resolver_error_is_surfaced_unchanged() {
        let err = SumoClient::builder().resolver(NoCreds).build().unwrap_err();
        assert!(matches!(err, SumoError::NoCredsFound(ref m) if m == "nothing configured"));
    }

    #[test]
    fn test_explicit_credentials_win_over_resolver() {
        let client = SumoClient::builder()
            .resolver(Fixed)
            .credentials(creds())
            .build()
            .unwrap();
        assert_eq!(client.access_id(), "id");

        let client = SumoClient::builder().resolver(Fixed).build().unwrap();
        assert_eq!(client.access_id(), "resolved");
    }

    #[test]
    fn test_allowed_domain_is_normalized() {
        let client = SumoClient::builder()
            .allowed_domain(" .SumoLogic.com ")
            .credentials(creds())
            .build()
            .unwrap();
        assert_eq!(client.allowed_domain(), "sumologic.com");
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let config = Config {
            connection: ConnectionConfig {
                base_url: "https://api.eu.sumologic.com".to_string(),
                allowed_domain: "sumologic.com".to_string(),
                timeout: Duration::from_secs(120),
            },
            credential_name: "default".to_string(),
            config_path: Some("/nonexistent/.sumo_creds".into()),
        };

        let builder = SumoClient::builder().from_config(&config);
        assert_eq!(builder.base_url, "https://api.eu.sumologic.com");
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert!(builder.resolver.is_some());

        let client = builder.credentials(creds()).build().unwrap();
        assert_eq!(client.base_url(), "https://api.eu.sumologic.com");
    }
}
