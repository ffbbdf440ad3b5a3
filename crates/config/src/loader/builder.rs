//! Builder-pattern configuration loader.
//!
//! Responsibilities:
//! - Collect connection settings from builder calls, `.env`, and the environment.
//! - Validate and normalize the base URL and timeout.
//! - Produce a [`Config`] and the matching [`CredentialResolver`].
//!
//! Invariants / Assumptions:
//! - Builder methods take precedence over environment variables.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::path::{Path, PathBuf};
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use crate::constants::{
    DEFAULT_ALLOWED_DOMAIN, DEFAULT_BASE_URL, DEFAULT_CREDENTIAL_NAME,
    DEFAULT_TIMEOUT_SECS, MAX_TIMEOUT_SECS,
};
use crate::credentials::{ChainedCredentials, EnvCredentials, FileCredentials};
use crate::types::{Config, ConnectionConfig};

/// Configuration loader that builds config from builder calls and the environment.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    allowed_domain: Option<String>,
    timeout: Option<Duration>,
    credential_name: Option<String>,
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new loader with nothing set.
    pub fn new() -> Self {
        Self::default()
    }

    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file will not be
    /// loaded. Missing `.env` files are silently ignored.
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Set the base URL of the API endpoint.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the domain suffix redirects may land on.
    pub fn with_allowed_domain(mut self, domain: String) -> Self {
        self.allowed_domain = Some(domain);
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Select the credentials file entry to use.
    pub fn with_credential_name(mut self, name: String) -> Self {
        self.credential_name = Some(name);
        self
    }

    /// Override the credentials file path.
    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    /// Apply `SUMO_*` environment variables for anything not already set.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    pub(crate) fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub(crate) fn allowed_domain(&self) -> Option<&str> {
        self.allowed_domain.as_deref()
    }

    pub(crate) fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub(crate) fn credential_name(&self) -> Option<&str> {
        self.credential_name.as_deref()
    }

    pub(crate) fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_allowed_domain(&mut self, domain: Option<String>) {
        self.allowed_domain = domain;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_credential_name(&mut self, name: Option<String>) {
        self.credential_name = name;
    }

    pub(crate) fn set_config_path(&mut self, path: Option<PathBuf>) {
        self.config_path = path;
    }

    /// Build the final configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a malformed base URL or an
    /// out-of-range timeout.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = validate_and_normalize_base_url(
            self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL),
        )?;

        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        let timeout_secs = timeout.as_secs();
        if timeout_secs == 0 || timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidValue {
                var: "timeout".to_string(),
                message: format!(
                    "must be between 1 and {MAX_TIMEOUT_SECS} seconds (got {timeout_secs})"
                ),
            });
        }

        let allowed_domain = self
            .allowed_domain
            .map(|d| d.trim().trim_start_matches('.').to_ascii_lowercase())
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_ALLOWED_DOMAIN.to_string());

        Ok(Config {
            connection: ConnectionConfig {
                base_url,
                allowed_domain,
                timeout,
            },
            credential_name: self
                .credential_name
                .unwrap_or_else(|| DEFAULT_CREDENTIAL_NAME.to_string()),
            config_path: self.config_path,
        })
    }
}

impl Config {
    /// Credential resolver matching this configuration.
    ///
    /// When the credentials file was chosen explicitly it is consulted before
    /// `SUMO_CREDS`; otherwise the environment wins.
    pub fn credential_resolver(&self) -> ChainedCredentials {
        let name = self.credential_name.clone();
        let env = EnvCredentials::new();
        match &self.config_path {
            Some(path) => ChainedCredentials::new(vec![
                Box::new(FileCredentials::new(path.clone(), name)),
                Box::new(env),
            ]),
            None => ChainedCredentials::new(vec![
                Box::new(env),
                Box::new(FileCredentials::in_home_dir(name)),
            ]),
        }
    }
}

fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();

    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidValue {
        var: "base_url".into(),
        message: format!("must be an absolute http(s) URL (e.g. {DEFAULT_BASE_URL}): {e}"),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("scheme must be http or https, got: {scheme}"),
        });
    }

    if parsed.host_str().is_none() {
        return Err(ConfigError::InvalidValue {
            var: "base_url".into(),
            message: format!("host is required (e.g. {DEFAULT_BASE_URL})"),
        });
    }

    Ok(parsed.as_str().trim_end_matches('/').to_string())
}
