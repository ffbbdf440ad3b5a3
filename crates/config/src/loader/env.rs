//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse `SUMO_*` environment variables.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Does NOT handle:
//! - Reading the credentials file (see `credentials.rs`).
//! - .env file loading (handled by ConfigLoader::load_dotenv).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Values already set through builder methods are not overwritten.

use std::path::PathBuf;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

pub const ENV_BASE_URL: &str = "SUMO_BASE_URL";
pub const ENV_CONFIG_PATH: &str = "SUMO_CONFIG_PATH";
pub const ENV_CREDENTIAL: &str = "SUMO_CREDENTIAL";
pub const ENV_CREDS: &str = "SUMO_CREDS";
pub const ENV_TIMEOUT: &str = "SUMO_TIMEOUT";
pub const ENV_ALLOWED_DOMAIN: &str = "SUMO_ALLOWED_DOMAIN";

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Apply environment variable configuration to the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if loader.base_url().is_none()
        && let Some(url) = env_var_or_none(ENV_BASE_URL)
    {
        loader.set_base_url(Some(url));
    }
    if loader.config_path().is_none()
        && let Some(path) = env_var_or_none(ENV_CONFIG_PATH)
    {
        loader.set_config_path(Some(PathBuf::from(path)));
    }
    if loader.credential_name().is_none()
        && let Some(name) = env_var_or_none(ENV_CREDENTIAL)
    {
        loader.set_credential_name(Some(name));
    }
    if loader.allowed_domain().is_none()
        && let Some(domain) = env_var_or_none(ENV_ALLOWED_DOMAIN)
    {
        loader.set_allowed_domain(Some(domain));
    }
    if loader.timeout().is_none()
        && let Some(timeout) = env_var_or_none(ENV_TIMEOUT)
    {
        let secs: u64 = timeout.parse().map_err(|_| ConfigError::InvalidValue {
            var: ENV_TIMEOUT.to_string(),
            message: "must be a number".to_string(),
        })?;
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    Ok(())
}
