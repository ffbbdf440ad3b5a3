//! Credential resolution.
//!
//! Responsibilities:
//! - Define the [`CredentialResolver`] seam consumed by the client crate.
//! - Read named credential entries from the YAML credentials file.
//! - Read an inline `identifier:secret` pair from `SUMO_CREDS`.
//!
//! Does NOT handle:
//! - Encoding credentials for HTTP (see the client crate's `auth` module).
//!
//! Invariants:
//! - Every "credentials unavailable" condition is reported as [`ConfigError::NoCredsFound`].
//! - Secrets are wrapped in `SecretString` as soon as they are read.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::Deserialize;

use crate::constants::DEFAULT_CREDS_FILE_NAME;
use crate::loader::{ConfigError, ENV_CREDS, env_var_or_none};
use crate::types::Credentials;

/// Something that can supply an authentication pair.
pub trait CredentialResolver: Send + Sync {
    /// Resolve credentials, failing with [`ConfigError::NoCredsFound`] when none are available.
    fn resolve(&self) -> Result<Credentials, ConfigError>;
}

/// One entry of the credentials file.
///
/// `email`/`password` are the legacy key names and are still honoured.
#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    access_id: Option<String>,
    access_key: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

/// Reads a named entry from a YAML file shaped like:
///
/// ```yaml
/// default:
///   access_id: suABCDEF
///   access_key: trustno1
/// ```
///
/// Without an explicit path the file is `~/.sumo_creds`, looked up only when
/// [`resolve`](CredentialResolver::resolve) runs.
#[derive(Debug, Clone)]
pub struct FileCredentials {
    path: Option<PathBuf>,
    name: String,
}

impl FileCredentials {
    pub fn new(path: PathBuf, name: String) -> Self {
        Self {
            path: Some(path),
            name,
        }
    }

    /// Read `~/.sumo_creds`.
    pub fn in_home_dir(name: String) -> Self {
        Self { path: None, name }
    }

    fn location(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }
        directories::BaseDirs::new()
            .map(|dirs| dirs.home_dir().join(DEFAULT_CREDS_FILE_NAME))
            .ok_or_else(|| {
                ConfigError::NoCredsFound(format!(
                    "Unable to determine the home directory holding {DEFAULT_CREDS_FILE_NAME}."
                ))
            })
    }

    fn bad_config_file(path: &Path, message: &str) -> ConfigError {
        let path = path.display();
        ConfigError::NoCredsFound(format!(
            "{message}

The credentials file (located at {path}) must be valid YAML. Below is an
example of a valid file:

backend:
  access_id: suBACKEND
  access_key: trustno1
frontend:
  access_id: suFRONTEND
  access_key: test-pass-1

By default the 'default' entry is used. Set $SUMO_CREDENTIAL to the name of
another entry to select it."
        ))
    }

    fn load_entries(path: &Path) -> Result<serde_yaml::Mapping, ConfigError> {
        if !path.exists() {
            return Err(Self::bad_config_file(
                path,
                &format!("{} does not exist.", path.display()),
            ));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            Self::bad_config_file(path, &format!("{} could not be read: {e}.", path.display()))
        })?;
        match serde_yaml::from_str::<serde_yaml::Value>(&content) {
            Ok(serde_yaml::Value::Mapping(entries)) => Ok(entries),
            _ => Err(Self::bad_config_file(
                path,
                &format!("{} is not valid YAML.", path.display()),
            )),
        }
    }
}

impl CredentialResolver for FileCredentials {
    fn resolve(&self) -> Result<Credentials, ConfigError> {
        let path = self.location()?;
        let entries = Self::load_entries(&path)?;
        let not_found = || {
            ConfigError::NoCredsFound(format!("{} not found in {}", self.name, path.display()))
        };

        let value = entries.get(self.name.as_str()).ok_or_else(not_found)?;
        let entry: RawEntry = serde_yaml::from_value(value.clone()).map_err(|_| not_found())?;

        match entry {
            RawEntry {
                access_id: Some(id),
                access_key: Some(key),
                ..
            } => Ok(Credentials::new(id, SecretString::new(key.into()))),
            RawEntry {
                email: Some(email),
                password: Some(password),
                ..
            } => {
                tracing::warn!(
                    entry = %self.name,
                    "email/password credential keys are deprecated, use access_id/access_key"
                );
                Ok(Credentials::new(email, SecretString::new(password.into())))
            }
            _ => Err(ConfigError::NoCredsFound(format!(
                "{} in {} must define access_id and access_key",
                self.name,
                path.display()
            ))),
        }
    }
}

/// Reads an inline `identifier:secret` pair from an environment variable.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    var: String,
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvCredentials {
    pub fn new() -> Self {
        Self {
            var: ENV_CREDS.to_string(),
        }
    }

    /// Read from a different variable name.
    pub fn with_var(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

/// Split `identifier:secret` at the first colon; both halves must be non-empty.
pub fn parse_credential_pair(raw: &str) -> Option<Credentials> {
    let (id, secret) = raw.split_once(':')?;
    if id.is_empty() || secret.is_empty() {
        return None;
    }
    Some(Credentials::new(id, SecretString::new(secret.into())))
}

impl CredentialResolver for EnvCredentials {
    fn resolve(&self) -> Result<Credentials, ConfigError> {
        let raw = env_var_or_none(&self.var).ok_or_else(|| {
            ConfigError::NoCredsFound(format!(
                "No credentials were found, set ${} to identifier:secret.",
                self.var
            ))
        })?;
        parse_credential_pair(&raw).ok_or_else(|| {
            ConfigError::NoCredsFound(format!(
                "${} must have the form identifier:secret",
                self.var
            ))
        })
    }
}

/// Tries each resolver in order and returns the first success.
pub struct ChainedCredentials {
    resolvers: Vec<Box<dyn CredentialResolver>>,
}

impl std::fmt::Debug for ChainedCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainedCredentials")
            .field("resolvers", &self.resolvers.len())
            .finish()
    }
}

impl ChainedCredentials {
    pub fn new(resolvers: Vec<Box<dyn CredentialResolver>>) -> Self {
        Self { resolvers }
    }
}

impl CredentialResolver for ChainedCredentials {
    /// Errors other than `NoCredsFound` stop the chain immediately; when every
    /// resolver reports missing credentials their messages are combined.
    fn resolve(&self) -> Result<Credentials, ConfigError> {
        let mut misses = Vec::new();
        for resolver in &self.resolvers {
            match resolver.resolve() {
                Ok(creds) => return Ok(creds),
                Err(ConfigError::NoCredsFound(message)) => misses.push(message),
                Err(e) => return Err(e),
            }
        }
        if misses.is_empty() {
            misses.push("No credential sources configured.".to_string());
        }
        Err(ConfigError::NoCredsFound(misses.join("\n\n")))
    }
}
