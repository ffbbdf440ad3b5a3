//! Configuration management for the Sumo search client.
//!
//! This crate provides the connection configuration and the credential
//! resolvers consumed by `sumo-client` and the `sumo` CLI.

pub mod constants;
pub mod credentials;
mod loader;
pub mod types;

pub use credentials::{
    ChainedCredentials, CredentialResolver, EnvCredentials, FileCredentials, parse_credential_pair,
};
pub use loader::{
    ConfigError, ConfigLoader, ENV_ALLOWED_DOMAIN, ENV_BASE_URL, ENV_CONFIG_PATH, ENV_CREDENTIAL,
    ENV_CREDS, ENV_TIMEOUT, env_var_or_none,
};
pub use types::{Config, ConnectionConfig, Credentials};
