//! Configuration loader for environment variables and `.env` files.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration.
//! - Enforce `DOTENV_DISABLED` gate to prevent accidental dotenv loading in tests.
//!
//! Does NOT handle:
//! - Reading credentials (see `crate::credentials`).
//!
//! Invariants / Assumptions:
//! - Builder values win over environment variables, which win over defaults.

mod builder;
mod env;
mod error;

pub use builder::ConfigLoader;
pub use env::{
    ENV_ALLOWED_DOMAIN, ENV_BASE_URL, ENV_CONFIG_PATH, ENV_CREDENTIAL, ENV_CREDS, ENV_TIMEOUT,
    env_var_or_none,
};
pub use error::ConfigError;
