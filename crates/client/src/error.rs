//! Error types for the Sumo search client.

use sumo_config::ConfigError;
use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, SumoError>;

/// Errors that can occur during search client operations.
#[derive(Error, Debug)]
pub enum SumoError {
    /// Credential resolution failed.
    #[error("{0}")]
    NoCredsFound(String),

    /// The service answered with a 4xx status.
    #[error("{message}")]
    ClientError { status: u16, message: String },

    /// The service answered with a 5xx status.
    #[error("{message}")]
    ServerError { status: u16, message: String },

    /// A single logical request was redirected too many times.
    #[error("Too many redirects ({0} attempts)")]
    TooManyRedirects(usize),

    /// A redirect pointed outside the allowed domain.
    #[error("Redirect to disallowed host: {0}")]
    DisallowedRedirectHost(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A successful response did not have the expected shape.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// A request could not be built (bad header value, unparseable URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SumoError {
    /// Short name of the error kind, used by the CLI when printing failures.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoCredsFound(_) => "NoCredsFound",
            Self::ClientError { .. } => "ClientError",
            Self::ServerError { .. } => "ServerError",
            Self::TooManyRedirects(_) => "TooManyRedirects",
            Self::DisallowedRedirectHost(_) => "DisallowedRedirectHost",
            Self::Http(_) => "HttpError",
            Self::InvalidResponse(_) => "InvalidResponse",
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::InvalidUrl(_) => "InvalidUrl",
            Self::Config(_) => "ConfigError",
        }
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientError { .. })
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }

    /// Check if this error comes from the redirect policy.
    pub fn is_redirect_error(&self) -> bool {
        matches!(
            self,
            Self::TooManyRedirects(_) | Self::DisallowedRedirectHost(_)
        )
    }
}

impl From<ConfigError> for SumoError {
    fn from(error: ConfigError) -> Self {
        match error {
            ConfigError::NoCredsFound(message) => Self::NoCredsFound(message),
            other => Self::Config(other.to_string()),
        }
    }
}
