//! HTTP Basic authentication for the search API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::{ExposeSecret, SecretString};
use sumo_config::Credentials;

/// Precomputed `Authorization` header value for a credential pair.
///
/// The encoded value is computed once per client and kept secret so it never
/// shows up in `Debug` output or logs.
#[derive(Debug, Clone)]
pub struct BasicAuth {
    access_id: String,
    header: SecretString,
}

impl BasicAuth {
    pub fn new(credentials: &Credentials) -> Self {
        let pair = format!(
            "{}:{}",
            credentials.access_id(),
            credentials.access_key().expose_secret()
        );
        let header = format!("Basic {}", STANDARD.encode(pair));
        Self {
            access_id: credentials.access_id().to_string(),
            header: SecretString::new(header.into()),
        }
    }

    /// Identifier half of the credential pair.
    pub fn access_id(&self) -> &str {
        &self.access_id
    }

    /// `Basic <base64(identifier:secret)>`, with no embedded whitespace.
    pub fn header_value(&self) -> &str {
        self.header.expose_secret()
    }
}
