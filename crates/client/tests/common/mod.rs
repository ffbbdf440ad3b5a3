//! Common test utilities for integration tests.
//!
//! # Invariants
//! - Fixtures are loaded from the `fixtures/` directory relative to the crate root
//! - Test clients treat `127.0.0.1` as the allowed redirect domain, so every
//!   wiremock server is a valid redirect target and `localhost` is not
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

use std::time::Duration;

use secrecy::SecretString;

#[allow(unused_imports)]
pub use sumo_client::testing::{load_fixture, page_envelope, sample_rows};
#[allow(unused_imports)]
pub use sumo_client::{SearchRequest, SumoClient, SumoError, endpoints};
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

/// `Basic base64("creds@email.com:test")`
#[allow(dead_code)]
pub const EXPECTED_AUTH: &str = "Basic Y3JlZHNAZW1haWwuY29tOnRlc3Q=";

/// Poll interval used by HTTP tests so waiting jobs finish quickly.
#[allow(dead_code)]
pub const TEST_POLL_INTERVAL: Duration = Duration::from_millis(10);

#[allow(dead_code)]
pub fn credentials() -> sumo_config::Credentials {
    sumo_config::Credentials::new(
        "creds@email.com",
        SecretString::new("test".to_string().into()),
    )
}

/// A client pointed at `base_url` that accepts redirects to any `127.0.0.1` port.
#[allow(dead_code)]
pub fn test_client(base_url: &str) -> SumoClient {
    SumoClient::builder()
        .base_url(base_url)
        .credentials(credentials())
        .allowed_domain("127.0.0.1")
        .poll_interval(TEST_POLL_INTERVAL)
        .build()
        .expect("test client")
}

/// Header value of the `n`th request the server received.
#[allow(dead_code)]
pub async fn received_header(server: &MockServer, n: usize, name: &str) -> Option<String> {
    let requests = server.received_requests().await.expect("request recording");
    requests
        .get(n)
        .and_then(|r| r.headers.get(name))
        .map(|v| v.to_str().expect("ascii header").to_string())
}

/// Port of a wiremock server, for building `localhost` URLs to it.
#[allow(dead_code)]
pub fn port_of(server: &MockServer) -> u16 {
    server.address().port()
}
