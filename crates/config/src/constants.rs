//! Centralized constants for the Sumo search workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

use std::time::Duration;

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sumologic.com";

/// Version segment inserted into every outbound request path (`/api/v1`).
pub const API_VERSION: u32 = 1;

/// Registered domain suffix that redirects are allowed to land on.
pub const DEFAULT_ALLOWED_DOMAIN: &str = "sumologic.com";

/// Default HTTP request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum allowed request timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum number of redirect hops followed for a single logical request.
///
/// The request that receives the tenth consecutive redirect fails, so at most
/// ten attempts are made in total.
pub const MAX_REDIRECT_DEPTH: usize = 9;

// =============================================================================
// Search & Polling Defaults
// =============================================================================

/// Interval between job status polls while waiting for more results.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Upper bound on rows requested in a single page.
pub const MAX_PAGE_SIZE: u64 = 1000;

// =============================================================================
// Credential Defaults
// =============================================================================

/// Name of the credentials file in the user's home directory.
pub const DEFAULT_CREDS_FILE_NAME: &str = ".sumo_creds";

/// Credential entry used when `SUMO_CREDENTIAL` is unset.
pub const DEFAULT_CREDENTIAL_NAME: &str = "default";

/// Message used when an error response carries no usable `message` field.
pub const DEFAULT_ERROR_MESSAGE: &str = "Error sending API request";
