//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map SumoError variants to appropriate exit codes.
//! - Render the one-line `<Kind>: <message>` error report.
//!
//! Invariants:
//! - Every failure exits non-zero.

use sumo_client::SumoError;

/// Structured exit codes for `sumo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - search completed and every row was printed.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// No usable credentials were found.
    ///
    /// Scripts should check `~/.sumo_creds` or `SUMO_CREDS`.
    CredentialsMissing = 2,

    /// Connection error - network, timeout, or DNS failure.
    ConnectionError = 3,

    /// The service rejected the request (HTTP 4xx).
    ///
    /// Scripts should fix the query and not retry the same request.
    ClientError = 4,

    /// The service failed (HTTP 5xx).
    ServerError = 5,

    /// A redirect was refused or looped.
    RedirectError = 6,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&SumoError> for ExitCode {
    fn from(err: &SumoError) -> Self {
        match err {
            SumoError::NoCredsFound(_) => ExitCode::CredentialsMissing,
            SumoError::ClientError { .. } => ExitCode::ClientError,
            SumoError::ServerError { .. } => ExitCode::ServerError,
            SumoError::TooManyRedirects(_) | SumoError::DisallowedRedirectHost(_) => {
                ExitCode::RedirectError
            }
            SumoError::InvalidUrl(_) => ExitCode::ConnectionError,
            SumoError::Http(e) => {
                if e.is_connect() || e.is_timeout() {
                    ExitCode::ConnectionError
                } else {
                    ExitCode::GeneralError
                }
            }
            SumoError::InvalidResponse(_) | SumoError::InvalidRequest(_) | SumoError::Config(_) => {
                ExitCode::GeneralError
            }
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no SumoError is in the chain.
    fn exit_code(&self) -> ExitCode;

    /// `<Kind>: <message>` for library errors, `Error: <chain>` otherwise.
    fn report(&self) -> String;
}

fn find_sumo_error(err: &anyhow::Error) -> Option<&SumoError> {
    err.chain().find_map(|cause| cause.downcast_ref::<SumoError>())
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        find_sumo_error(self)
            .map(ExitCode::from)
            .unwrap_or(ExitCode::GeneralError)
    }

    fn report(&self) -> String {
        match find_sumo_error(self) {
            Some(err) => format!("{}: {}", err.kind(), err),
            None => format!("Error: {self:#}"),
        }
    }
}
