//! Integration tests for configuration loading.
//!
//! These tests verify the ConfigLoader precedence chain and the credential
//! resolver that a built `Config` hands to the client.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::ExposeSecret;
use serial_test::serial;
use sumo_config::{ConfigError, ConfigLoader, CredentialResolver};
use tempfile::NamedTempFile;

fn creds_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

/// Builder values win over environment variables.
#[test]
#[serial]
fn test_builder_overrides_env() {
    temp_env::with_vars(
        [
            ("SUMO_BASE_URL", Some("https://api.eu.sumologic.com")),
            ("SUMO_TIMEOUT", Some("90")),
        ],
        || {
            let config = ConfigLoader::new()
                .with_base_url("https://api.us2.sumologic.com".to_string())
                .with_config_path(PathBuf::from("/tmp/creds"))
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "https://api.us2.sumologic.com");
            assert_eq!(config.connection.timeout, Duration::from_secs(90));
        },
    );
}

#[test]
#[serial]
fn test_env_applies_credential_name_and_path() {
    temp_env::with_vars(
        [
            ("SUMO_CREDENTIAL", Some("frontend")),
            ("SUMO_CONFIG_PATH", Some("/etc/sumo-creds")),
            ("SUMO_ALLOWED_DOMAIN", Some("example.com")),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            assert_eq!(config.credential_name, "frontend");
            assert_eq!(config.config_path, Some(PathBuf::from("/etc/sumo-creds")));
            assert_eq!(config.connection.allowed_domain, "example.com");
        },
    );
}

#[test]
#[serial]
fn test_whitespace_env_treated_as_unset() {
    temp_env::with_vars(
        [("SUMO_BASE_URL", Some("   ")), ("SUMO_CREDENTIAL", Some(""))],
        || {
            let config = ConfigLoader::new()
                .with_config_path(PathBuf::from("/tmp/creds"))
                .from_env()
                .unwrap()
                .build()
                .unwrap();

            assert_eq!(config.connection.base_url, "https://api.sumologic.com");
            assert_eq!(config.credential_name, "default");
        },
    );
}

#[test]
#[serial]
fn test_invalid_timeout_env() {
    temp_env::with_var("SUMO_TIMEOUT", Some("soon"), || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref var, .. } if var == "SUMO_TIMEOUT"));
    });
}

/// An explicitly chosen credentials file is preferred over `SUMO_CREDS`.
#[test]
#[serial]
fn test_specified_file_wins_over_env() {
    let file = creds_file("default:\n  access_id: suFILE\n  access_key: from-file\n");

    temp_env::with_var("SUMO_CREDS", Some("suENV:from-env"), || {
        let config = ConfigLoader::new()
            .with_config_path(file.path().to_path_buf())
            .build()
            .unwrap();

        let creds = config.credential_resolver().resolve().unwrap();
        assert_eq!(creds.access_id(), "suFILE");
        assert_eq!(creds.access_key().expose_secret(), "from-file");
    });
}

/// Without an explicit file, `SUMO_CREDS` is preferred.
#[test]
#[serial]
fn test_env_wins_over_default_file() {
    temp_env::with_vars(
        [
            ("SUMO_CREDS", Some("suENV:from-env")),
            ("SUMO_CONFIG_PATH", None),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();

            let creds = config.credential_resolver().resolve().unwrap();
            assert_eq!(creds.access_id(), "suENV");
        },
    );
}

/// The home directory is only needed once the default file is consulted.
#[test]
#[serial]
fn test_env_credentials_without_home_dir() {
    temp_env::with_vars(
        [
            ("SUMO_CREDS", Some("suENV:from-env")),
            ("SUMO_CONFIG_PATH", None),
            ("HOME", None),
        ],
        || {
            let config = ConfigLoader::new().from_env().unwrap().build().unwrap();
            assert_eq!(config.config_path, None);

            let creds = config.credential_resolver().resolve().unwrap();
            assert_eq!(creds.access_id(), "suENV");
        },
    );
}

#[test]
#[serial]
fn test_no_credentials_anywhere() {
    temp_env::with_var("SUMO_CREDS", None::<&str>, || {
        let config = ConfigLoader::new()
            .with_config_path(PathBuf::from("/definitely/not/here/.sumo_creds"))
            .build()
            .unwrap();

        let err = config.credential_resolver().resolve().unwrap_err();
        assert!(err.is_no_creds());
    });
}
