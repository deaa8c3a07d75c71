//! # medichain-config
//!
//! TOML configuration for the MediChain portal.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use medichain_config::PortalConfig;
//!
//! let config = PortalConfig::from_file(Path::new("portal.toml"))?;
//! let delay = config.session.login_delay();
//! ```
//!
//! ## Sections
//!
//! `[session]` sets the artificial login delay, `[storage]` picks the durable
//! store backing the session, and `[display]` holds presentation defaults.

pub mod config;

pub use config::{DisplaySection, PortalConfig, SessionSection, StorageBackend, StorageSection};

/// The annotated sample configuration shipped with the crate.
pub const SAMPLE_CONFIG: &str = include_str!("../portal.toml");

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{path::PathBuf, time::Duration};

    use medichain_contracts::error::PortalError;

    use crate::{PortalConfig, StorageBackend, SAMPLE_CONFIG};

    #[test]
    fn test_empty_document_is_default() {
        let config = PortalConfig::from_toml_str("").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.session.login_delay(), Duration::from_millis(1000));
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.display.dark_mode_default);
    }

    #[test]
    fn test_sample_config_matches_defaults() {
        let config = PortalConfig::from_toml_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config, PortalConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let toml = r#"
            [session]
            login_delay_ms = 0

            [storage]
            backend = "memory"
        "#;

        let config = PortalConfig::from_toml_str(toml).unwrap();

        assert!(config.session.login_delay().is_zero());
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.storage.path, PathBuf::from(".medichain/storage.json"));
    }

    #[test]
    fn test_unknown_backend_is_config_error() {
        let toml = r#"
            [storage]
            backend = "indexeddb"
        "#;

        match PortalConfig::from_toml_str(toml) {
            Err(PortalError::ConfigError { reason }) => {
                assert!(reason.contains("failed to parse portal TOML"), "unexpected reason: {reason}");
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let toml = r#"
            [session]
            login_delay = 5
        "#;
        assert!(PortalConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = PortalConfig::from_file(std::path::Path::new("/nonexistent/portal.toml"));
        assert!(matches!(result, Err(PortalError::ConfigError { .. })));
    }

    #[test]
    fn test_load_without_path_uses_defaults() {
        assert_eq!(PortalConfig::load(None).unwrap(), PortalConfig::default());
    }
}
