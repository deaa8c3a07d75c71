//! Portal configuration schema and loader.
//!
//! A `PortalConfig` is deserialized from TOML. Every section is optional and
//! every field has a default, so an empty document is a valid configuration.

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use medichain_contracts::error::{PortalError, PortalResult};

/// Which `DurableStorage` implementation backs the session.
///
/// Example in TOML:
/// ```toml
/// backend = "file"
/// backend = "memory"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StorageBackend {
    File,
    Memory,
}

/// `[session]`: login behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionSection {
    /// Artificial delay before a login attempt resolves, in milliseconds.
    pub login_delay_ms: u64,
}

impl SessionSection {
    pub fn login_delay(&self) -> Duration {
        Duration::from_millis(self.login_delay_ms)
    }
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            login_delay_ms: 1000,
        }
    }
}

/// `[storage]`: where the session cache lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageSection {
    pub backend: StorageBackend,
    /// Store file for the `file` backend. Relative paths resolve against the
    /// working directory.
    pub path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from(".medichain/storage.json"),
        }
    }
}

/// `[display]`: presentation defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplaySection {
    /// Theme used until the user toggles it.
    pub dark_mode_default: bool,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            dark_mode_default: true,
        }
    }
}

/// The top-level structure deserialized from a TOML configuration file.
///
/// Example:
/// ```toml
/// [session]
/// login_delay_ms = 250
///
/// [storage]
/// backend = "memory"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    pub session: SessionSection,
    pub storage: StorageSection,
    pub display: DisplaySection,
}

impl PortalConfig {
    /// Parse `s` as TOML.
    ///
    /// Returns `PortalError::ConfigError` if the TOML is malformed or contains
    /// keys the schema does not know.
    pub fn from_toml_str(s: &str) -> PortalResult<Self> {
        let config: PortalConfig = toml::from_str(s).map_err(|e| PortalError::ConfigError {
            reason: format!("failed to parse portal TOML: {}", e),
        })?;
        debug!(
            login_delay_ms = config.session.login_delay_ms,
            backend = ?config.storage.backend,
            "portal configuration parsed"
        );
        Ok(config)
    }

    /// Read the file at `path` and parse it.
    pub fn from_file(path: &Path) -> PortalResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| PortalError::ConfigError {
            reason: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Load from `path` if given, otherwise use the defaults.
    pub fn load(path: Option<&Path>) -> PortalResult<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
