//! Display and notification preferences kept in durable storage.
//!
//! Preferences are not tied to a session: they survive logout, like the theme
//! toggle on the login screen does.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use medichain_contracts::error::{PortalError, PortalResult};

use crate::{keys, traits::DurableStorage};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
    /// Settings checkboxes the user has changed, keyed by option id
    /// (e.g. `"email-news"`). Options not present use their default.
    #[serde(default)]
    pub toggles: BTreeMap<String, bool>,
}

impl Preferences {
    pub fn new(dark_mode: bool) -> Self {
        Self {
            dark_mode,
            toggles: BTreeMap::new(),
        }
    }

    /// Load preferences from `storage`, falling back to defaults when the key
    /// is absent or unreadable.
    pub fn load(storage: &dyn DurableStorage, dark_mode_default: bool) -> Self {
        match storage.get(keys::PREFERENCES) {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(prefs) => prefs,
                Err(e) => {
                    warn!(error = %e, "stored preferences are corrupt, using defaults");
                    Self::new(dark_mode_default)
                }
            },
            Ok(None) => Self::new(dark_mode_default),
            Err(e) => {
                warn!(error = %e, "preferences could not be read, using defaults");
                Self::new(dark_mode_default)
            }
        }
    }

    pub fn save(&self, storage: &dyn DurableStorage) -> PortalResult<()> {
        let json = serde_json::to_string(self).map_err(|e| PortalError::Storage {
            reason: format!("failed to serialize preferences: {}", e),
        })?;
        storage.set(keys::PREFERENCES, &json)?;
        debug!(dark_mode = self.dark_mode, toggles = self.toggles.len(), "preferences saved");
        Ok(())
    }

    pub fn toggle_dark_mode(&mut self) {
        self.dark_mode = !self.dark_mode;
    }

    /// Current state of option `id`, or `default` if the user never changed it.
    pub fn toggle(&self, id: &str, default: bool) -> bool {
        self.toggles.get(id).copied().unwrap_or(default)
    }

    pub fn set_toggle(&mut self, id: impl Into<String>, enabled: bool) {
        self.toggles.insert(id.into(), enabled);
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use medichain_contracts::error::PortalResult;

    use crate::{keys, traits::DurableStorage};

    use super::Preferences;

    #[derive(Default)]
    struct MapStorage(Mutex<HashMap<String, String>>);

    impl DurableStorage for MapStorage {
        fn get(&self, key: &str) -> PortalResult<Option<String>> {
            Ok(self.0.lock().unwrap().get(key).cloned())
        }
        fn set(&self, key: &str, value: &str) -> PortalResult<()> {
            self.0.lock().unwrap().insert(key.to_string(), value.to_string());
            Ok(())
        }
        fn remove(&self, key: &str) -> PortalResult<()> {
            self.0.lock().unwrap().remove(key);
            Ok(())
        }
    }

    #[test]
    fn missing_preferences_use_config_default() {
        let storage = MapStorage::default();
        assert!(Preferences::load(&storage, true).dark_mode);
        assert!(!Preferences::load(&storage, false).dark_mode);
    }

    #[test]
    fn saved_preferences_load_back() {
        let storage = MapStorage::default();
        let mut prefs = Preferences::new(true);
        prefs.toggle_dark_mode();
        prefs.set_toggle("email-news", true);
        prefs.save(&storage).unwrap();

        let loaded = Preferences::load(&storage, true);
        assert_eq!(loaded, prefs);
        assert!(!loaded.dark_mode);
        assert!(loaded.toggle("email-news", false));
        assert!(loaded.toggle("push-records", true), "untouched option keeps its default");
    }

    #[test]
    fn corrupt_preferences_fall_back_to_defaults() {
        let storage = MapStorage::default();
        storage.set(keys::PREFERENCES, "dark").unwrap();
        assert_eq!(Preferences::load(&storage, false), Preferences::new(false));
    }
}
