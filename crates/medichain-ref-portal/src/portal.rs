//! Wiring from configuration to a ready-to-use session manager.

use std::sync::Arc;

use tracing::{info, warn};

use medichain_config::{PortalConfig, StorageBackend};
use medichain_contracts::{
    error::{PortalError, PortalResult},
    session::{Role, Session},
};
use medichain_core::{traits::DurableStorage, Preferences, SessionManager};
use medichain_storage::{FileStorage, InMemoryStorage};

use crate::{mock_data::StaticDirectory, panels::dashboard};

/// A configured portal: the shared session manager plus the store it
/// mirrors into, kept so preferences can live alongside the session.
pub struct Portal {
    manager: Arc<SessionManager>,
    storage: Arc<dyn DurableStorage>,
    dark_mode_default: bool,
}

impl Portal {
    /// Build the storage backend named in `config` and restore any cached
    /// session from it.
    pub fn from_config(config: &PortalConfig) -> Self {
        let storage: Arc<dyn DurableStorage> = match config.storage.backend {
            StorageBackend::File => {
                info!(path = %config.storage.path.display(), "using file storage");
                Arc::new(FileStorage::new(config.storage.path.clone()))
            }
            StorageBackend::Memory => {
                info!("using in-memory storage");
                Arc::new(InMemoryStorage::new())
            }
        };
        Self::with_storage(storage, config)
    }

    /// Build a portal over an existing store.
    pub fn with_storage(storage: Arc<dyn DurableStorage>, config: &PortalConfig) -> Self {
        let manager = SessionManager::new(
            Arc::clone(&storage),
            Arc::new(StaticDirectory::demo()),
            config.session.login_delay(),
        );
        Self {
            manager: Arc::new(manager),
            storage,
            dark_mode_default: config.display.dark_mode_default,
        }
    }

    pub fn manager(&self) -> &Arc<SessionManager> {
        &self.manager
    }

    pub fn preferences(&self) -> Preferences {
        Preferences::load(self.storage.as_ref(), self.dark_mode_default)
    }

    pub fn save_preferences(&self, prefs: &Preferences) -> PortalResult<()> {
        prefs.save(self.storage.as_ref())
    }

    /// Resolve the session allowed to open `panel` on `role`'s dashboard.
    ///
    /// Fails with `AccessDenied` when nobody is signed in or the session
    /// belongs to the other role, and with `PanelUnavailable` when the panel
    /// is not part of that role's navigation.
    pub fn open_panel(&self, role: Role, panel: dashboard::Panel) -> PortalResult<Session> {
        let session = self.manager.authorize(role)?;
        if !dashboard::panel_allowed(role, panel) {
            warn!(role = %role, panel = %panel, "panel not available for role");
            return Err(PortalError::PanelUnavailable {
                panel: panel.to_string(),
                role,
            });
        }
        Ok(session)
    }
}
