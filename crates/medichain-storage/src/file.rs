//! JSON-file implementation of `DurableStorage`.
//!
//! The whole store is one JSON object of string values:
//!
//! ```json
//! { "currentUser": "{\"userId\":1,...}", "userType": "doctor" }
//! ```
//!
//! Every write rewrites the file through a sibling temp file and a rename, so
//! a crash mid-write leaves either the old or the new contents.

use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use tracing::{debug, warn};

use medichain_contracts::error::{PortalError, PortalResult};
use medichain_core::traits::DurableStorage;

type StoreMap = BTreeMap<String, String>;

/// A key-value store persisted as a JSON file.
///
/// The in-process mutex serializes read-modify-write cycles. Two processes
/// sharing one file get last-writer-wins.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    io_lock: Mutex<()>,
}

impl FileStorage {
    /// Open (or lazily create) the store at `path`.
    ///
    /// Parent directories are created on first write, not here.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn guard(&self) -> PortalResult<MutexGuard<'_, ()>> {
        self.io_lock.lock().map_err(|e| PortalError::Storage {
            reason: format!("storage lock poisoned: {}", e),
        })
    }

    /// Read the current map. A missing file is an empty store.
    fn read_map(&self) -> PortalResult<StoreMap> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(StoreMap::new()),
            Err(e) => {
                return Err(PortalError::Storage {
                    reason: format!("failed to read '{}': {}", self.path.display(), e),
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(StoreMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| PortalError::Storage {
            reason: format!("'{}' is not a valid store: {}", self.path.display(), e),
        })
    }

    /// Read the map for a write. A corrupt file is replaced rather than
    /// blocking every future write.
    fn read_map_for_write(&self) -> PortalResult<StoreMap> {
        match self.read_map() {
            Ok(map) => Ok(map),
            Err(PortalError::Storage { reason }) if self.path.exists() => {
                warn!(path = %self.path.display(), reason = %reason, "discarding unreadable store");
                Ok(StoreMap::new())
            }
            Err(e) => Err(e),
        }
    }

    fn write_map(&self, map: &StoreMap) -> PortalResult<()> {
        let storage_err = |action: &str, e: io::Error| PortalError::Storage {
            reason: format!("failed to {} '{}': {}", action, self.path.display(), e),
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| storage_err("create parent of", e))?;
        }

        let json = serde_json::to_string_pretty(map).map_err(|e| PortalError::Storage {
            reason: format!("failed to serialize store: {}", e),
        })?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| storage_err("write", e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_err("replace", e))?;

        debug!(path = %self.path.display(), keys = map.len(), "store written");
        Ok(())
    }
}

impl DurableStorage for FileStorage {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        let _guard = self.guard()?;
        Ok(self.read_map()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        let _guard = self.guard()?;
        let mut map = self.read_map_for_write()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        let _guard = self.guard()?;
        let mut map = self.read_map_for_write()?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }
}
