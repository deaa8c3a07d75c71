//! In-memory implementation of `DurableStorage`.
//!
//! `InMemoryStorage` keeps values in a `BTreeMap` behind an
//! `Arc<Mutex<_>>`. Clones share the same map, so a test can hand one clone to
//! a `SessionManager`, keep another, and build a second manager over the same
//! contents to simulate a restart.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex, MutexGuard},
};

use medichain_contracts::error::{PortalError, PortalResult};
use medichain_core::traits::DurableStorage;

/// A process-local key-value store.
///
/// Nothing outlives the process; use `FileStorage` for that.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStorage {
    values: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.values.lock().map(|v| v.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        self.values
            .lock()
            .map(|v| v.keys().cloned().collect())
            .unwrap_or_default()
    }

    fn lock(&self) -> PortalResult<MutexGuard<'_, BTreeMap<String, String>>> {
        self.values.lock().map_err(|e| PortalError::Storage {
            reason: format!("storage lock poisoned: {}", e),
        })
    }
}

impl DurableStorage for InMemoryStorage {
    fn get(&self, key: &str) -> PortalResult<Option<String>> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> PortalResult<()> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> PortalResult<()> {
        self.lock()?.remove(key);
        Ok(())
    }
}
