//! # medichain-storage
//!
//! Durable key-value stores for the MediChain session layer.
//!
//! ## Overview
//!
//! The session manager mirrors the current session into a `DurableStorage`.
//! Two implementations are provided:
//!
//! - [`InMemoryStorage`]: shared map, gone when the process exits. Used by
//!   tests and the scripted demo.
//! - [`FileStorage`]: one JSON object on disk. Used by the CLI and TUI so a
//!   session survives a restart.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use medichain_storage::FileStorage;
//!
//! let storage = Arc::new(FileStorage::new(".medichain/storage.json"));
//! let manager = SessionManager::new(storage, directory, delay);
//! ```

pub mod file;
pub mod memory;

pub use file::FileStorage;
pub use memory::InMemoryStorage;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::{fs, sync::Arc, time::Duration};

    use medichain_contracts::{credential::CredentialRecord, error::PortalError, session::Role};
    use medichain_core::{
        keys,
        traits::{CredentialDirectory, DurableStorage},
        SessionManager,
    };

    use super::{FileStorage, InMemoryStorage};

    // ── Helpers ───────────────────────────────────────────────────────────────

    struct OneDoctor(Vec<CredentialRecord>);

    impl OneDoctor {
        fn new() -> Self {
            Self(vec![CredentialRecord::new(
                1,
                "doctor@example.com",
                "password123",
                "Dr. John Smith",
                Role::Doctor,
            )])
        }
    }

    impl CredentialDirectory for OneDoctor {
        fn credentials(&self, role: Role) -> &[CredentialRecord] {
            match role {
                Role::Doctor => &self.0,
                Role::Patient => &[],
            }
        }
    }

    // ── InMemoryStorage ───────────────────────────────────────────────────────

    #[test]
    fn test_memory_set_get_remove() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get("userType").unwrap(), None);

        storage.set("userType", "doctor").unwrap();
        assert_eq!(storage.get("userType").unwrap().as_deref(), Some("doctor"));

        storage.remove("userType").unwrap();
        storage.remove("userType").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_memory_clones_share_contents() {
        let a = InMemoryStorage::new();
        let b = a.clone();

        a.set("darkMode", "true").unwrap();

        assert_eq!(b.get("darkMode").unwrap().as_deref(), Some("true"));
        assert_eq!(b.keys(), vec!["darkMode".to_string()]);
    }

    // ── FileStorage ───────────────────────────────────────────────────────────

    #[test]
    fn test_file_missing_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("absent.json"));

        assert_eq!(storage.get(keys::CURRENT_USER).unwrap(), None);
        storage.remove(keys::CURRENT_USER).unwrap();
        assert!(!storage.path().exists(), "removing from an empty store must not create the file");
    }

    #[test]
    fn test_file_values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        FileStorage::new(&path).set(keys::USER_TYPE, "patient").unwrap();
        let reopened = FileStorage::new(&path);

        assert_eq!(reopened.get(keys::USER_TYPE).unwrap().as_deref(), Some("patient"));
    }

    #[test]
    fn test_file_remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        storage.set(keys::USER_TYPE, "doctor").unwrap();
        storage.set(keys::PREFERENCES, "{\"darkMode\":true}").unwrap();

        storage.remove(keys::USER_TYPE).unwrap();

        assert_eq!(storage.get(keys::USER_TYPE).unwrap(), None);
        assert!(storage.get(keys::PREFERENCES).unwrap().is_some());
    }

    #[test]
    fn test_file_corrupt_store_errors_on_read_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3").unwrap();
        let storage = FileStorage::new(&path);

        assert!(matches!(storage.get(keys::USER_TYPE), Err(PortalError::Storage { .. })));

        storage.set(keys::USER_TYPE, "doctor").unwrap();
        assert_eq!(storage.get(keys::USER_TYPE).unwrap().as_deref(), Some("doctor"));
    }

    // ── Session restore across restarts ───────────────────────────────────────

    #[tokio::test]
    async fn test_session_survives_restart_on_file_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let first = SessionManager::new(
            Arc::new(FileStorage::new(&path)),
            Arc::new(OneDoctor::new()),
            Duration::ZERO,
        );
        let session = first.login("doctor@example.com", "password123", Role::Doctor).await.unwrap();

        let second = SessionManager::new(
            Arc::new(FileStorage::new(&path)),
            Arc::new(OneDoctor::new()),
            Duration::ZERO,
        );
        let restored = second.current_session().expect("session must be restored from disk");
        assert_eq!(restored.user_id, session.user_id);
        assert_eq!(restored.role, Role::Doctor);

        second.logout();
        let third = SessionManager::new(
            Arc::new(FileStorage::new(&path)),
            Arc::new(OneDoctor::new()),
            Duration::ZERO,
        );
        assert!(third.current_session().is_none());
    }

    #[test]
    fn test_corrupt_file_means_anonymous() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "not json at all").unwrap();

        let manager = SessionManager::new(
            Arc::new(FileStorage::new(&path)),
            Arc::new(OneDoctor::new()),
            Duration::ZERO,
        );
        assert!(manager.current_session().is_none());
    }
}
