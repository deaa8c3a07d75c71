//! Collaborator traits for the session layer.
//!
//! - `DurableStorage`: key-value cache that survives restarts
//! - `CredentialDirectory`: read-only, role-partitioned credential tables
//!
//! `SessionManager` only ever talks to these traits, so tests substitute
//! in-memory fakes for both.

use medichain_contracts::{credential::CredentialRecord, error::PortalResult, session::Role};

/// A string key-value store that outlives the process.
///
/// The session manager treats it as a cache: it is read once at construction
/// and written on every session change. Implementations need no transactional
/// guarantees; every value is a single record and the last writer wins.
pub trait DurableStorage: Send + Sync {
    /// Return the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> PortalResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> PortalResult<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> PortalResult<()>;
}

/// The source of demo credentials.
///
/// Tables are disjoint by role and immutable for the lifetime of the
/// directory.
pub trait CredentialDirectory: Send + Sync {
    /// All credential records registered under `role`.
    fn credentials(&self, role: Role) -> &[CredentialRecord];
}
