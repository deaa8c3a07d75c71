//! # medichain-core
//!
//! The session layer of the MediChain portal.
//!
//! This crate provides:
//! - The two collaborator traits (`DurableStorage`, `CredentialDirectory`)
//! - The `SessionManager` that authenticates against the directory and
//!   mirrors the resulting session into durable storage
//! - `Preferences`, the display and notification settings kept next to the
//!   session in the same store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::{sync::Arc, time::Duration};
//! use medichain_core::SessionManager;
//!
//! let manager = SessionManager::new(storage, directory, Duration::from_millis(1000));
//! let session = manager.login("doctor@example.com", "password123", Role::Doctor).await?;
//! ```

pub mod keys;
pub mod manager;
pub mod preferences;
pub mod traits;

pub use manager::{SessionManager, DEFAULT_LOGIN_DELAY};
pub use preferences::Preferences;
