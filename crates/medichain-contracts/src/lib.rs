//! # medichain-contracts
//!
//! Shared types, forms, and error contracts for the MediChain portal.
//!
//! All crates in the workspace import from here. No session logic lives in
//! this crate, only data definitions, form validation, and error types.

pub mod clinical;
pub mod credential;
pub mod error;
pub mod form;
pub mod session;
