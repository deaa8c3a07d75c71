//! Role and session identity types.
//!
//! A `Session` is the sanitized view of a credential record: it carries who
//! the user is and which role namespace they signed in under, and never the
//! password.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    credential::CredentialRecord,
    error::{PortalError, PortalResult},
};

/// One of the two fixed user categories.
///
/// The role partitions both the credential tables and which dashboard is
/// shown. Serialized in lowercase (`"doctor"`, `"patient"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Doctor,
    Patient,
}

impl Role {
    /// Both roles, in the order the login form offers them.
    pub const ALL: [Role; 2] = [Role::Doctor, Role::Patient];

    /// The lowercase tag used in durable storage and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Doctor => "doctor",
            Role::Patient => "patient",
        }
    }

    /// Title-cased label for headers ("Doctor Login", "Patient Dashboard").
    pub fn label(self) -> &'static str {
        match self {
            Role::Doctor => "Doctor",
            Role::Patient => "Patient",
        }
    }

    /// Route of the dashboard this role lands on after signing in.
    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Doctor => "/doctor-dashboard",
            Role::Patient => "/patient-dashboard",
        }
    }

    /// The other role. Used by the login form's toggle.
    pub fn toggled(self) -> Role {
        match self {
            Role::Doctor => Role::Patient,
            Role::Patient => Role::Doctor,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "doctor" => Ok(Role::Doctor),
            "patient" => Ok(Role::Patient),
            _ => Err(PortalError::UnknownRole {
                value: s.to_string(),
            }),
        }
    }
}

/// Identifier of one successful login.
///
/// Every call to `SessionManager::login()` that succeeds mints a fresh one, so
/// two sessions for the same user are distinguishable in logs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The currently authenticated user.
///
/// Exists only while a user is signed in. The serialized form is what lands
/// under the `currentUser` storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Fixture id of the user. Unique within a role, not across roles.
    pub user_id: u32,
    pub display_name: String,
    pub email: String,
    /// Always the role namespace the credential record was found in.
    pub role: Role,
    pub session_id: SessionId,
    pub authenticated_at: DateTime<Utc>,
}

impl Session {
    /// Build a session from a matched credential record.
    ///
    /// The password is not copied.
    pub fn from_credential(record: &CredentialRecord) -> Self {
        Self {
            user_id: record.id,
            display_name: record.display_name.clone(),
            email: record.email.clone(),
            role: record.role,
            session_id: SessionId::new(),
            authenticated_at: Utc::now(),
        }
    }

    /// True when `other` describes the same user signed in under the same
    /// role, regardless of when or under which session id.
    pub fn same_identity(&self, other: &Session) -> bool {
        self.user_id == other.user_id && self.role == other.role && self.email == other.email
    }
}
