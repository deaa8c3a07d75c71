//! Demo credential records.
//!
//! Credentials are fixtures: plaintext, immutable, and loaded once. They are
//! never serialized into durable storage.

use crate::session::Role;

/// One entry in a role's credential table.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub id: u32,
    pub email: String,
    /// Plaintext. Demo only.
    pub password: String,
    pub display_name: String,
    pub role: Role,
}

impl CredentialRecord {
    pub fn new(
        id: u32,
        email: impl Into<String>,
        password: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            password: password.into(),
            display_name: display_name.into(),
            role,
        }
    }

    /// Exact, case-sensitive match on both email and password.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
}

// Hand-written so the password never shows up in logs or panic messages.
impl std::fmt::Debug for CredentialRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialRecord")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("display_name", &self.display_name)
            .field("role", &self.role)
            .finish()
    }
}
