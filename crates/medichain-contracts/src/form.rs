//! Form inputs and their local validation.
//!
//! Validation runs before any authentication attempt. It only checks that
//! required fields are present; it is not real data validation.

use serde::{Deserialize, Serialize};

use crate::{
    error::{PortalError, PortalResult},
    session::Role,
};

/// The sign-in form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: Role,
    #[serde(default)]
    pub remember_me: bool,
}

impl LoginForm {
    /// An empty form with `role` preselected.
    pub fn new(role: Role) -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            role,
            remember_me: false,
        }
    }

    /// Check required fields in display order.
    ///
    /// The email is trimmed before the emptiness check; the password is not,
    /// so a password of spaces is accepted here and rejected by the lookup.
    pub fn validate(&self) -> PortalResult<()> {
        if self.email.trim().is_empty() {
            return Err(PortalError::validation("email", "Email is required"));
        }
        if self.password.is_empty() {
            return Err(PortalError::validation("password", "Password is required"));
        }
        Ok(())
    }
}

/// The account registration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl RegistrationForm {
    pub fn validate(&self) -> PortalResult<()> {
        if self.name.trim().is_empty() {
            return Err(PortalError::validation("name", "Name is required"));
        }
        if self.email.trim().is_empty() {
            return Err(PortalError::validation("email", "Email is required"));
        }
        if self.password.is_empty() {
            return Err(PortalError::validation("password", "Password is required"));
        }
        if self.password != self.confirm_password {
            return Err(PortalError::validation(
                "confirm_password",
                "Passwords do not match",
            ));
        }
        Ok(())
    }
}
