//! Error types for the MediChain portal.
//!
//! All fallible portal operations return `PortalResult<T>`. Every variant is
//! recoverable: the worst outcome of any failure is remaining signed out.

use thiserror::Error;

use crate::session::Role;

/// The message shown for any failure that is not a validation or credential
/// problem.
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred. Please try again.";

/// The unified error type for the MediChain portal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortalError {
    /// A required form field is missing or inconsistent. Raised before any
    /// authentication attempt is made.
    #[error("{message}")]
    Validation { field: String, message: String },

    /// No credential record in the requested role matched the email and
    /// password pair.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Another login attempt is still waiting on the simulated delay.
    #[error("a login attempt is already in progress")]
    LoginInProgress,

    /// A role-gated view was requested without a session of that role.
    #[error("the {required} dashboard requires a signed-in {required}")]
    AccessDenied { required: Role },

    /// The signed-in role's dashboard has no such panel.
    #[error("{panel} is not available for {role}")]
    PanelUnavailable { panel: String, role: Role },

    /// A role tag did not name one of the known roles.
    #[error("unknown role '{value}'")]
    UnknownRole { value: String },

    /// The durable key-value store could not be read or written.
    #[error("storage error: {reason}")]
    Storage { reason: String },

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },
}

impl PortalError {
    /// Shorthand for a validation failure on `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// The text a form displays for this error.
    ///
    /// Validation and credential errors are shown verbatim. Anything
    /// unexpected collapses to [`GENERIC_FAILURE_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation { message, .. } => message.clone(),
            Self::InvalidCredentials
            | Self::LoginInProgress
            | Self::AccessDenied { .. }
            | Self::PanelUnavailable { .. } => self.to_string(),
            Self::UnknownRole { .. } | Self::Storage { .. } | Self::ConfigError { .. } => {
                GENERIC_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

/// Convenience alias used throughout the MediChain crates.
pub type PortalResult<T> = Result<T, PortalError>;
