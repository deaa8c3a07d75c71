//! Account registration.
//!
//! Registration validates the form and hands back a receipt. No account is
//! created; the credential tables stay fixed.

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use medichain_contracts::{error::PortalResult, form::RegistrationForm, session::Role};

pub const REGISTRATION_SUCCESS_MESSAGE: &str =
    "Registration successful! Please login with your credentials.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationReceipt {
    pub reference: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub message: &'static str,
}

pub fn register(form: &RegistrationForm) -> PortalResult<RegistrationReceipt> {
    form.validate()?;
    let receipt = RegistrationReceipt {
        reference: Uuid::new_v4(),
        name: form.name.trim().to_string(),
        email: form.email.trim().to_string(),
        role: form.role,
        message: REGISTRATION_SUCCESS_MESSAGE,
    };
    info!(reference = %receipt.reference, role = %receipt.role, "registration accepted");
    Ok(receipt)
}
