//! Account settings: profile details and preference toggles.
//!
//! Toggle state resolves against the stored `Preferences`; options the user
//! never touched show their default.

use serde::Serialize;

use medichain_contracts::session::{Role, Session};
use medichain_core::Preferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsTab {
    Profile,
    Notifications,
    Security,
    Privacy,
    Devices,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 5] = [
        SettingsTab::Profile,
        SettingsTab::Notifications,
        SettingsTab::Security,
        SettingsTab::Privacy,
        SettingsTab::Devices,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::Profile => "Profile",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Security => "Security",
            SettingsTab::Privacy => "Privacy",
            SettingsTab::Devices => "Devices",
        }
    }
}

/// Profile fields for the signed-in user. Name and email come from the
/// session; the rest is demo data.
pub fn profile_fields(session: &Session) -> Vec<(&'static str, String)> {
    let mut fields = vec![
        ("Full Name", session.display_name.clone()),
        ("Email", session.email.clone()),
        ("Account Type", session.role.label().to_string()),
    ];
    match session.role {
        Role::Doctor => {
            fields.push(("Specialty", "Cardiology".to_string()));
            fields.push(("License Number", "MD12345678".to_string()));
        }
        Role::Patient => {
            fields.push(("Phone", "(555) 123-4567".to_string()));
            fields.push(("Emergency Contact", "Jane Doe".to_string()));
            fields.push(("Emergency Contact Phone", "(555) 987-6543".to_string()));
        }
    }
    fields
}

/// A checkbox option and its default state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOption {
    pub id: &'static str,
    pub label: &'static str,
    pub default: bool,
}

const fn opt(id: &'static str, label: &'static str, default: bool) -> ToggleOption {
    ToggleOption { id, label, default }
}

pub const NOTIFICATION_OPTIONS: &[ToggleOption] = &[
    opt("email-appointments", "Email: appointment reminders", true),
    opt("email-messages", "Email: new messages", true),
    opt("email-records", "Email: medical record updates", true),
    opt("email-news", "Email: newsletters and updates", false),
    opt("push-appointments", "Push: appointment reminders", true),
    opt("push-messages", "Push: new messages", true),
    opt("push-records", "Push: medical record updates", true),
];

const PATIENT_PRIVACY_OPTIONS: &[ToggleOption] = &[
    opt("share-doctors", "Share records with my doctors", true),
    opt("share-insurance", "Share records with my insurance provider", true),
    opt("share-research", "Allow anonymized data for research", false),
    opt("share-emergency", "Share records in emergencies", true),
];

const DOCTOR_PRIVACY_OPTIONS: &[ToggleOption] = &[
    opt("share-profile", "Show my profile to patients", true),
    opt("share-specialty", "List my specialty in the directory", true),
    opt("share-availability", "Show my availability to patients", true),
];

pub fn privacy_options(role: Role) -> &'static [ToggleOption] {
    match role {
        Role::Doctor => DOCTOR_PRIVACY_OPTIONS,
        Role::Patient => PATIENT_PRIVACY_OPTIONS,
    }
}

/// Options shown on `tab` for `role`. Tabs without checkboxes are empty.
pub fn options_for(tab: SettingsTab, role: Role) -> &'static [ToggleOption] {
    match tab {
        SettingsTab::Notifications => NOTIFICATION_OPTIONS,
        SettingsTab::Privacy => privacy_options(role),
        _ => &[],
    }
}

/// Resolve each option against `prefs`.
pub fn resolve(options: &[ToggleOption], prefs: &Preferences) -> Vec<(ToggleOption, bool)> {
    options
        .iter()
        .map(|o| (*o, prefs.toggle(o.id, o.default)))
        .collect()
}

/// Flip option `id` in `prefs`. Returns the new state, or `None` if `id` is
/// not a known option for `role`.
pub fn flip(prefs: &mut Preferences, role: Role, id: &str) -> Option<bool> {
    let option = NOTIFICATION_OPTIONS
        .iter()
        .chain(privacy_options(role))
        .find(|o| o.id == id)?;
    let next = !prefs.toggle(option.id, option.default);
    prefs.set_toggle(option.id, next);
    Some(next)
}

/// Static rows for the Security tab.
pub fn security_items() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Password", "Last changed 3 months ago"),
        ("Two-factor authentication", "Not enabled"),
        ("Login alerts", "Enabled"),
    ]
}

/// Static rows for the Devices tab.
pub fn devices() -> Vec<(&'static str, &'static str)> {
    vec![
        ("Chrome on Windows", "Current session"),
        ("Safari on iPhone", "Last active 2 days ago"),
    ]
}
