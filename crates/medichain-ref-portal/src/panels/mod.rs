//! Dashboard panels.
//!
//! Each panel is a pure view over the session and the fixtures in
//! `mock_data`. Role gating happens before a panel is reached: callers go
//! through `SessionManager::authorize` and `dashboard::panel_allowed`.

pub mod analytics;
pub mod appointments;
pub mod dashboard;
pub mod notifications;
pub mod patients;
pub mod records;
pub mod registration;
pub mod settings;
