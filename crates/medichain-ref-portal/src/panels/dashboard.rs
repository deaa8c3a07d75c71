//! Dashboard navigation and home-screen summary.

use std::{fmt, str::FromStr};

use serde::Serialize;

use medichain_contracts::{
    error::{PortalError, PortalResult},
    session::Role,
};

/// One page of a role dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Panel {
    Home,
    Patients,
    Appointments,
    Records,
    Notifications,
    Analytics,
    Settings,
}

impl Panel {
    pub fn label(self) -> &'static str {
        match self {
            Panel::Home => "Dashboard",
            Panel::Patients => "Patients",
            Panel::Appointments => "Appointments",
            Panel::Records => "Medical Records",
            Panel::Notifications => "Notifications",
            Panel::Analytics => "Analytics",
            Panel::Settings => "Settings",
        }
    }

    /// Path segment under the role's dashboard route. Home is the empty
    /// segment.
    pub fn path(self) -> &'static str {
        match self {
            Panel::Home => "",
            Panel::Patients => "patients",
            Panel::Appointments => "appointments",
            Panel::Records => "records",
            Panel::Notifications => "notifications",
            Panel::Analytics => "analytics",
            Panel::Settings => "settings",
        }
    }

    /// Full route, e.g. `/doctor-dashboard/records`.
    pub fn route(self, role: Role) -> String {
        match self {
            Panel::Home => role.dashboard_path().to_string(),
            other => format!("{}/{}", role.dashboard_path(), other.path()),
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Panel {
    type Err = PortalError;

    fn from_str(s: &str) -> PortalResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "home" | "dashboard" => Ok(Panel::Home),
            "patients" => Ok(Panel::Patients),
            "appointments" => Ok(Panel::Appointments),
            "records" | "medical-records" => Ok(Panel::Records),
            "notifications" => Ok(Panel::Notifications),
            "analytics" => Ok(Panel::Analytics),
            "settings" => Ok(Panel::Settings),
            _ => Err(PortalError::validation("panel", format!("unknown panel '{}'", s))),
        }
    }
}

/// Sidebar entries for `role`, in display order.
///
/// Only doctors get the Patients panel.
pub fn navigation(role: Role) -> Vec<Panel> {
    match role {
        Role::Doctor => vec![
            Panel::Home,
            Panel::Patients,
            Panel::Appointments,
            Panel::Records,
            Panel::Notifications,
            Panel::Analytics,
            Panel::Settings,
        ],
        Role::Patient => vec![
            Panel::Home,
            Panel::Appointments,
            Panel::Records,
            Panel::Notifications,
            Panel::Analytics,
            Panel::Settings,
        ],
    }
}

/// Whether `panel` appears on `role`'s dashboard.
pub fn panel_allowed(role: Role, panel: Panel) -> bool {
    navigation(role).contains(&panel)
}

/// A headline number on the home screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HomeStat {
    pub name: &'static str,
    pub value: &'static str,
}

/// Home-screen stat tiles for `role`.
pub fn home_stats(role: Role) -> Vec<HomeStat> {
    let s = |name, value| HomeStat { name, value };
    match role {
        Role::Doctor => vec![
            s("Total Patients", "248"),
            s("Today's Appointments", "12"),
            s("Pending Reports", "6"),
            s("Messages", "18"),
        ],
        Role::Patient => vec![
            s("Upcoming Appointments", "2"),
            s("Prescriptions", "4"),
            s("Messages", "3"),
            s("Health Score", "85"),
        ],
    }
}

/// Greeting shown at the top of the home screen.
pub fn greeting(display_name: &str) -> String {
    format!("Welcome back, {}", display_name)
}
