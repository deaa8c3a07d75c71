//! Upcoming and past appointments for the signed-in user.

use chrono::{DateTime, Utc};
use serde::Serialize;

use medichain_contracts::{
    clinical::Appointment,
    session::{Role, Session},
};

use crate::mock_data;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentTab {
    Upcoming,
    Past,
}

impl AppointmentTab {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentTab::Upcoming => "Upcoming",
            AppointmentTab::Past => "Past",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AppointmentTab::Upcoming => AppointmentTab::Past,
            AppointmentTab::Past => AppointmentTab::Upcoming,
        }
    }
}

/// One row of the appointments table, with the other party resolved to a
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRow {
    pub id: u32,
    /// The doctor's name for a patient, the patient's name for a doctor.
    pub counterpart: String,
    pub date: String,
    pub time: String,
    pub kind: String,
    pub status: &'static str,
    pub notes: Option<String>,
}

/// Appointments the session's user takes part in.
pub fn for_user(appointments: &[Appointment], session: &Session) -> Vec<Appointment> {
    appointments
        .iter()
        .filter(|a| match session.role {
            Role::Doctor => a.doctor_id == session.user_id,
            Role::Patient => a.patient_id == session.user_id,
        })
        .cloned()
        .collect()
}

/// Split on `now`: upcoming is soonest first, past is most recent first.
pub fn select_tab(mut appointments: Vec<Appointment>, tab: AppointmentTab, now: DateTime<Utc>) -> Vec<Appointment> {
    match tab {
        AppointmentTab::Upcoming => {
            appointments.retain(|a| a.date >= now);
            appointments.sort_by_key(|a| a.date);
        }
        AppointmentTab::Past => {
            appointments.retain(|a| a.date < now);
            appointments.sort_by(|a, b| b.date.cmp(&a.date));
        }
    }
    appointments
}

fn counterpart_name(appointment: &Appointment, viewer: Role) -> String {
    let name = match viewer {
        Role::Doctor => mock_data::patient_by_id(appointment.patient_id).map(|p| p.name),
        Role::Patient => mock_data::doctor_by_id(appointment.doctor_id).map(|d| d.name),
    };
    name.unwrap_or_else(|| "Unknown".to_string())
}

pub fn to_row(appointment: &Appointment, viewer: Role) -> AppointmentRow {
    AppointmentRow {
        id: appointment.id,
        counterpart: counterpart_name(appointment, viewer),
        date: appointment.date.format("%a, %b %-d, %Y").to_string(),
        time: appointment.date.format("%-I:%M %p").to_string(),
        kind: appointment.kind.clone(),
        status: appointment.status.label(),
        notes: appointment.notes.clone(),
    }
}

/// The rows shown on `tab` for `session` at `now`.
pub fn rows(session: &Session, tab: AppointmentTab, now: DateTime<Utc>) -> Vec<AppointmentRow> {
    let mine = for_user(&mock_data::appointments(now), session);
    select_tab(mine, tab, now)
        .iter()
        .map(|a| to_row(a, session.role))
        .collect()
}

pub fn empty_message(tab: AppointmentTab) -> &'static str {
    match tab {
        AppointmentTab::Upcoming => "No upcoming appointments",
        AppointmentTab::Past => "No past appointments",
    }
}
