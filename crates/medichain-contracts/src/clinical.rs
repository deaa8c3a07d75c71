//! Clinical fixture types consumed read-only by the dashboard panels.
//!
//! These are plain data. The values live in `medichain-ref-portal::mock_data`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::session::Role;

/// A patient as listed in the doctor's Patients panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub age: u32,
    pub gender: String,
    pub phone: String,
    pub condition: String,
    pub last_visit: NaiveDate,
}

/// A doctor as shown on the patient's side of an appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub specialty: String,
    pub license_number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Scheduled,
    Pending,
}

impl AppointmentStatus {
    pub fn label(self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Pending => "Pending",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub date: DateTime<Utc>,
    /// Visit kind, e.g. "Check-up", "Follow-up".
    pub kind: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordType {
    Examination,
    #[serde(rename = "Lab Results")]
    LabResults,
    Diagnosis,
    Procedure,
}

impl RecordType {
    pub fn label(self) -> &'static str {
        match self {
            RecordType::Examination => "Examination",
            RecordType::LabResults => "Lab Results",
            RecordType::Diagnosis => "Diagnosis",
            RecordType::Procedure => "Procedure",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: u32,
    pub patient_id: u32,
    pub doctor_id: u32,
    pub date: NaiveDate,
    pub record_type: RecordType,
    pub title: String,
    pub description: String,
    /// Attachment file names. Downloads are not simulated.
    pub attachments: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Appointment,
    Message,
    Record,
    System,
}

impl NotificationKind {
    /// Label of the follow-up link shown under the notification, if any.
    pub fn action_label(self) -> Option<&'static str> {
        match self {
            NotificationKind::Appointment => Some("View appointment"),
            NotificationKind::Message => Some("View message"),
            NotificationKind::Record => Some("View record"),
            NotificationKind::System => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    /// Recipient. User ids repeat across roles, so both are needed.
    pub user_id: u32,
    pub role: Role,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub date: DateTime<Utc>,
    pub read: bool,
}
