//! Medical records list with search.
//!
//! A patient sees their own records. A doctor sees the records of the patient
//! currently open in the panel, which the demo pins to patient 1.

use medichain_contracts::{
    clinical::MedicalRecord,
    session::{Role, Session},
};

/// Patient whose records a doctor sees when opening the panel.
pub const DOCTOR_VIEW_PATIENT_ID: u32 = 1;

/// Records visible to `session`, newest first.
pub fn visible(records: &[MedicalRecord], session: &Session) -> Vec<MedicalRecord> {
    let patient_id = match session.role {
        Role::Patient => session.user_id,
        Role::Doctor => DOCTOR_VIEW_PATIENT_ID,
    };
    let mut out: Vec<MedicalRecord> = records
        .iter()
        .filter(|r| r.patient_id == patient_id)
        .cloned()
        .collect();
    out.sort_by(|a, b| b.date.cmp(&a.date));
    out
}

/// Records whose title, type or description contains `term`,
/// case-insensitively.
pub fn search<'a>(records: &'a [MedicalRecord], term: &str) -> Vec<&'a MedicalRecord> {
    let needle = term.trim().to_lowercase();
    records
        .iter()
        .filter(|r| {
            needle.is_empty()
                || r.title.to_lowercase().contains(&needle)
                || r.record_type.label().to_lowercase().contains(&needle)
                || r.description.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Only doctors may add or edit records.
pub fn can_edit(role: Role) -> bool {
    role == Role::Doctor
}

pub fn summary_line(record: &MedicalRecord) -> String {
    let attachments = match record.attachments.len() {
        0 => String::new(),
        1 => " (1 attachment)".to_string(),
        n => format!(" ({} attachments)", n),
    };
    format!(
        "{}  {:<12}  {}{}",
        record.date.format("%Y-%m-%d"),
        record.record_type.label(),
        record.title,
        attachments
    )
}
