//! Doctor-only patient directory with search.

use medichain_contracts::clinical::PatientProfile;

/// Patients whose name or email contains `term`, case-insensitively.
///
/// An empty or blank term matches everyone.
pub fn search<'a>(patients: &'a [PatientProfile], term: &str) -> Vec<&'a PatientProfile> {
    let needle = term.trim().to_lowercase();
    patients
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.name.to_lowercase().contains(&needle)
                || p.email.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Message shown when a search matches nobody.
pub fn no_match_message(term: &str) -> String {
    format!("No patients found matching \"{}\"", term)
}

/// Label/value pairs for the detail pane of a selected patient.
pub fn details(patient: &PatientProfile) -> Vec<(&'static str, String)> {
    vec![
        ("Name", patient.name.clone()),
        ("Email", patient.email.clone()),
        ("Phone", patient.phone.clone()),
        ("Age", patient.age.to_string()),
        ("Gender", patient.gender.clone()),
        ("Condition", patient.condition.clone()),
        ("Last visit", patient.last_visit.format("%b %-d, %Y").to_string()),
    ]
}
