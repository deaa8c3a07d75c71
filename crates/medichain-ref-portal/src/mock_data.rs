//! Simulated portal data.
//!
//! All data in this module is hardcoded and fictional. No external systems are
//! contacted. Appointments and notifications are generated relative to a
//! caller-supplied "now" so upcoming and past views are never empty.

use chrono::{DateTime, Duration, NaiveDate, Utc};

use medichain_contracts::{
    clinical::{
        Appointment, AppointmentStatus, DoctorProfile, MedicalRecord, Notification,
        NotificationKind, PatientProfile, RecordType,
    },
    credential::CredentialRecord,
    session::Role,
};
use medichain_core::traits::CredentialDirectory;

/// Password shared by every demo account.
pub const DEMO_PASSWORD: &str = "password123";

// ── Credentials (mock) ────────────────────────────────────────────────────────

/// The hardcoded, role-partitioned demo credential tables.
///
/// | role    | email                | name              |
/// |---------|----------------------|-------------------|
/// | doctor  | doctor@example.com   | Dr. John Smith    |
/// | doctor  | doctor2@example.com  | Dr. Sarah Johnson |
/// | patient | patient@example.com  | Alex Thompson     |
/// | patient | patient2@example.com | Emily Wilson      |
#[derive(Debug, Clone)]
pub struct StaticDirectory {
    doctors: Vec<CredentialRecord>,
    patients: Vec<CredentialRecord>,
}

impl StaticDirectory {
    pub fn demo() -> Self {
        Self {
            doctors: vec![
                CredentialRecord::new(1, "doctor@example.com", DEMO_PASSWORD, "Dr. John Smith", Role::Doctor),
                CredentialRecord::new(2, "doctor2@example.com", DEMO_PASSWORD, "Dr. Sarah Johnson", Role::Doctor),
            ],
            patients: vec![
                CredentialRecord::new(1, "patient@example.com", DEMO_PASSWORD, "Alex Thompson", Role::Patient),
                CredentialRecord::new(2, "patient2@example.com", DEMO_PASSWORD, "Emily Wilson", Role::Patient),
            ],
        }
    }

    /// Every record across both roles, doctors first.
    pub fn all(&self) -> impl Iterator<Item = &CredentialRecord> {
        self.doctors.iter().chain(self.patients.iter())
    }
}

impl CredentialDirectory for StaticDirectory {
    fn credentials(&self, role: Role) -> &[CredentialRecord] {
        match role {
            Role::Doctor => &self.doctors,
            Role::Patient => &self.patients,
        }
    }
}

// ── People (mock) ─────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("fixture dates are valid calendar dates")
}

/// Patients listed in the doctor's Patients panel.
///
/// Ids 1 and 2 are the demo patient accounts.
pub fn patients() -> Vec<PatientProfile> {
    let p = |id, name: &str, email: &str, age, gender: &str, phone: &str, condition: &str, last_visit| {
        PatientProfile {
            id,
            name: name.to_string(),
            email: email.to_string(),
            age,
            gender: gender.to_string(),
            phone: phone.to_string(),
            condition: condition.to_string(),
            last_visit,
        }
    };

    vec![
        p(1, "Alex Thompson", "patient@example.com", 34, "Male", "(555) 123-4567", "Hypertension", date(2026, 9, 2)),
        p(2, "Emily Wilson", "patient2@example.com", 28, "Female", "(555) 234-5678", "Asthma", date(2026, 8, 19)),
        p(3, "Michael Chen", "michael.chen@example.com", 45, "Male", "(555) 345-6789", "Type 2 diabetes", date(2026, 9, 11)),
        p(4, "Robert Davis", "robert.davis@example.com", 62, "Male", "(555) 456-7890", "Coronary artery disease", date(2026, 7, 28)),
        p(5, "Maria Garcia", "maria.garcia@example.com", 51, "Female", "(555) 567-8901", "Osteoarthritis", date(2026, 9, 30)),
        p(6, "Sophie Martin", "sophie.martin@example.com", 39, "Female", "(555) 678-9012", "Migraine", date(2026, 6, 14)),
    ]
}

pub fn doctors() -> Vec<DoctorProfile> {
    vec![
        DoctorProfile {
            id: 1,
            name: "Dr. John Smith".to_string(),
            email: "doctor@example.com".to_string(),
            specialty: "Cardiology".to_string(),
            license_number: "MD12345678".to_string(),
        },
        DoctorProfile {
            id: 2,
            name: "Dr. Sarah Johnson".to_string(),
            email: "doctor2@example.com".to_string(),
            specialty: "General Practice".to_string(),
            license_number: "MD87654321".to_string(),
        },
    ]
}

pub fn patient_by_id(id: u32) -> Option<PatientProfile> {
    patients().into_iter().find(|p| p.id == id)
}

pub fn doctor_by_id(id: u32) -> Option<DoctorProfile> {
    doctors().into_iter().find(|d| d.id == id)
}

// ── Appointments (mock) ───────────────────────────────────────────────────────

/// All appointments, dated relative to `now`.
pub fn appointments(now: DateTime<Utc>) -> Vec<Appointment> {
    let a = |id, patient_id, doctor_id, offset: Duration, kind: &str, status, notes: Option<&str>| {
        Appointment {
            id,
            patient_id,
            doctor_id,
            date: now + offset,
            kind: kind.to_string(),
            status,
            notes: notes.map(str::to_string),
        }
    };

    use AppointmentStatus::{Pending, Scheduled};
    vec![
        a(1, 1, 1, Duration::days(2) + Duration::hours(1), "Check-up", Scheduled, Some("Bring home blood pressure log")),
        a(2, 1, 2, Duration::days(9), "Consultation", Pending, None),
        a(3, 1, 1, -Duration::days(14), "Follow-up", Scheduled, Some("Medication dosage reviewed")),
        a(4, 2, 1, Duration::days(1) + Duration::hours(3), "Follow-up", Scheduled, None),
        a(5, 2, 2, -Duration::days(30), "Check-up", Scheduled, Some("Inhaler technique reviewed")),
        a(6, 3, 1, Duration::days(3), "Test Review", Pending, None),
        a(7, 4, 1, -Duration::days(7), "Consultation", Scheduled, Some("Stress test ordered")),
        a(8, 5, 2, Duration::days(5), "Check-up", Scheduled, None),
        a(9, 6, 2, -Duration::days(60), "Consultation", Scheduled, None),
    ]
}

// ── Medical records (mock) ────────────────────────────────────────────────────

pub fn medical_records() -> Vec<MedicalRecord> {
    let r = |id, patient_id, doctor_id, on, record_type, title: &str, description: &str, attachments: &[&str]| {
        MedicalRecord {
            id,
            patient_id,
            doctor_id,
            date: on,
            record_type,
            title: title.to_string(),
            description: description.to_string(),
            attachments: attachments.iter().map(|s| s.to_string()).collect(),
        }
    };

    vec![
        r(
            1, 1, 1, date(2026, 3, 12), RecordType::Examination,
            "Annual physical examination",
            "Routine physical. Blood pressure 142/90 mmHg, otherwise unremarkable. Advised reduced sodium intake.",
            &["physical-2026.pdf"],
        ),
        r(
            2, 1, 1, date(2026, 5, 4), RecordType::LabResults,
            "Lipid panel",
            "Total cholesterol 212 mg/dL, LDL 138 mg/dL, HDL 46 mg/dL. Repeat in six months.",
            &["lipid-panel.pdf", "lab-summary.pdf"],
        ),
        r(
            3, 1, 1, date(2026, 5, 20), RecordType::Diagnosis,
            "Stage 1 hypertension",
            "Persistent elevated readings across three visits. Started lisinopril 10 mg once daily.",
            &[],
        ),
        r(
            4, 1, 2, date(2026, 8, 9), RecordType::Procedure,
            "Ambulatory blood pressure monitoring",
            "24-hour monitoring shows improved control, mean daytime pressure 131/84 mmHg.",
            &["abpm-report.pdf"],
        ),
        r(
            5, 2, 2, date(2026, 4, 17), RecordType::Examination,
            "Respiratory assessment",
            "Mild expiratory wheeze. Peak flow 82% of predicted. Inhaler technique reviewed.",
            &[],
        ),
        r(
            6, 2, 2, date(2026, 7, 1), RecordType::LabResults,
            "Spirometry",
            "FEV1/FVC 0.74, reversible with bronchodilator. Consistent with well-controlled asthma.",
            &["spirometry.pdf"],
        ),
    ]
}

// ── Notifications (mock) ──────────────────────────────────────────────────────

/// All notifications for every user, dated relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    let n = |id, user_id, role, kind, title: &str, message: &str, ago: Duration, read| Notification {
        id,
        user_id,
        role,
        kind,
        title: title.to_string(),
        message: message.to_string(),
        date: now - ago,
        read,
    };

    use NotificationKind as K;
    use Role::{Doctor, Patient};
    vec![
        n(1, 1, Patient, K::Appointment, "Appointment confirmed", "Your appointment with Dr. Smith has been confirmed.", Duration::minutes(10), false),
        n(2, 1, Patient, K::Record, "Lab results available", "New lab results are available for review.", Duration::hours(1), false),
        n(3, 1, Patient, K::System, "Medication reminder", "Reminder: take your medication at 8 PM.", Duration::hours(2), false),
        n(4, 1, Patient, K::Message, "Message from Dr. Smith", "Please keep logging your blood pressure twice a day.", Duration::days(3), true),
        n(5, 2, Patient, K::Appointment, "Appointment tomorrow", "Follow-up with Dr. Smith tomorrow.", Duration::hours(5), false),
        n(6, 2, Patient, K::Record, "Spirometry report filed", "Your spirometry report has been added to your records.", Duration::days(9), true),
        n(7, 1, Doctor, K::Appointment, "New appointment request", "Michael Chen requested a test review.", Duration::minutes(30), false),
        n(8, 1, Doctor, K::Message, "Message from Emily Wilson", "Can we move tomorrow's follow-up to the afternoon?", Duration::hours(4), false),
        n(9, 1, Doctor, K::Record, "Lab results ready", "Lipid panel for Alex Thompson is ready for review.", Duration::days(1), true),
        n(10, 1, Doctor, K::System, "System maintenance", "The portal will be unavailable Sunday 02:00-03:00 UTC.", Duration::days(2), true),
        n(11, 2, Doctor, K::Appointment, "Appointment confirmed", "Maria Garcia confirmed her check-up.", Duration::hours(6), false),
    ]
}
