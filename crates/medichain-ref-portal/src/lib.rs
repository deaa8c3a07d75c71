//! # medichain-ref-portal
//!
//! Reference portal built on the MediChain session layer.
//!
//! Provides:
//!
//! 1. **Demo credentials**: a fixed, role-partitioned `CredentialDirectory`.
//! 2. **Clinical fixtures**: patients, doctors, appointments, medical records
//!    and notifications.
//! 3. **Dashboard panels**: pure views over the session and the fixtures,
//!    gated by role.
//! 4. **Portal wiring**: configuration to storage to `SessionManager`.
//! 5. **Walkthrough**: a scripted run of the full session lifecycle.
//!
//! All data is hardcoded and fictional. No external systems are contacted.

pub mod mock_data;
pub mod panels;
pub mod portal;
pub mod walkthrough;

pub use portal::Portal;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};
    use rand::{rngs::StdRng, SeedableRng};

    use medichain_config::PortalConfig;
    use medichain_contracts::{
        error::PortalError,
        form::RegistrationForm,
        session::{Role, Session},
    };
    use medichain_core::{traits::DurableStorage, Preferences};
    use medichain_storage::InMemoryStorage;

    use crate::{
        mock_data::{self, StaticDirectory, DEMO_PASSWORD},
        panels::{
            analytics::{self, ChartKind, TimeRange},
            appointments::{self, AppointmentTab},
            dashboard::{self, Panel},
            notifications::NotificationFeed,
            patients, records,
            registration::{self, REGISTRATION_SUCCESS_MESSAGE},
            settings::{self, SettingsTab},
        },
        portal::Portal,
        walkthrough::run_walkthrough,
    };

    fn session_for(email: &str, role: Role) -> Session {
        let directory = StaticDirectory::demo();
        let record = directory
            .all()
            .find(|r| r.email == email && r.role == role)
            .unwrap_or_else(|| panic!("no fixture for {email} as {role}"));
        Session::from_credential(record)
    }

    fn instant_config() -> PortalConfig {
        let mut config = PortalConfig::default();
        config.session.login_delay_ms = 0;
        config
    }

    fn memory_portal() -> (Portal, InMemoryStorage) {
        let storage = InMemoryStorage::new();
        let portal = Portal::with_storage(Arc::new(storage.clone()), &instant_config());
        (portal, storage)
    }

    // ── Fixtures ──────────────────────────────────────────────────────────────

    #[test]
    fn test_directory_has_two_accounts_per_role() {
        use medichain_core::traits::CredentialDirectory;

        let directory = StaticDirectory::demo();
        for role in Role::ALL {
            let records = directory.credentials(role);
            assert_eq!(records.len(), 2, "expected two {role} accounts");
            assert!(records.iter().all(|r| r.role == role));
            assert!(records.iter().all(|r| r.password == DEMO_PASSWORD));
        }
    }

    #[test]
    fn test_demo_accounts_have_patient_profiles() {
        let directory = StaticDirectory::demo();
        for record in directory.all().filter(|r| r.role == Role::Patient) {
            let profile = mock_data::patient_by_id(record.id).expect("profile for demo patient");
            assert_eq!(profile.email, record.email);
            assert_eq!(profile.name, record.display_name);
        }
    }

    // ── Dashboard ─────────────────────────────────────────────────────────────

    #[test]
    fn test_patients_panel_is_doctor_only() {
        assert!(dashboard::panel_allowed(Role::Doctor, Panel::Patients));
        assert!(!dashboard::panel_allowed(Role::Patient, Panel::Patients));
        assert_eq!(dashboard::navigation(Role::Doctor).len(), 7);
        assert_eq!(dashboard::navigation(Role::Patient).len(), 6);
    }

    #[test]
    fn test_panel_routes_and_parsing() {
        assert_eq!(Panel::Home.route(Role::Doctor), "/doctor-dashboard");
        assert_eq!(Panel::Records.route(Role::Patient), "/patient-dashboard/records");
        assert_eq!("Analytics".parse::<Panel>().unwrap(), Panel::Analytics);
        assert_eq!("".parse::<Panel>().unwrap(), Panel::Home);
        match "billing".parse::<Panel>() {
            Err(PortalError::Validation { field, .. }) => assert_eq!(field, "panel"),
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    #[test]
    fn test_home_stats_per_role() {
        let doctor = dashboard::home_stats(Role::Doctor);
        assert_eq!(doctor[0].name, "Total Patients");
        assert_eq!(doctor[0].value, "248");
        let patient = dashboard::home_stats(Role::Patient);
        assert_eq!(patient[3].name, "Health Score");
        assert_eq!(patient[3].value, "85");
    }

    // ── Patients ──────────────────────────────────────────────────────────────

    #[test]
    fn test_patient_search_is_case_insensitive_over_name_and_email() {
        let all = mock_data::patients();
        let by_name = patients::search(&all, "EMILY");
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].name, "Emily Wilson");

        let by_email = patients::search(&all, "robert.davis@");
        assert_eq!(by_email.len(), 1);

        assert_eq!(patients::search(&all, "  ").len(), all.len());
        assert!(patients::search(&all, "zzz").is_empty());
    }

    // ── Appointments ──────────────────────────────────────────────────────────

    #[test]
    fn test_patient_appointments_split_on_now() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let alex = session_for("patient@example.com", Role::Patient);

        let upcoming = appointments::rows(&alex, AppointmentTab::Upcoming, now);
        let past = appointments::rows(&alex, AppointmentTab::Past, now);

        assert_eq!(upcoming.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(past.iter().map(|r| r.id).collect::<Vec<_>>(), vec![3]);
        assert_eq!(upcoming[0].counterpart, "Dr. John Smith");
        assert_eq!(upcoming[1].counterpart, "Dr. Sarah Johnson");
    }

    #[test]
    fn test_doctor_sees_own_appointments_with_patient_names() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let smith = session_for("doctor@example.com", Role::Doctor);

        let all = appointments::for_user(&mock_data::appointments(now), &smith);
        assert!(all.iter().all(|a| a.doctor_id == 1));

        let past = appointments::rows(&smith, AppointmentTab::Past, now);
        // Most recent first.
        assert_eq!(past.iter().map(|r| r.id).collect::<Vec<_>>(), vec![7, 3]);
        assert_eq!(past[0].counterpart, "Robert Davis");
    }

    #[test]
    fn test_appointment_row_json_shape() {
        let now = Utc.with_ymd_and_hms(2026, 10, 18, 9, 0, 0).unwrap();
        let alex = session_for("patient@example.com", Role::Patient);
        let rows = appointments::rows(&alex, AppointmentTab::Past, now);

        let json = serde_json::to_value(&rows[0]).unwrap();
        assert_eq!(json["counterpart"], "Dr. John Smith");
        assert_eq!(json["status"], "Scheduled");
        assert_eq!(json["notes"], "Medication dosage reviewed");
        assert!(json.get("kind").is_some());
    }

    // ── Records ───────────────────────────────────────────────────────────────

    #[test]
    fn test_patient_sees_only_own_records_newest_first() {
        let emily = session_for("patient2@example.com", Role::Patient);
        let visible = records::visible(&mock_data::medical_records(), &emily);
        assert_eq!(visible.iter().map(|r| r.id).collect::<Vec<_>>(), vec![6, 5]);
    }

    #[test]
    fn test_doctor_views_pinned_patient_records() {
        let smith = session_for("doctor@example.com", Role::Doctor);
        let visible = records::visible(&mock_data::medical_records(), &smith);
        assert_eq!(visible.iter().map(|r| r.id).collect::<Vec<_>>(), vec![4, 3, 2, 1]);
        assert!(records::can_edit(Role::Doctor));
        assert!(!records::can_edit(Role::Patient));
    }

    #[test]
    fn test_record_search_covers_type_and_description() {
        let all = mock_data::medical_records();
        assert_eq!(records::search(&all, "lab results").len(), 2);
        assert_eq!(records::search(&all, "LISINOPRIL").len(), 1);
        assert_eq!(records::search(&all, "").len(), all.len());
    }

    // ── Notifications ─────────────────────────────────────────────────────────

    #[test]
    fn test_feed_filters_by_user_and_role() {
        let now = Utc::now();
        // Patient 1 and doctor 1 share an id; each sees only their own.
        let alex = session_for("patient@example.com", Role::Patient);
        let smith = session_for("doctor@example.com", Role::Doctor);

        let alex_feed = NotificationFeed::for_session(mock_data::notifications(now), &alex);
        let smith_feed = NotificationFeed::for_session(mock_data::notifications(now), &smith);

        assert_eq!(alex_feed.all().len(), 4);
        assert_eq!(smith_feed.all().len(), 4);
        assert!(alex_feed.all().iter().all(|n| n.role == Role::Patient));
        assert!(alex_feed.all().windows(2).all(|w| w[0].date >= w[1].date));
    }

    #[test]
    fn test_mark_read_and_mark_all_read() {
        let alex = session_for("patient@example.com", Role::Patient);
        let mut feed = NotificationFeed::for_session(mock_data::notifications(Utc::now()), &alex);
        assert_eq!(feed.unread_count(), 3);

        assert!(feed.mark_read(2));
        assert_eq!(feed.unread_count(), 2);
        assert!(!feed.mark_read(7), "doctor notification is not in the patient feed");

        feed.mark_all_read();
        assert_eq!(feed.unread_count(), 0);
        assert_eq!(feed.read().count(), 4);
    }

    // ── Analytics ─────────────────────────────────────────────────────────────

    #[test]
    fn test_chart_series_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for range in TimeRange::ALL {
            let doctor = analytics::chart_data(Role::Doctor, range, &mut rng);
            assert_eq!(doctor.title, "Patient Activity");
            for series in &doctor.series {
                assert_eq!(series.values.len(), doctor.labels.len());
            }
            assert!(doctor.series[0].values.iter().all(|v| (5..=20).contains(v)));
            assert!(doctor.series[1].values.iter().all(|v| (1..=10).contains(v)));

            let patient = analytics::chart_data(Role::Patient, range, &mut rng);
            assert_eq!(patient.title, "Health Activity");
            assert!(patient.series[0].values.iter().all(|v| *v <= 3));
            assert!(patient.series[1].values.iter().all(|v| (70..=95).contains(v)));
        }
    }

    #[test]
    fn test_range_labels_and_pie_totals() {
        assert_eq!(TimeRange::Week.labels().len(), 7);
        assert_eq!(TimeRange::Month.labels(), vec!["Week 1", "Week 2", "Week 3", "Week 4"]);
        assert_eq!(TimeRange::Year.labels().len(), 12);

        let mut rng = StdRng::seed_from_u64(1);
        for role in Role::ALL {
            let data = analytics::chart_data(role, TimeRange::Month, &mut rng);
            let total: u32 = data.pie.iter().map(|s| s.percent).sum();
            assert_eq!(total, 100, "pie for {role} should sum to 100");
        }
        assert_eq!(ChartKind::Pie.next(), ChartKind::Line);
    }

    #[test]
    fn test_stat_change_labels() {
        let patient = analytics::stats(Role::Patient);
        assert_eq!(patient[0].change_label(), "no change");
        assert_eq!(patient[1].change_label(), "+8%");
        assert_eq!(patient[2].change_label(), "-3%");
    }

    // ── Settings ──────────────────────────────────────────────────────────────

    #[test]
    fn test_profile_fields_depend_on_role() {
        let smith = session_for("doctor@example.com", Role::Doctor);
        let fields = settings::profile_fields(&smith);
        assert!(fields.contains(&("Full Name", "Dr. John Smith".to_string())));
        assert!(fields.contains(&("License Number", "MD12345678".to_string())));

        let alex = session_for("patient@example.com", Role::Patient);
        let fields = settings::profile_fields(&alex);
        assert!(fields.contains(&("Emergency Contact", "Jane Doe".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "Specialty"));
    }

    #[test]
    fn test_toggle_defaults_and_flip() {
        let mut prefs = Preferences::new(true);
        let resolved = settings::resolve(
            settings::options_for(SettingsTab::Notifications, Role::Patient),
            &prefs,
        );
        let news = resolved.iter().find(|(o, _)| o.id == "email-news").unwrap();
        assert!(!news.1, "newsletter emails default to off");

        assert_eq!(settings::flip(&mut prefs, Role::Patient, "email-news"), Some(true));
        assert_eq!(settings::flip(&mut prefs, Role::Patient, "share-research"), Some(true));
        assert_eq!(settings::flip(&mut prefs, Role::Patient, "share-profile"), None);
        assert!(settings::options_for(SettingsTab::Security, Role::Doctor).is_empty());
    }

    // ── Registration ──────────────────────────────────────────────────────────

    #[test]
    fn test_registration_returns_receipt() {
        let form = RegistrationForm {
            name: " Jordan Lee ".to_string(),
            email: "jordan@example.com".to_string(),
            password: "s3cret".to_string(),
            confirm_password: "s3cret".to_string(),
            role: Role::Patient,
        };
        let receipt = registration::register(&form).unwrap();
        assert_eq!(receipt.name, "Jordan Lee");
        assert_eq!(receipt.message, REGISTRATION_SUCCESS_MESSAGE);
    }

    #[test]
    fn test_registration_does_not_create_credentials() {
        let form = RegistrationForm {
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            password: "s3cret".to_string(),
            confirm_password: "s3cret".to_string(),
            role: Role::Doctor,
        };
        registration::register(&form).unwrap();
        assert!(StaticDirectory::demo().all().all(|r| r.email != "jordan@example.com"));
    }

    #[test]
    fn test_registration_mismatch_is_validation_error() {
        let form = RegistrationForm {
            name: "Jordan Lee".to_string(),
            email: "jordan@example.com".to_string(),
            password: "one".to_string(),
            confirm_password: "two".to_string(),
            role: Role::Patient,
        };
        match registration::register(&form) {
            Err(e @ PortalError::Validation { .. }) => {
                assert_eq!(e.user_message(), "Passwords do not match");
            }
            other => panic!("expected Validation, got {:?}", other),
        }
    }

    // ── Portal ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_open_panel_requires_matching_role() {
        let (portal, _storage) = memory_portal();

        match portal.open_panel(Role::Doctor, Panel::Home) {
            Err(PortalError::AccessDenied { required }) => assert_eq!(required, Role::Doctor),
            other => panic!("expected AccessDenied, got {:?}", other),
        }

        portal
            .manager()
            .login("patient@example.com", DEMO_PASSWORD, Role::Patient)
            .await
            .unwrap();

        assert!(portal.open_panel(Role::Patient, Panel::Records).is_ok());
        assert!(portal.open_panel(Role::Doctor, Panel::Records).is_err());
    }

    #[tokio::test]
    async fn test_open_panel_outside_navigation_is_unavailable() {
        let (portal, _storage) = memory_portal();
        portal
            .manager()
            .login("patient@example.com", DEMO_PASSWORD, Role::Patient)
            .await
            .unwrap();

        match portal.open_panel(Role::Patient, Panel::Patients) {
            Err(PortalError::PanelUnavailable { panel, role }) => {
                assert_eq!(panel, Panel::Patients.to_string());
                assert_eq!(role, Role::Patient);
            }
            other => panic!("expected PanelUnavailable, got {:?}", other),
        }
        assert!(portal.manager().current_session().is_some(), "session must survive the refusal");
    }

    #[tokio::test]
    async fn test_preferences_survive_logout() {
        let (portal, _storage) = memory_portal();
        portal
            .manager()
            .login("doctor@example.com", DEMO_PASSWORD, Role::Doctor)
            .await
            .unwrap();

        let mut prefs = portal.preferences();
        assert!(prefs.dark_mode, "dark mode defaults from config");
        prefs.toggle_dark_mode();
        portal.save_preferences(&prefs).unwrap();

        portal.manager().logout();
        assert!(!portal.preferences().dark_mode);
    }

    #[tokio::test]
    async fn test_file_backend_restores_session_across_portals() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = instant_config();
        config.storage.path = dir.path().join("nested").join("storage.json");

        let first = Portal::from_config(&config);
        first
            .manager()
            .login("doctor2@example.com", DEMO_PASSWORD, Role::Doctor)
            .await
            .unwrap();

        let second = Portal::from_config(&config);
        let restored = second.manager().current_session().expect("session restored");
        assert_eq!(restored.display_name, "Dr. Sarah Johnson");
        assert_eq!(restored.role, Role::Doctor);
    }

    #[test]
    fn test_memory_backend_starts_anonymous() {
        let mut config = instant_config();
        config.storage.backend = medichain_config::StorageBackend::Memory;
        let portal = Portal::from_config(&config);
        assert!(portal.manager().current_session().is_none());
    }

    #[test]
    fn test_shared_store_is_visible_to_portal() {
        let storage = InMemoryStorage::new();
        let shared: Arc<dyn DurableStorage> = Arc::new(storage.clone());
        let portal = Portal::with_storage(shared, &instant_config());
        portal.save_preferences(&Preferences::new(false)).unwrap();
        assert!(storage.keys().contains(&"preferences".to_string()));
    }

    // ── Walkthrough ───────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_walkthrough_passes_every_step() {
        let steps = run_walkthrough(&PortalConfig::default()).await;
        assert_eq!(steps.len(), 6);
        for step in &steps {
            assert!(step.passed, "step '{}' failed: {}", step.name, step.detail);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_walkthrough_with_zero_delay_still_checks_overlap() {
        let steps = run_walkthrough(&instant_config()).await;
        assert!(steps.iter().all(|s| s.passed));
    }
}
