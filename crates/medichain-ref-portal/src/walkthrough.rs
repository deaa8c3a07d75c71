//! Scripted end-to-end run of the session lifecycle.
//!
//! Walk-through:
//!   1. Doctor signs in with the right password → Authenticated(doctor)
//!   2. Doctor retries with a wrong password → "Invalid email or password",
//!      session kept
//!   3. Patient email against the doctor table → rejected
//!   4. Two overlapping attempts → the second gets `LoginInProgress`
//!   5. A fresh manager over the same store restores the session
//!   6. Logout twice → Anonymous, store emptied
//!
//! Runs over in-memory storage. Each step is printed and recorded so callers
//! can check the outcome.

use std::sync::Arc;

use medichain_config::PortalConfig;
use medichain_contracts::{error::PortalError, session::Role};
use medichain_core::{keys, traits::DurableStorage};
use medichain_storage::InMemoryStorage;

use crate::{mock_data::DEMO_PASSWORD, portal::Portal};

/// The outcome of one walkthrough step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

impl StepOutcome {
    fn new(name: &'static str, passed: bool, detail: impl Into<String>) -> Self {
        let outcome = Self {
            name,
            passed,
            detail: detail.into(),
        };
        let mark = if outcome.passed { "PASS" } else { "FAIL" };
        println!("  [{}] {}", mark, outcome.name);
        println!("         {}", outcome.detail);
        outcome
    }
}

/// Run the walkthrough against a fresh in-memory store using `config`'s login
/// delay. Returns every step's outcome in order.
pub async fn run_walkthrough(config: &PortalConfig) -> Vec<StepOutcome> {
    // Step 4 needs an attempt that is still pending when the second starts.
    let mut config = config.clone();
    config.session.login_delay_ms = config.session.login_delay_ms.max(1);
    let config = &config;

    println!("=== Session lifecycle walkthrough ===");
    println!("  Login delay: {} ms", config.session.login_delay_ms);
    println!();

    let storage = InMemoryStorage::new();
    let shared: Arc<dyn DurableStorage> = Arc::new(storage.clone());
    let portal = Portal::with_storage(Arc::clone(&shared), config);
    let manager = Arc::clone(portal.manager());
    let mut steps = Vec::new();

    // ── 1. Valid doctor login ─────────────────────────────────────────────────

    let first = manager.login("doctor@example.com", DEMO_PASSWORD, Role::Doctor).await;
    steps.push(match &first {
        Ok(session) => StepOutcome::new(
            "doctor login with valid credentials",
            session.role == Role::Doctor && manager.authorize(Role::Doctor).is_ok(),
            format!("signed in as {} ({})", session.display_name, session.role),
        ),
        Err(e) => StepOutcome::new("doctor login with valid credentials", false, e.user_message()),
    });

    // ── 2. Wrong password ─────────────────────────────────────────────────────

    let wrong = manager.login("doctor@example.com", "wrongpass", Role::Doctor).await;
    let kept = manager.current_session().map(|s| s.role) == Some(Role::Doctor);
    steps.push(StepOutcome::new(
        "wrong password is rejected",
        matches!(wrong, Err(PortalError::InvalidCredentials))
            && manager.last_error().as_deref() == Some("Invalid email or password")
            && kept,
        format!(
            "error: {:?}, previous session kept: {}",
            manager.last_error().unwrap_or_default(),
            kept
        ),
    ));

    // ── 3. Cross-role credentials ─────────────────────────────────────────────

    let cross = manager.login("patient@example.com", DEMO_PASSWORD, Role::Doctor).await;
    steps.push(StepOutcome::new(
        "patient credentials against the doctor table are rejected",
        matches!(cross, Err(PortalError::InvalidCredentials)),
        match cross {
            Ok(s) => format!("unexpectedly signed in as {}", s.display_name),
            Err(e) => e.user_message(),
        },
    ));

    // ── 4. Overlapping attempts ───────────────────────────────────────────────

    let (a, b) = tokio::join!(
        manager.login("patient@example.com", DEMO_PASSWORD, Role::Patient),
        manager.login("doctor2@example.com", DEMO_PASSWORD, Role::Doctor),
    );
    steps.push(StepOutcome::new(
        "second overlapping login is refused",
        a.is_ok() && matches!(b, Err(PortalError::LoginInProgress)),
        format!(
            "first: {}, second: {}",
            a.as_ref().map(|s| s.display_name.as_str()).unwrap_or("failed"),
            match &b {
                Ok(_) => "accepted".to_string(),
                Err(e) => e.to_string(),
            }
        ),
    ));

    // ── 5. Restart ────────────────────────────────────────────────────────────

    let restarted = Portal::with_storage(Arc::clone(&shared), config);
    let before = manager.current_session();
    let after = restarted.manager().current_session();
    steps.push(StepOutcome::new(
        "session survives a restart",
        matches!((&before, &after), (Some(b), Some(a)) if b.same_identity(a)),
        format!(
            "restored: {}",
            after
                .as_ref()
                .map(|s| format!("{} ({})", s.display_name, s.role))
                .unwrap_or_else(|| "nobody".to_string())
        ),
    ));

    // ── 6. Logout ─────────────────────────────────────────────────────────────

    manager.logout();
    manager.logout();
    let cleared = storage.get(keys::CURRENT_USER).ok().flatten().is_none()
        && storage.get(keys::USER_TYPE).ok().flatten().is_none();
    steps.push(StepOutcome::new(
        "logout twice leaves nobody signed in",
        manager.current_session().is_none() && cleared,
        format!("durable session keys cleared: {}", cleared),
    ));

    println!();
    let passed = steps.iter().filter(|s| s.passed).count();
    println!("  {}/{} steps passed", passed, steps.len());
    steps
}
