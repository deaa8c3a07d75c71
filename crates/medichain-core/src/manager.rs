//! The session manager: the portal's only stateful component.
//!
//! The manager moves between two states:
//!
//!   Anonymous ──login ok──▶ Authenticated(role) ──logout──▶ Anonymous
//!
//! A failed login never changes state. The in-memory session is the source of
//! truth; the durable copy is a cache read back only in `SessionManager::new`.

use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use tracing::{debug, info, warn};

use medichain_contracts::{
    error::{PortalError, PortalResult},
    session::{Role, Session},
};

use crate::{
    keys,
    traits::{CredentialDirectory, DurableStorage},
};

/// Artificial latency applied to every login attempt unless configured
/// otherwise.
pub const DEFAULT_LOGIN_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Default)]
struct SessionState {
    session: Option<Session>,
    /// User-facing message of the last failed login.
    error: Option<String>,
    /// True while a login is waiting on the artificial delay.
    loading: bool,
}

/// Owns the current session and its durable mirror.
///
/// Construct one per storage scope and share it behind an `Arc`. All methods
/// take `&self`; the state lock is never held across an await point.
pub struct SessionManager {
    storage: Arc<dyn DurableStorage>,
    directory: Arc<dyn CredentialDirectory>,
    login_delay: Duration,
    state: Mutex<SessionState>,
}

impl SessionManager {
    /// Create a manager and restore any session cached in `storage`.
    ///
    /// A missing, unreadable, or inconsistent durable record leaves the
    /// manager Anonymous.
    pub fn new(
        storage: Arc<dyn DurableStorage>,
        directory: Arc<dyn CredentialDirectory>,
        login_delay: Duration,
    ) -> Self {
        let session = restore_session(storage.as_ref());
        if let Some(session) = &session {
            info!(
                user_id = session.user_id,
                role = %session.role,
                session_id = %session.session_id.0,
                "restored session from durable storage"
            );
        }

        Self {
            storage,
            directory,
            login_delay,
            state: Mutex::new(SessionState {
                session,
                ..SessionState::default()
            }),
        }
    }

    /// Authenticate `email` / `password` against the `role` credential table.
    ///
    /// # Flow
    ///
    /// 1. Reject immediately with `LoginInProgress` if another login is pending
    /// 2. Clear the previous error and mark the manager as loading
    /// 3. Wait the configured artificial delay
    /// 4. Look for an exact email + password match in the role's table:
    ///    - no match → record "Invalid email or password", keep the session
    ///    - match → persist the sanitized session, then adopt it in memory
    ///
    /// # Errors
    ///
    /// `InvalidCredentials` on mismatch, `LoginInProgress` on overlap, and
    /// `Storage` if the durable copy cannot be written. In every error case the
    /// current session is left untouched.
    pub async fn login(&self, email: &str, password: &str, role: Role) -> PortalResult<Session> {
        let _pending = self.begin_login()?;

        debug!(email = %email, role = %role, delay_ms = self.login_delay.as_millis() as u64, "login attempt started");

        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let matched = self
            .directory
            .credentials(role)
            .iter()
            .find(|record| record.role == role && record.matches(email, password));

        let Some(record) = matched else {
            warn!(email = %email, role = %role, "login rejected: no matching credentials");
            return Err(self.fail(PortalError::InvalidCredentials));
        };

        let session = Session::from_credential(record);

        if let Err(e) = self.persist(&session) {
            warn!(error = %e, role = %role, "login aborted: session could not be persisted");
            return Err(self.fail(e));
        }

        self.state().session = Some(session.clone());

        info!(
            user_id = session.user_id,
            role = %session.role,
            session_id = %session.session_id.0,
            "login succeeded"
        );
        Ok(session)
    }

    /// Drop the session and its durable copy. Idempotent.
    ///
    /// Storage failures are logged and otherwise ignored: the in-memory state
    /// is always cleared.
    pub fn logout(&self) {
        let previous = self.state().session.take();

        for key in [keys::CURRENT_USER, keys::USER_TYPE] {
            if let Err(e) = self.storage.remove(key) {
                warn!(key = key, error = %e, "failed to remove durable session key");
            }
        }

        match previous {
            Some(session) => info!(
                user_id = session.user_id,
                role = %session.role,
                session_id = %session.session_id.0,
                "logged out"
            ),
            None => debug!("logout with no active session"),
        }
    }

    /// The current session, if any.
    pub fn current_session(&self) -> Option<Session> {
        self.state().session.clone()
    }

    /// The role of the current session, if any.
    pub fn current_role(&self) -> Option<Role> {
        self.state().session.as_ref().map(|s| s.role)
    }

    /// The user-facing message of the last failed login.
    pub fn last_error(&self) -> Option<String> {
        self.state().error.clone()
    }

    /// Forget the last error message.
    pub fn clear_error(&self) {
        self.state().error = None;
    }

    /// True while a login is waiting on the artificial delay.
    pub fn is_loading(&self) -> bool {
        self.state().loading
    }

    /// The configured artificial login delay.
    pub fn login_delay(&self) -> Duration {
        self.login_delay
    }

    /// Gate a role-specific view.
    ///
    /// Succeeds only when a session exists and was created under `required`.
    /// Callers send the user to the login screen on `AccessDenied`.
    pub fn authorize(&self, required: Role) -> PortalResult<Session> {
        match self.state().session.as_ref() {
            Some(session) if session.role == required => Ok(session.clone()),
            Some(session) => {
                debug!(have = %session.role, required = %required, "role mismatch for gated view");
                Err(PortalError::AccessDenied { required })
            }
            None => Err(PortalError::AccessDenied { required }),
        }
    }

    // ── Internals ────────────────────────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, SessionState> {
        // The state is plain data, so a panic elsewhere cannot leave it torn.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin_login(&self) -> PortalResult<PendingLogin<'_>> {
        let mut state = self.state();
        if state.loading {
            warn!("login rejected: another attempt is still pending");
            return Err(PortalError::LoginInProgress);
        }
        state.loading = true;
        state.error = None;
        Ok(PendingLogin { manager: self })
    }

    fn fail(&self, error: PortalError) -> PortalError {
        self.state().error = Some(error.user_message());
        error
    }

    /// Write the session record and its role tag.
    ///
    /// The two keys are separate writes. If the role tag cannot be written,
    /// the previous record is put back so the durable copy still matches the
    /// in-memory session.
    fn persist(&self, session: &Session) -> PortalResult<()> {
        let json = serde_json::to_string(session).map_err(|e| PortalError::Storage {
            reason: format!("failed to serialize session: {}", e),
        })?;
        let previous = self.storage.get(keys::CURRENT_USER).unwrap_or_else(|e| {
            warn!(error = %e, "previous durable session could not be read");
            None
        });

        self.storage.set(keys::CURRENT_USER, &json)?;
        if let Err(e) = self.storage.set(keys::USER_TYPE, session.role.as_str()) {
            self.roll_back_record(previous.as_deref());
            return Err(e);
        }
        Ok(())
    }

    fn roll_back_record(&self, previous: Option<&str>) {
        let restored = match previous {
            Some(record) => self.storage.set(keys::CURRENT_USER, record),
            None => self.storage.remove(keys::CURRENT_USER),
        };
        if let Err(e) = restored {
            // An absent record restores as Anonymous, never as the rejected user.
            warn!(error = %e, "durable session rollback failed, dropping the record");
            if let Err(e) = self.storage.remove(keys::CURRENT_USER) {
                warn!(error = %e, "durable session record could not be removed");
            }
        }
    }
}

/// Clears the loading flag when a login attempt ends, including when the
/// login future is dropped mid-delay.
struct PendingLogin<'a> {
    manager: &'a SessionManager,
}

impl Drop for PendingLogin<'_> {
    fn drop(&mut self) {
        self.manager.state().loading = false;
    }
}

/// Read the cached session back from `storage`.
///
/// Both keys must be present, the record must deserialize, and the role tag
/// must agree with the record's role.
fn restore_session(storage: &dyn DurableStorage) -> Option<Session> {
    let (record, tag) = match (storage.get(keys::CURRENT_USER), storage.get(keys::USER_TYPE)) {
        (Ok(Some(record)), Ok(Some(tag))) => (record, tag),
        (Ok(_), Ok(_)) => return None,
        (Err(e), _) | (_, Err(e)) => {
            warn!(error = %e, "durable session could not be read, starting anonymous");
            return None;
        }
    };

    let session: Session = match serde_json::from_str(&record) {
        Ok(session) => session,
        Err(e) => {
            warn!(error = %e, "durable session record is corrupt, starting anonymous");
            return None;
        }
    };

    match tag.parse::<Role>() {
        Ok(role) if role == session.role => Some(session),
        Ok(role) => {
            warn!(tag = %role, record_role = %session.role, "durable role tag disagrees with session record");
            None
        }
        Err(e) => {
            warn!(error = %e, "durable role tag is invalid, starting anonymous");
            None
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
