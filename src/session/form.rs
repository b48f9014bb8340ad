//! Login form state

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use super::gate::SessionGate;
use super::models::Session;
use super::store::SessionStore;
use crate::auth::{AuthError, Credentials};

/// Result of a form submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    LoggedIn(Session),
    Rejected(AuthError),
    /// A submission was already in flight; nothing was sent
    Busy,
}

/// Pending indicator and error message of the login form
#[derive(Debug, Default)]
pub struct LoginForm {
    pending: AtomicBool,
    error: Mutex<Option<String>>,
}

/// Clears the pending flag however the submission ends, including when the
/// future is dropped
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::SeqCst)
    }

    /// User-facing message of the last failed submission
    pub fn error(&self) -> Option<String> {
        self.error
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub async fn submit<S: SessionStore>(
        &self,
        gate: &SessionGate<S>,
        credentials: &Credentials,
    ) -> SubmitOutcome {
        if self.pending.swap(true, Ordering::SeqCst) {
            return SubmitOutcome::Busy;
        }
        let _pending = PendingGuard(&self.pending);
        self.set_error(None);

        match gate.login(credentials).await {
            Ok(session) => SubmitOutcome::LoggedIn(session),
            Err(e) => {
                self.set_error(Some(e.to_string()));
                SubmitOutcome::Rejected(e)
            }
        }
    }

    fn set_error(&self, message: Option<String>) {
        *self.error.lock().unwrap_or_else(PoisonError::into_inner) = message;
    }
}
