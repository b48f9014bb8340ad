//! The session gate

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::guard::{Decision, GuardPolicy, Routes};
use super::models::Session;
use super::store::SessionStore;
use crate::auth::{AuthError, Authenticator, Credentials};

/// Where the user is sent after an operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub to: String,
}

/// Login, logout and access decisions over an injected [`SessionStore`]
///
/// The store is authoritative. The gate keeps a mirrored flag so a view can
/// read the last known state cheaply; [`SessionGate::refresh`] resyncs it and
/// runs on construction.
pub struct SessionGate<S> {
    store: S,
    authenticator: Arc<Authenticator>,
    routes: Routes,
    mirrored: AtomicBool,
}

impl<S: SessionStore> SessionGate<S> {
    pub fn new(store: S, authenticator: Arc<Authenticator>, routes: Routes) -> Self {
        let gate = Self {
            store,
            authenticator,
            routes,
            mirrored: AtomicBool::new(false),
        };
        gate.refresh();
        gate
    }

    /// Read the marker. No side effects.
    pub fn is_authenticated(&self) -> bool {
        self.store.get().authenticated
    }

    pub fn session(&self) -> Session {
        self.store.get()
    }

    /// Last known state, as of the latest refresh/login/logout
    pub fn mirrored(&self) -> bool {
        self.mirrored.load(Ordering::SeqCst)
    }

    /// Resync the mirrored flag with the marker
    pub fn refresh(&self) -> bool {
        let authenticated = self.is_authenticated();
        self.mirrored.store(authenticated, Ordering::SeqCst);
        authenticated
    }

    /// Validate credentials and, on success, write the marker.
    /// A rejected login leaves the store untouched.
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, AuthError> {
        if let Err(e) = self.authenticator.verify(credentials).await {
            tracing::warn!("Login rejected for '{}': {}", credentials.identifier, e);
            return Err(e);
        }

        let mut session = self.store.get();
        session.authenticated = true;
        self.store.set(&session);
        self.mirrored.store(true, Ordering::SeqCst);

        tracing::info!("User '{}' logged in", credentials.identifier);
        Ok(session)
    }

    /// Clear the marker and send the user to the login view. Always succeeds.
    pub fn logout(&self) -> Navigation {
        if self.is_authenticated() {
            tracing::info!("Session logged out");
        }
        self.store.clear();
        self.mirrored.store(false, Ordering::SeqCst);

        Navigation {
            to: self.routes.login_path.clone(),
        }
    }

    /// Ask a policy about `path` for the current session
    pub fn guard(&self, policy: &impl GuardPolicy, path: &str) -> Decision {
        let decision = policy.decide(self.is_authenticated(), path);
        tracing::debug!("{} guard on {}: {:?}", policy.name(), path, decision);
        decision
    }

    /// Remember `path` so that `/` can restore it after a reload
    pub fn remember_route(&self, path: &str) {
        if !self.is_restorable(path) {
            return;
        }

        let mut session = self.store.get();
        if !session.authenticated || session.last_route.as_deref() == Some(path) {
            return;
        }
        session.last_route = Some(path.to_string());
        self.store.set(&session);
    }

    /// Where `/` should navigate: the remembered route, or the landing path
    pub fn restore_route(&self) -> String {
        self.store
            .get()
            .last_route
            .filter(|route| self.is_restorable(route))
            .unwrap_or_else(|| self.routes.default_path.clone())
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    /// Give back the store, e.g. to send its cookies with a response
    pub fn into_store(self) -> S {
        self.store
    }

    /// Only local app paths: a single leading `/`, no scheme or authority
    fn is_restorable(&self, path: &str) -> bool {
        path.starts_with('/')
            && !path.starts_with("//")
            && !path.contains(['\\', ':'])
            && path != "/"
            && !self.routes.is_login(path)
    }
}
