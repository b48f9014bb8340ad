//! Session marker storage
//!
//! The marker is the single source of truth for whether a session is
//! authenticated. [`MemorySessionStore`] keeps it process-wide;
//! [`CookieSessionStore`] keeps it in the request's cookies and collects the
//! changes that must be sent back with the response.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::{Arc, PoisonError, RwLock};

use super::Session;
use crate::config::AuthConfig;

/// Cookie holding the last visited path
pub const LAST_ROUTE_COOKIE: &str = "last_route";

/// Value of the marker for an authenticated session
const MARKER_VALUE: &str = "true";

/// Read/write access to the session marker
pub trait SessionStore: Send + Sync {
    /// Read the current session
    fn get(&self) -> Session;

    /// Persist a session, replacing the current one
    fn set(&self, session: &Session);

    /// Drop the marker. The remembered route survives.
    fn clear(&self);
}

impl<S: SessionStore + ?Sized> SessionStore for Arc<S> {
    fn get(&self) -> Session {
        (**self).get()
    }

    fn set(&self, session: &Session) {
        (**self).set(session)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

/// In-memory session storage shared by clones
#[derive(Debug, Default, Clone)]
pub struct MemorySessionStore {
    session: Arc<RwLock<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with an existing session, e.g. one changed out-of-band
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(RwLock::new(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> Session {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set(&self, session: &Session) {
        *self.session.write().unwrap_or_else(PoisonError::into_inner) = session.clone();
    }

    fn clear(&self) {
        self.session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .authenticated = false;
    }
}

/// Attributes applied to the cookies the store writes
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub marker_name: String,
    pub secure: bool,
}

impl CookieSettings {
    pub fn from_config(auth: &AuthConfig) -> Self {
        Self {
            marker_name: auth.cookie_name.clone(),
            secure: auth.secure_cookie,
        }
    }
}

impl Default for CookieSettings {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

/// Cookie-backed session storage for a single request
#[derive(Debug)]
pub struct CookieSessionStore {
    jar: RwLock<CookieJar>,
    settings: CookieSettings,
}

impl CookieSessionStore {
    pub fn new(jar: CookieJar, settings: CookieSettings) -> Self {
        Self {
            jar: RwLock::new(jar),
            settings,
        }
    }

    /// The jar including every change made through this store, ready to be
    /// returned as part of a response
    pub fn into_jar(self) -> CookieJar {
        self.jar.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    fn build_cookie(&self, name: String, value: String) -> Cookie<'static> {
        Cookie::build((name, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.settings.secure)
            .build()
    }

    fn update(&self, f: impl FnOnce(CookieJar) -> CookieJar) {
        let mut jar = self.jar.write().unwrap_or_else(PoisonError::into_inner);
        *jar = f(jar.clone());
    }
}

impl SessionStore for CookieSessionStore {
    fn get(&self) -> Session {
        let jar = self.jar.read().unwrap_or_else(PoisonError::into_inner);
        let authenticated = jar
            .get(&self.settings.marker_name)
            .is_some_and(|cookie| cookie.value() == MARKER_VALUE);
        let last_route = jar
            .get(LAST_ROUTE_COOKIE)
            .map(|cookie| cookie.value().to_string())
            .filter(|route| !route.is_empty());

        Session {
            authenticated,
            last_route,
        }
    }

    fn set(&self, session: &Session) {
        let marker = self.settings.marker_name.clone();
        let marker_cookie = self.build_cookie(marker.clone(), MARKER_VALUE.to_string());
        let route_cookie = session
            .last_route
            .clone()
            .map(|route| self.build_cookie(LAST_ROUTE_COOKIE.to_string(), route));

        self.update(|jar| {
            let jar = if session.authenticated {
                jar.add(marker_cookie)
            } else {
                jar.remove(Cookie::build(marker).path("/"))
            };
            match route_cookie {
                Some(cookie) => jar.add(cookie),
                None => jar.remove(Cookie::build(LAST_ROUTE_COOKIE).path("/")),
            }
        });
    }

    fn clear(&self) {
        let marker = self.settings.marker_name.clone();
        self.update(|jar| jar.remove(Cookie::build(marker).path("/")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, HeaderMap, HeaderValue};

    fn jar_with(cookie: &'static str) -> CookieJar {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static(cookie));
        CookieJar::from_headers(&headers)
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemorySessionStore::new();
        assert!(!store.get().authenticated);

        store.set(&Session::authenticated());
        assert!(store.get().authenticated);

        store.clear();
        assert!(!store.get().authenticated);
    }

    #[test]
    fn test_memory_store_clear_keeps_route() {
        let store = MemorySessionStore::with_session(Session {
            authenticated: true,
            last_route: Some("/balance".to_string()),
        });
        store.clear();
        assert_eq!(store.get().last_route.as_deref(), Some("/balance"));
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemorySessionStore::new();
        let other = store.clone();
        store.set(&Session::authenticated());
        assert!(other.get().authenticated);
    }

    #[test]
    fn test_cookie_store_reads_marker() {
        let store = CookieSessionStore::new(jar_with("auth=true"), CookieSettings::default());
        assert!(store.get().authenticated);
    }

    #[test]
    fn test_cookie_store_non_true_marker_is_anonymous() {
        let store = CookieSessionStore::new(jar_with("auth=false"), CookieSettings::default());
        assert!(!store.get().authenticated);

        let store = CookieSessionStore::new(jar_with("other=true"), CookieSettings::default());
        assert!(!store.get().authenticated);
    }

    #[test]
    fn test_cookie_store_reads_last_route() {
        let store = CookieSessionStore::new(
            jar_with("auth=true; last_route=/financial"),
            CookieSettings::default(),
        );
        assert_eq!(store.get().last_route.as_deref(), Some("/financial"));
    }

    #[test]
    fn test_cookie_store_set_and_clear() {
        let store = CookieSessionStore::new(CookieJar::new(), CookieSettings::default());
        store.set(&Session::authenticated());
        assert!(store.get().authenticated);

        store.clear();
        assert!(!store.get().authenticated);

        let jar = store.into_jar();
        assert!(jar.get("auth").is_none());
    }

    #[test]
    fn test_cookie_store_custom_marker_name() {
        let settings = CookieSettings {
            marker_name: "gerencial_session".to_string(),
            secure: true,
        };
        let store = CookieSessionStore::new(CookieJar::new(), settings);
        store.set(&Session::authenticated());

        let jar = store.into_jar();
        let cookie = jar.get("gerencial_session").unwrap();
        assert_eq!(cookie.value(), "true");
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.http_only(), Some(true));
    }
}
