//! Session model

use serde::Serialize;
use std::fmt;

/// The two states a session can be in. There is no expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    Anonymous,
    Authenticated,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Anonymous => write!(f, "anonymous"),
            SessionState::Authenticated => write!(f, "authenticated"),
        }
    }
}

/// Session as read from the session marker
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Session {
    /// Whether the marker denotes an authenticated session
    pub authenticated: bool,
    /// Last visited path, used to restore navigation
    pub last_route: Option<String>,
}

impl Session {
    /// A session with no marker
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A freshly logged-in session
    pub fn authenticated() -> Self {
        Self {
            authenticated: true,
            last_route: None,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.authenticated {
            SessionState::Authenticated
        } else {
            SessionState::Anonymous
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_state() {
        assert_eq!(Session::anonymous().state(), SessionState::Anonymous);
        assert_eq!(Session::authenticated().state(), SessionState::Authenticated);
        assert_eq!(SessionState::Authenticated.to_string(), "authenticated");
    }
}
