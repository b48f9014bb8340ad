//! Route protection policies
//!
//! Access is checked at two points: at the edge, before a page handler runs,
//! and inside the page render. Both read the same session but answer the
//! login path differently. The edge sends an authenticated session away from
//! the login page; the render guard always shows the login form.

use serde::Serialize;

/// Prefixes the edge never intercepts
const EDGE_EXEMPT_PREFIXES: &[&str] = &["/assets/"];

/// Exact paths the edge never intercepts
const EDGE_EXEMPT_PATHS: &[&str] = &["/favicon.ico", "/api/health"];

/// The two paths every decision can point at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Routes {
    pub login_path: String,
    pub default_path: String,
}

impl Routes {
    pub fn new(login_path: impl Into<String>, default_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            default_path: default_path.into(),
        }
    }

    /// The login view, including its sub-paths such as password recovery
    pub fn is_login(&self, path: &str) -> bool {
        path.strip_prefix(self.login_path.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    }
}

impl Default for Routes {
    fn default() -> Self {
        Self::new("/login", "/clients")
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "target", rename_all = "snake_case")]
pub enum Decision {
    Allow,
    RedirectTo(String),
}

impl Decision {
    pub fn is_allow(&self) -> bool {
        matches!(self, Decision::Allow)
    }

    pub fn target(&self) -> Option<&str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectTo(target) => Some(target),
        }
    }
}

/// A pure access decision over `(authenticated, path)`
pub trait GuardPolicy {
    /// Short name used in logs and CLI output
    fn name(&self) -> &'static str;

    fn decide(&self, authenticated: bool, path: &str) -> Decision;
}

/// Request-level enforcement, applied before any page renders
#[derive(Debug, Clone)]
pub struct EdgeGuardPolicy {
    routes: Routes,
}

impl EdgeGuardPolicy {
    pub fn new(routes: Routes) -> Self {
        Self { routes }
    }

    /// Static assets and the health probe bypass the edge
    pub fn is_exempt(path: &str) -> bool {
        EDGE_EXEMPT_PATHS.contains(&path)
            || EDGE_EXEMPT_PREFIXES
                .iter()
                .any(|prefix| path.starts_with(prefix))
    }
}

impl GuardPolicy for EdgeGuardPolicy {
    fn name(&self) -> &'static str {
        "edge"
    }

    fn decide(&self, authenticated: bool, path: &str) -> Decision {
        if Self::is_exempt(path) {
            return Decision::Allow;
        }

        match (authenticated, self.routes.is_login(path)) {
            (false, false) => Decision::RedirectTo(self.routes.login_path.clone()),
            (true, true) => Decision::RedirectTo(self.routes.default_path.clone()),
            _ => Decision::Allow,
        }
    }
}

/// Component-level enforcement, applied while rendering a page
#[derive(Debug, Clone)]
pub struct RenderGuardPolicy {
    routes: Routes,
}

impl RenderGuardPolicy {
    pub fn new(routes: Routes) -> Self {
        Self { routes }
    }
}

impl GuardPolicy for RenderGuardPolicy {
    fn name(&self) -> &'static str {
        "render"
    }

    fn decide(&self, authenticated: bool, path: &str) -> Decision {
        if self.routes.is_login(path) || authenticated {
            Decision::Allow
        } else {
            Decision::RedirectTo(self.routes.login_path.clone())
        }
    }
}
