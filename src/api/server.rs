//! HTTP server

use axum::{
    middleware,
    routing::get,
    Router,
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::auth::Authenticator;
use crate::backend::BackendClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::{
    CookieSessionStore, CookieSettings, EdgeGuardPolicy, RenderGuardPolicy, SessionGate,
};
use crate::ui::{self, Templates};

use super::{edge, routes};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub authenticator: Arc<Authenticator>,
    pub backend: BackendClient,
    pub templates: Templates,
    pub edge_policy: EdgeGuardPolicy,
    pub render_policy: RenderGuardPolicy,
    cookies: CookieSettings,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let authenticator = Authenticator::from_config(&config.auth, &config.backend)?;
        let backend = BackendClient::new(config.backend.clone())?;
        let routes = config.auth.routes();

        Ok(Self {
            authenticator: Arc::new(authenticator),
            backend,
            templates: Templates::new()?,
            edge_policy: EdgeGuardPolicy::new(routes.clone()),
            render_policy: RenderGuardPolicy::new(routes),
            cookies: CookieSettings::from_config(&config.auth),
            config,
        })
    }

    /// A gate over the session carried by this request's cookies
    pub fn gate(&self, jar: CookieJar) -> SessionGate<CookieSessionStore> {
        SessionGate::new(
            CookieSessionStore::new(jar, self.cookies.clone()),
            Arc::clone(&self.authenticator),
            self.config.auth.routes(),
        )
    }
}

/// Run the HTTP server
pub async fn run_server(config: Config, host: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(config)?);

    tracing::info!(
        "Auth mode: {:?}, backend: {}",
        state.authenticator.mode(),
        state.backend.config().base_url
    );

    let app = create_router(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: SharedState) -> Router {
    let assets = ServeDir::new(&state.config.server.assets_dir);

    Router::new()
        // API routes
        .route("/api/health", get(routes::health))
        .route("/api/session", get(routes::session_info))
        // Session routes
        .route("/login", get(ui::login_page).post(ui::login_submit))
        .route(
            "/login/forgot",
            get(ui::forgot_page).post(ui::forgot_password),
        )
        .route("/logout", get(ui::logout).post(ui::logout))
        // UI routes
        .route("/", get(ui::home))
        .route("/clients", get(ui::clients))
        .route("/payaccounts", get(ui::payables))
        .route("/receiveaccounts", get(ui::receivables))
        .route("/financial", get(ui::financial))
        .route("/balance", get(ui::balance))
        .nest_service("/assets", assets)
        // Middleware
        .layer(middleware::from_fn_with_state(state.clone(), edge::edge_guard))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
