//! CLI command implementations

use anyhow::Result;
use std::fs;
use std::sync::Arc;

use crate::auth::{AuthError, Authenticator, Credentials};
use crate::cli::{
    error, format_decision, info, print_decision_table, success, warn, DecisionRow, GuardLayer,
    OutputFormat,
};
use crate::config::{self, Config};
use crate::session::{
    EdgeGuardPolicy, GuardPolicy, LoginForm, MemorySessionStore, RenderGuardPolicy, Routes,
    SessionGate, SessionState, SubmitOutcome,
};

/// Pages listed by `gerencial routes`, besides the login and landing paths
const KNOWN_PAGES: &[&str] = &[
    "/",
    "/clients",
    "/payaccounts",
    "/receiveaccounts",
    "/financial",
    "/balance",
    "/assets/app.css",
];

/// Initialize a new gerencial.toml configuration file
pub async fn init() -> Result<()> {
    let config_path = std::path::Path::new(config::loader::CONFIG_FILENAME);

    if config_path.exists() {
        warn("gerencial.toml already exists");
        return Ok(());
    }

    let content = config::loader::default_config_content();
    fs::write(config_path, content)?;

    success("Created gerencial.toml");
    info("Edit the configuration file and run 'gerencial serve' to start the dashboard");

    Ok(())
}

/// Start the dashboard server
pub async fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let config = load_config()?;
    let host = host.unwrap_or_else(|| config.server.host.clone());
    let port = port.unwrap_or(config.server.port);

    info(&format!("Starting server at http://{}:{}", host, port));

    crate::api::run_server(config, &host, port).await?;
    Ok(())
}

/// Show how the guards decide a single path
pub async fn guard(path: &str, authenticated: bool, layer: GuardLayer) -> Result<()> {
    let config = load_config()?;
    let routes = config.auth.routes();

    let policies: Vec<Box<dyn GuardPolicy>> = match layer {
        GuardLayer::Edge => vec![Box::new(EdgeGuardPolicy::new(routes))],
        GuardLayer::Render => vec![Box::new(RenderGuardPolicy::new(routes))],
        GuardLayer::Both => vec![
            Box::new(EdgeGuardPolicy::new(routes.clone())),
            Box::new(RenderGuardPolicy::new(routes)),
        ],
    };

    let state = if authenticated {
        SessionState::Authenticated
    } else {
        SessionState::Anonymous
    };
    info(&format!("{} ({})", path, state));

    for policy in policies {
        let decision = policy.decide(authenticated, path);
        println!("  {:<7} {}", policy.name(), format_decision(&decision));
    }

    Ok(())
}

/// Every known page under both session states, through both guards
pub fn decision_matrix(routes: &Routes) -> Vec<DecisionRow> {
    let edge = EdgeGuardPolicy::new(routes.clone());
    let render = RenderGuardPolicy::new(routes.clone());

    let mut paths: Vec<&str> = vec![routes.login_path.as_str()];
    if !KNOWN_PAGES.contains(&routes.default_path.as_str()) {
        paths.push(routes.default_path.as_str());
    }
    paths.extend(KNOWN_PAGES.iter().copied());

    paths
        .into_iter()
        .flat_map(|path| {
            [SessionState::Anonymous, SessionState::Authenticated]
                .into_iter()
                .map(|session| {
                    let authenticated = session == SessionState::Authenticated;
                    DecisionRow {
                        path: path.to_string(),
                        session,
                        edge: edge.decide(authenticated, path),
                        render: render.decide(authenticated, path),
                    }
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Print the decision matrix
pub async fn routes(format: OutputFormat) -> Result<()> {
    let config = load_config()?;
    let rows = decision_matrix(&config.auth.routes());

    match format {
        OutputFormat::Table => print_decision_table(&rows),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&rows)?),
    }

    Ok(())
}

/// Check credentials against the configured authenticator
pub async fn login(username: &str, password: &str) -> Result<()> {
    let config = load_config()?;
    let authenticator = Authenticator::from_config(&config.auth, &config.backend)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    info(&format!("Checking credentials ({:?} mode)", authenticator.mode()));

    let gate = SessionGate::new(
        MemorySessionStore::new(),
        Arc::new(authenticator),
        config.auth.routes(),
    );
    let form = LoginForm::new();

    match form.submit(&gate, &Credentials::new(username, password)).await {
        SubmitOutcome::LoggedIn(_) => {
            success(&format!("Credentials accepted for '{}'", username));
            Ok(())
        }
        SubmitOutcome::Rejected(e) => {
            let message = form.error().unwrap_or_else(|| e.to_string());
            error(&message);
            match e {
                AuthError::InvalidCredentials => Err(anyhow::anyhow!("invalid credentials")),
                AuthError::ConnectionError => Err(anyhow::anyhow!("could not reach the backend")),
            }
        }
        SubmitOutcome::Busy => Err(anyhow::anyhow!("a login is already in progress")),
    }
}

fn load_config() -> Result<Config> {
    config::load_config().map_err(|e| anyhow::anyhow!("{}", e))
}
