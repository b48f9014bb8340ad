//! Shared helpers for integration tests: a stub ledger backend and a
//! dashboard server bound to an ephemeral port

#![allow(dead_code)]

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use gerencial::api::{create_router, AppState};
use gerencial::config::{AuthMode, Config};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

pub const REMOTE_EMAIL: &str = "ana@example.com";
pub const REMOTE_PASSWORD: &str = "segredo";

async fn clients() -> Json<Value> {
    Json(json!([
        { "id": "c1", "nome": "Maria Silva", "email": "maria@example.com", "telefone": "11 9999-0000" },
        { "id": "c2", "nome": "João Souza", "email": "joao@example.com", "telefone": "21 8888-0000" }
    ]))
}

async fn payables() -> Json<Value> {
    Json(json!([
        {
            "id": "p1",
            "status": "PENDENTE",
            "valor": 60.0,
            "descricao": "Aluguel",
            "data_vencimeto": "2024-02-10T00:00:00.000Z",
            "data_pagamento": null,
            "clienteId": "c2"
        }
    ]))
}

async fn receivables() -> Json<Value> {
    Json(json!([
        {
            "id": "r1",
            "status": "RECEBIDO",
            "valor": 100.0,
            "descricao": "Consultoria",
            "data_emissao": "2024-01-15T00:00:00.000Z",
            "data_recebimento": "2024-01-20T00:00:00.000Z",
            "clienteId": "c1"
        }
    ]))
}

async fn auth_login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if body["email"] == REMOTE_EMAIL && body["password"] == REMOTE_PASSWORD {
        (StatusCode::OK, Json(json!({ "token": "stub-token" })))
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Unauthorized" })),
        )
    }
}

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Listener has no address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Test server failed");
    });

    addr
}

/// Start a stub of the ledger backend and return its base URL
pub async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/clients", get(clients))
        .route("/cash-pay", get(payables))
        .route("/cash-receive", get(receivables))
        .route("/auth/login", post(auth_login));

    format!("http://{}", serve(app).await)
}

/// Config for a dashboard talking to `backend_url`
pub fn test_config(backend_url: &str, mode: AuthMode) -> Config {
    let mut config = Config::default();
    config.auth.mode = mode;
    config.backend.base_url = backend_url.to_string();
    config.backend.timeout_secs = 2;
    config.server.assets_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets");
    config
}

/// Start the dashboard and return its base URL
pub async fn spawn_dashboard(config: Config) -> String {
    let state = AppState::new(config).expect("Failed to build app state");
    let app = create_router(Arc::new(state));

    format!("http://{}", serve(app).await)
}

/// HTTP client that reports redirects instead of following them
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to build HTTP client")
}

/// All `Set-Cookie` values of a response
pub fn set_cookies(response: &reqwest::Response) -> Vec<String> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn location(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

/// POST an urlencoded login form
pub async fn post_login(
    client: &reqwest::Client,
    base: &str,
    username: &str,
    password: &str,
) -> reqwest::Response {
    client
        .post(format!("{}/login", base))
        .header(
            reqwest::header::CONTENT_TYPE,
            "application/x-www-form-urlencoded",
        )
        .body(format!(
            "username={}&password={}",
            urlencode(username),
            urlencode(password)
        ))
        .send()
        .await
        .expect("Login request failed")
}

fn urlencode(value: &str) -> String {
    value.replace('%', "%25").replace('@', "%40").replace('&', "%26").replace(' ', "+")
}
