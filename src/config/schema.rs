//! Configuration schema definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::session::Routes;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub backend: BackendConfig,
}

/// Server configuration for the HTTP dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served under `/assets`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("./assets")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
        }
    }
}

/// How credentials are checked on login
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Compare against the fixed `username`/`password` pair
    #[default]
    Offline,
    /// Ask the backend's `/auth/login` endpoint
    Remote,
}

/// Session gate configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub mode: AuthMode,

    #[serde(default = "default_username")]
    pub username: String,

    #[serde(default = "default_password")]
    pub password: String,

    /// Name of the session marker cookie
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    #[serde(default = "default_login_path")]
    pub login_path: String,

    /// Landing path for authenticated sessions
    #[serde(default = "default_default_path")]
    pub default_path: String,

    /// Mark cookies `Secure` (only sent over https)
    #[serde(default)]
    pub secure_cookie: bool,
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "1234".to_string()
}

fn default_cookie_name() -> String {
    "auth".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_default_path() -> String {
    "/clients".to_string()
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            mode: AuthMode::default(),
            username: default_username(),
            password: default_password(),
            cookie_name: default_cookie_name(),
            login_path: default_login_path(),
            default_path: default_default_path(),
            secure_cookie: false,
        }
    }
}

impl AuthConfig {
    /// Login and landing paths as used by the guard policies
    pub fn routes(&self) -> Routes {
        Routes::new(&self.login_path, &self.default_path)
    }
}

/// External REST backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
