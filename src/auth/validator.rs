//! Credential validation

use std::time::Duration;
use thiserror::Error;

use super::models::{Credentials, RemoteLoginBody};
use crate::config::{AuthConfig, AuthMode, BackendConfig};
use crate::error::Result;

/// Login failures. Both are recoverable: the user retries.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Usuário ou senha inválidos")]
    InvalidCredentials,

    #[error("Erro ao conectar com o servidor")]
    ConnectionError,
}

/// Checks credentials, either against a fixed local pair or the backend
#[derive(Debug, Clone)]
pub enum Authenticator {
    Offline { username: String, password: String },
    Remote(RemoteValidator),
}

impl Authenticator {
    pub fn offline(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Offline {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn remote(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self::Remote(RemoteValidator::new(base_url, timeout)?))
    }

    pub fn from_config(auth: &AuthConfig, backend: &BackendConfig) -> Result<Self> {
        match auth.mode {
            AuthMode::Offline => Ok(Self::offline(&auth.username, &auth.password)),
            AuthMode::Remote => Self::remote(
                &backend.base_url,
                Duration::from_secs(backend.timeout_secs),
            ),
        }
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Authenticator::Offline { .. } => AuthMode::Offline,
            Authenticator::Remote(_) => AuthMode::Remote,
        }
    }

    /// Verify credentials without touching any session state
    pub async fn verify(&self, credentials: &Credentials) -> std::result::Result<(), AuthError> {
        match self {
            Authenticator::Offline { username, password } => {
                if credentials.identifier == *username && credentials.secret == *password {
                    Ok(())
                } else {
                    Err(AuthError::InvalidCredentials)
                }
            }
            Authenticator::Remote(remote) => remote.verify(credentials).await,
        }
    }
}

/// Posts credentials to the backend's `/auth/login`
#[derive(Debug, Clone)]
pub struct RemoteValidator {
    client: reqwest::Client,
    login_url: String,
}

impl RemoteValidator {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            login_url: format!("{}/auth/login", base_url.trim_end_matches('/')),
        })
    }

    pub fn login_url(&self) -> &str {
        &self.login_url
    }

    /// Any non-2xx answer counts as rejected credentials; only a transport
    /// failure is a connection error
    pub async fn verify(&self, credentials: &Credentials) -> std::result::Result<(), AuthError> {
        let response = self
            .client
            .post(&self.login_url)
            .json(&RemoteLoginBody::from(credentials))
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Login request to {} failed: {}", self.login_url, e);
                AuthError::ConnectionError
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            tracing::debug!("Backend rejected login with {}", response.status());
            Err(AuthError::InvalidCredentials)
        }
    }
}
