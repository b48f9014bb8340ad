//! API route handlers

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;

use super::server::SharedState;
use crate::auth::AuthError;
use crate::config::AuthMode;
use crate::error::Error;
use crate::session::{Session, SessionState};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Auth(AuthError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
            Error::Auth(AuthError::ConnectionError) | Error::Backend(_) | Error::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub state: SessionState,
    #[serde(flatten)]
    pub session: Session,
    pub mode: AuthMode,
}

// Health check

pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok("healthy"))
}

// Session

pub async fn session_info(State(state): State<SharedState>, jar: CookieJar) -> impl IntoResponse {
    let session = state.gate(jar).session();

    Json(ApiResponse::ok(SessionInfo {
        state: session.state(),
        session,
        mode: state.authenticator.mode(),
    }))
}
