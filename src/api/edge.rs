//! Edge enforcement middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use super::server::SharedState;
use crate::session::Decision;

/// Redirect before any handler runs: anonymous requests go to the login
/// page, authenticated requests for the login page go to the landing path
pub async fn edge_guard(State(state): State<SharedState>, req: Request, next: Next) -> Response {
    let decision = state
        .gate(CookieJar::from_headers(req.headers()))
        .guard(&state.edge_policy, req.uri().path());

    match decision {
        Decision::Allow => next.run(req).await,
        Decision::RedirectTo(target) => Redirect::to(&target).into_response(),
    }
}
