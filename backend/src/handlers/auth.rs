//! Dashboard authentication handlers

use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap},
    Json,
};
use serde::Serialize;

use shared::models::{LoginRequest, SessionToken};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<SessionToken>> {
    let token = state.auth.login(&body.username, &body.password)?;
    Ok(Json(token))
}

#[derive(Serialize)]
pub struct SessionInfo {
    pub username: String,
    /// Unix timestamp of token expiry
    pub expires_at: i64,
}

/// Validate the current session token.
///
/// The dashboard calls this on reload to decide whether its stored token is
/// still usable.
pub async fn session_info(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<SessionInfo>> {
    let auth_header = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .unwrap_or_default();

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or(AppError::InvalidCredentials)?;

    let claims = state.auth.verify_session(token)?;
    Ok(Json(SessionInfo {
        username: claims.sub,
        expires_at: claims.exp,
    }))
}
