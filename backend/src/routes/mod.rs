//! Route definitions for the Umuhinzi yield prediction service

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public; fixed body)
        .route("/health", get(handlers::health_check))
        // Yield prediction
        .route("/predict", post(handlers::predict_yield))
        // Dashboard session endpoints
        .nest("/auth", auth_routes())
}

/// Authentication routes for the dashboard session
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::login))
        .route("/session", get(handlers::session_info))
}
