//! Health check handler

use axum::Json;

use shared::models::HealthStatus;

/// Health check endpoint handler.
///
/// The body is fixed: a process that failed to load the model never starts
/// serving, so `model_loaded` is true whenever this handler is reachable.
/// The artifact itself is not probed.
pub async fn health_check() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "healthy".to_string(),
        model_loaded: true,
    })
}
