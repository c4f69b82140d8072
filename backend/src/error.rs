//! Error handling for the Umuhinzi yield prediction service
//!
//! Every failure surfaces as `{"detail": "..."}` with an HTTP status.
//! Client input problems map to 400, upstream data outages to 502,
//! everything unclassified to a generic 500 with minimal detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use shared::models::ErrorBody;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client input errors
    #[error("{0}")]
    InvalidPlantingDate(String),

    #[error("Unknown district: {0}")]
    UnknownDistrict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    // Authentication errors
    #[error("Invalid credentials")]
    InvalidCredentials,

    // External service errors
    #[error("No weather data available for {0}")]
    UpstreamUnavailable(String),

    // Feature derivation errors
    #[error("No data for window: {0}")]
    NoData(String),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::InvalidPlantingDate(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnknownDistrict(district) => (
                StatusCode::BAD_REQUEST,
                format!("Unknown district: {}", district),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            ),
            AppError::UpstreamUnavailable(what) => (
                StatusCode::BAD_GATEWAY,
                format!("No weather data available for {}", what),
            ),
            AppError::NoData(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", msg))
            }
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", msg))
            }
            AppError::InternalError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error: internal server error".to_string(),
            ),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorBody { detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
