//! Umuhinzi Yield Prediction Service - Backend
//!
//! Predicts crop yield for Rwandan districts from a weather forecast window
//! and a pre-trained regression artifact.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;

pub use config::Config;

use external::weather::WeatherProvider;
use services::{AuthProvider, Predictor};

/// Application state shared across handlers
///
/// The model is the only shared value: loaded once before serving, read-only
/// afterwards. Everything else is request-scoped.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub model: Arc<dyn Predictor>,
    pub weather: Arc<dyn WeatherProvider>,
    pub auth: Arc<dyn AuthProvider>,
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .merge(routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Umuhinzi Yield Prediction API v1.0"
}
