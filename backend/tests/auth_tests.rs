//! Dashboard authentication tests
//!
//! The login endpoint issues a session token from configuration-sourced
//! credentials; the session endpoint validates it.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header::AUTHORIZATION, header::CONTENT_TYPE, Request, StatusCode};
use chrono::NaiveDate;
use tower::util::ServiceExt;

use shared::types::GeoPoint;
use umuhinzi_backend::config::{
    AuthConfig, Config, ModelConfig, ServerConfig, VegetationConfig, WeatherConfig,
};
use umuhinzi_backend::external::weather::{WeatherProvider, WeatherTable};
use umuhinzi_backend::services::features::FeatureVector;
use umuhinzi_backend::services::{ConfigAuthProvider, Predictor};
use umuhinzi_backend::{create_app, AppState};

struct NoWeather;

#[async_trait]
impl WeatherProvider for NoWeather {
    async fn daily(&self, _point: GeoPoint, _start: NaiveDate, _end: NaiveDate) -> WeatherTable {
        Vec::new()
    }
}

struct NoPredictor;

impl Predictor for NoPredictor {
    fn predict(&self, _features: &FeatureVector) -> f64 {
        0.0
    }
}

fn test_app() -> axum::Router {
    let config = Config {
        environment: "test".to_string(),
        server: ServerConfig {
            port: 0,
            host: "127.0.0.1".to_string(),
        },
        model: ModelConfig {
            path: "unused".to_string(),
        },
        weather: WeatherConfig {
            archive_url: "http://127.0.0.1:9/archive".to_string(),
            forecast_url: "http://127.0.0.1:9/forecast".to_string(),
            timezone: "Africa/Kigali".to_string(),
            timeout_secs: 1,
        },
        vegetation: VegetationConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            product: "MODIS/006/MOD13Q1".to_string(),
            buffer_meters: 5000.0,
            scale_meters: 250.0,
            max_pixels: 1_000_000_000,
            historical_ndvi_proxy: 0.55,
            timeout_secs: 1,
        },
        auth: AuthConfig {
            username: "farmer".to_string(),
            password_hash: bcrypt::hash("password123", 4).unwrap(),
            token_secret: "test-secret".to_string(),
            token_expiry: 3600,
        },
    };

    let state = AppState {
        auth: Arc::new(ConfigAuthProvider::new(&config.auth)),
        config: Arc::new(config),
        model: Arc::new(NoPredictor),
        weather: Arc::new(NoWeather),
    };
    create_app(state)
}

async fn login(app: axum::Router, username: &str, password: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/login")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::json!({"username": username, "password": password}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn login_issues_session_token() {
    let (status, body) = login(test_app(), "farmer", "password123").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 3600);
    assert!(!body["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_token_passes_session_check() {
    let app = test_app();
    let (_, body) = login(app.clone(), "farmer", "password123").await;
    let token = body["access_token"].as_str().unwrap().to_string();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/session")
                .header(AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["username"], "farmer");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (status, body) = login(test_app(), "farmer", "wrong").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Invalid username or password"));
}

#[tokio::test]
async fn missing_bearer_header_is_unauthorized() {
    let response = test_app()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/session")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
