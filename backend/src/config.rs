//! Configuration management for the Umuhinzi yield prediction service
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with UMUHINZI_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Model artifact configuration
    pub model: ModelConfig,

    /// Weather API configuration
    pub weather: WeatherConfig,

    /// Vegetation-index backend configuration
    pub vegetation: VegetationConfig,

    /// Dashboard authentication configuration
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// Path to the trained yield model artifact
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Base URL of the historical daily weather archive
    pub archive_url: String,

    /// Base URL of the daily weather forecast endpoint
    pub forecast_url: String,

    /// Reporting timezone for daily aggregates
    pub timezone: String,

    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct VegetationConfig {
    /// Base URL of the satellite-imagery analytics backend
    pub api_url: String,

    /// Vegetation-index product name
    pub product: String,

    /// Buffer radius around the district center, meters
    pub buffer_meters: f64,

    /// Reduction scale, meters per pixel
    pub scale_meters: f64,

    /// Pixel budget for the spatial mean reduction
    pub max_pixels: u64,

    /// Historical NDVI mean used as a proxy for forecast windows
    pub historical_ndvi_proxy: f64,

    /// Outbound request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Dashboard account name
    pub username: String,

    /// bcrypt hash of the dashboard account password
    pub password_hash: String,

    /// Secret key for signing session tokens
    pub token_secret: String,

    /// Session token expiry in seconds
    pub token_expiry: i64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("UMUHINZI_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 8000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("model.path", "model/crop_yield_model.json")?
            .set_default("weather.archive_url", "https://archive-api.open-meteo.com/v1/archive")?
            .set_default("weather.forecast_url", "https://api.open-meteo.com/v1/forecast")?
            .set_default("weather.timezone", "Africa/Kigali")?
            .set_default("weather.timeout_secs", 10)?
            .set_default("vegetation.api_url", "https://imagery.example.com/v1")?
            .set_default("vegetation.product", "MODIS/006/MOD13Q1")?
            .set_default("vegetation.buffer_meters", 5000.0)?
            .set_default("vegetation.scale_meters", 250.0)?
            .set_default("vegetation.max_pixels", 1_000_000_000u64)?
            .set_default("vegetation.historical_ndvi_proxy", 0.55)?
            .set_default("vegetation.timeout_secs", 15)?
            .set_default("auth.username", "farmer")?
            // bcrypt hash of the development password; production supplies
            // UMUHINZI__AUTH__PASSWORD_HASH
            .set_default(
                "auth.password_hash",
                "$2b$12$35dSRNrq9fbKDKBzXxZsseGYOczvsf4my4A9Vu7uET5/.UM3EPbK.",
            )?
            .set_default("auth.token_secret", "development-secret-key")?
            .set_default("auth.token_expiry", 3600)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (UMUHINZI_ prefix)
            .add_source(
                Environment::with_prefix("UMUHINZI")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            host: "0.0.0.0".to_string(),
        }
    }
}
