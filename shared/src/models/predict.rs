//! Prediction request/response wire types

use serde::{Deserialize, Serialize};

/// Default crop when the request omits one.
pub const DEFAULT_CROP: &str = "maize";

/// Request body for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictRequest {
    pub district: String,
    #[serde(default = "default_crop")]
    pub crop: String,
    /// Planting date as `YYYY-MM-DD`
    pub planting_date: String,
}

fn default_crop() -> String {
    DEFAULT_CROP.to_string()
}

/// Successful response body for `POST /predict`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldEstimate {
    pub status: String,
    pub district: String,
    pub crop: String,
    pub planting_date: String,
    /// Tonnes per hectare, rounded to 2 decimal places
    pub predicted_yield_t_ha: f64,
    pub message: String,
    pub note: String,
}

/// Error body shared by all failure responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Health check response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub model_loaded: bool,
}
