//! Prediction orchestration
//!
//! Per request: validate input, resolve the district to a coordinate, fetch
//! the forecast window, derive features, run the model, format the
//! response. Every external call is attempted exactly once; there is no
//! retry or partial response.

use std::sync::Arc;

use chrono::{Duration, Utc};

use shared::districts::district_center;
use shared::models::{PredictRequest, YieldEstimate};
use shared::validation::{parse_planting_date, validate_crop, validate_not_future};

use crate::error::{AppError, AppResult};
use crate::external::weather::WeatherProvider;
use crate::services::features::derive_forecast_features;
use crate::services::predictor::Predictor;

/// Trailing feature window ending at the planting date, days
const FORECAST_WINDOW_DAYS: i64 = 90;

/// Per-request prediction pipeline over injected capabilities
#[derive(Clone)]
pub struct PredictionService {
    weather: Arc<dyn WeatherProvider>,
    model: Arc<dyn Predictor>,
    ndvi_proxy: f64,
}

impl PredictionService {
    /// Create a new PredictionService instance
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        model: Arc<dyn Predictor>,
        ndvi_proxy: f64,
    ) -> Self {
        Self {
            weather,
            model,
            ndvi_proxy,
        }
    }

    /// Run the full pipeline for one request.
    pub async fn predict(&self, request: PredictRequest) -> AppResult<YieldEstimate> {
        // Validate: bad input never reaches an outbound call
        let planting = parse_planting_date(&request.planting_date)
            .map_err(|msg| AppError::InvalidPlantingDate(msg.to_string()))?;
        let today = Utc::now().date_naive();
        validate_not_future(planting, today)
            .map_err(|msg| AppError::InvalidPlantingDate(msg.to_string()))?;
        validate_crop(&request.crop).map_err(|msg| AppError::Validation(msg.to_string()))?;

        // ResolveLocation
        let center = district_center(&request.district)
            .ok_or_else(|| AppError::UnknownDistrict(request.district.clone()))?;

        // FetchForecast: 90-day window ending at the planting date
        let start = planting - Duration::days(FORECAST_WINDOW_DAYS);
        let table = self.weather.daily(center, start, planting).await;

        // An empty table is an upstream outage, not a valid window.
        if table.is_empty() {
            return Err(AppError::UpstreamUnavailable(format!(
                "{} in the {} days before {}",
                request.district, FORECAST_WINDOW_DAYS, request.planting_date
            )));
        }

        // DeriveFeatures: true NDVI is unobservable for a forecast window,
        // so both NDVI features take the historical proxy
        let features = derive_forecast_features(&table, self.ndvi_proxy)
            .map_err(|e| AppError::NoData(e.to_string()))?;

        // Predict
        let raw = self.model.predict(&features);
        let predicted = round_2dp(raw);

        tracing::info!(
            district = %request.district,
            crop = %request.crop,
            yield_t_ha = predicted,
            "prediction complete"
        );

        // Respond
        Ok(YieldEstimate {
            status: "success".to_string(),
            message: format!(
                "Expected yield for {} in {}: {} t/ha",
                request.crop, request.district, predicted
            ),
            note: "NDVI based on historical average; weather from forecast.".to_string(),
            district: request.district,
            crop: request.crop,
            planting_date: request.planting_date,
            predicted_yield_t_ha: predicted,
        })
    }
}

/// Standard rounding to 2 decimal places.
fn round_2dp(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
