//! HTTP handler for the prediction endpoint

use axum::{extract::State, Json};

use shared::models::{PredictRequest, YieldEstimate};

use crate::error::AppResult;
use crate::services::PredictionService;
use crate::AppState;

/// Predict crop yield for a district and planting date
pub async fn predict_yield(
    State(state): State<AppState>,
    Json(body): Json<PredictRequest>,
) -> AppResult<Json<YieldEstimate>> {
    let service = PredictionService::new(
        state.weather.clone(),
        state.model.clone(),
        state.config.vegetation.historical_ndvi_proxy,
    );
    let estimate = service.predict(body).await?;
    Ok(Json(estimate))
}
