//! Vegetation-index client for the satellite-imagery analytics backend
//!
//! Fetches a sparse NDVI time series for a buffered point. The spatial mean
//! per scene is computed server-side under a pixel budget with best-effort
//! sampling: scenes over the budget are reduced from a subset of pixels, so
//! the returned mean is an approximation, not an exact reduction. Raw
//! integer NDVI (0..10000) is rescaled to [0,1].
//!
//! Zero qualifying scenes, or any failure of the bulk materialize call,
//! produce an empty series so feature derivation can substitute a proxy.

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use shared::types::GeoPoint;

use crate::config::VegetationConfig;

/// Raw NDVI integer units per 1.0 of index value
const NDVI_SCALE: f64 = 10_000.0;

/// One satellite pass with a valid spatial-mean NDVI
#[derive(Debug, Clone, PartialEq)]
pub struct VegetationSample {
    pub date: NaiveDate,
    /// Spatial mean NDVI over the buffer, rescaled to [0,1]
    pub mean_ndvi: f64,
}

/// Date-ascending NDVI series; gaps where no clear pass occurred
pub type VegetationSeries = Vec<VegetationSample>;

/// Client for the satellite-imagery analytics backend
#[derive(Clone)]
pub struct VegetationClient {
    client: Client,
    api_url: String,
    product: String,
    buffer_meters: f64,
    scale_meters: f64,
    max_pixels: u64,
}

/// Scene query sent to the analytics backend
#[derive(Debug, Serialize)]
struct SceneQuery<'a> {
    product: &'a str,
    latitude: f64,
    longitude: f64,
    buffer_meters: f64,
    start_date: String,
    end_date: String,
    band: &'a str,
    reducer: &'a str,
    scale_meters: f64,
    max_pixels: u64,
    best_effort: bool,
}

/// Bulk-materialized scene list from the backend
#[derive(Debug, Deserialize)]
struct SceneListResponse {
    scenes: Vec<SceneEntry>,
}

/// One scene; acquisition time or reduced value may be absent
#[derive(Debug, Deserialize)]
struct SceneEntry {
    acquired: Option<String>,
    ndvi_raw: Option<f64>,
}

impl VegetationClient {
    /// Create a new VegetationClient from configuration
    pub fn new(config: &VegetationConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url: config.api_url.clone(),
            product: config.product.clone(),
            buffer_meters: config.buffer_meters,
            scale_meters: config.scale_meters,
            max_pixels: config.max_pixels,
        }
    }

    /// Create a new VegetationClient with a custom base URL (for testing)
    pub fn with_base_url(api_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            api_url,
            product: "MODIS/006/MOD13Q1".to_string(),
            buffer_meters: 5000.0,
            scale_meters: 250.0,
            max_pixels: 1_000_000_000,
        }
    }

    /// Fetch the NDVI series for `point` between `start` and `end`
    /// (`end` defaults to today). Failures degrade to an empty series.
    pub async fn fetch_series(
        &self,
        point: GeoPoint,
        start: NaiveDate,
        end: Option<NaiveDate>,
    ) -> VegetationSeries {
        let end = end.unwrap_or_else(|| Utc::now().date_naive());

        match self.materialize(point, start, end).await {
            Ok(scenes) => {
                let series = normalize_scenes(scenes);
                if series.is_empty() {
                    tracing::info!(
                        "No valid NDVI scenes in {} to {}; returning empty series",
                        start,
                        end
                    );
                } else {
                    tracing::info!("Retrieved {} valid NDVI points", series.len());
                }
                series
            }
            Err(e) => {
                tracing::warn!("NDVI materialize failed: {e}");
                Vec::new()
            }
        }
    }

    async fn materialize(
        &self,
        point: GeoPoint,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<Vec<SceneEntry>> {
        let url = format!("{}/scenes/reduce", self.api_url);
        let query = SceneQuery {
            product: &self.product,
            latitude: point.latitude,
            longitude: point.longitude,
            buffer_meters: self.buffer_meters,
            start_date: start.format("%Y-%m-%d").to_string(),
            end_date: end.format("%Y-%m-%d").to_string(),
            band: "NDVI",
            reducer: "mean",
            scale_meters: self.scale_meters,
            max_pixels: self.max_pixels,
            best_effort: true,
        };

        let response = self.client.post(&url).json(&query).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("vegetation API returned {}", response.status());
        }

        let data: SceneListResponse = response.json().await?;
        Ok(data.scenes)
    }
}

/// Keep scenes with both a timestamp and a value; rescale raw NDVI to [0,1].
fn normalize_scenes(scenes: Vec<SceneEntry>) -> VegetationSeries {
    let mut series: VegetationSeries = scenes
        .into_iter()
        .filter_map(|scene| {
            let acquired = scene.acquired?;
            let date = NaiveDate::parse_from_str(&acquired, "%Y-%m-%d").ok()?;
            let raw = scene.ndvi_raw?;
            Some(VegetationSample {
                date,
                mean_ndvi: raw / NDVI_SCALE,
            })
        })
        .collect();

    series.sort_by_key(|sample| sample.date);
    series
}
