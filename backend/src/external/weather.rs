//! Weather API client for daily temperature and precipitation
//!
//! Integrates with the Open-Meteo daily API: the archive host for
//! historical windows and the forecast host for windows that touch the
//! future. On any transport failure, non-2xx status, or malformed payload
//! the client returns an EMPTY table; callers must treat an empty table as
//! "no data", never as success.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;

use shared::types::GeoPoint;

use crate::config::WeatherConfig;

/// One day of normalized weather observations
#[derive(Debug, Clone, PartialEq)]
pub struct DailyWeather {
    pub date: NaiveDate,
    pub mean_temp_c: f64,
    pub total_rain_mm: f64,
}

/// Date-ascending daily weather table
pub type WeatherTable = Vec<DailyWeather>;

/// Capability for fetching daily weather tables.
///
/// The prediction service depends on this seam rather than the concrete
/// HTTP client so tests can drive it with a stub.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Daily mean temperature and precipitation for `[start, end]`.
    /// An empty table means the window could not be fetched.
    async fn daily(&self, point: GeoPoint, start: NaiveDate, end: NaiveDate) -> WeatherTable;
}

/// Open-Meteo daily weather client
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    archive_url: String,
    forecast_url: String,
    timezone: String,
}

/// Open-Meteo response envelope
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: OpenMeteoDaily,
}

/// Parallel arrays of the `daily` block; entries may be null
#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    time: Vec<String>,
    temperature_2m_mean: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
}

impl WeatherClient {
    /// Create a new WeatherClient from configuration
    pub fn new(config: &WeatherConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            archive_url: config.archive_url.clone(),
            forecast_url: config.forecast_url.clone(),
            timezone: config.timezone.clone(),
        }
    }

    /// Create a new WeatherClient with custom base URLs (for testing)
    pub fn with_base_urls(archive_url: String, forecast_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            archive_url,
            forecast_url,
            timezone: "Africa/Kigali".to_string(),
        }
    }

    /// Pick the archive or forecast host for the requested window.
    fn base_url_for(&self, end: NaiveDate) -> &str {
        if end > Utc::now().date_naive() {
            &self.forecast_url
        } else {
            &self.archive_url
        }
    }

    async fn fetch(
        &self,
        point: GeoPoint,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<WeatherTable> {
        let url = format!(
            "{}?latitude={}&longitude={}&start_date={}&end_date={}\
             &daily=temperature_2m_mean,precipitation_sum&timezone={}",
            self.base_url_for(end),
            point.latitude,
            point.longitude,
            start.format("%Y-%m-%d"),
            end.format("%Y-%m-%d"),
            self.timezone,
        );

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            anyhow::bail!("weather API returned {}", response.status());
        }

        let data: OpenMeteoResponse = response.json().await?;
        Ok(normalize_daily(data.daily))
    }
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    async fn daily(&self, point: GeoPoint, start: NaiveDate, end: NaiveDate) -> WeatherTable {
        match self.fetch(point, start, end).await {
            Ok(table) => {
                tracing::info!("Retrieved {} weather records", table.len());
                table
            }
            Err(e) => {
                tracing::warn!("Weather fetch failed: {e}");
                Vec::new()
            }
        }
    }
}

/// Convert the parallel-array payload into a date-ascending table.
///
/// Rows whose date fails to parse or whose temperature or precipitation is
/// null are dropped rather than zero-filled.
fn normalize_daily(daily: OpenMeteoDaily) -> WeatherTable {
    let mut table: WeatherTable = daily
        .time
        .iter()
        .zip(daily.temperature_2m_mean.iter())
        .zip(daily.precipitation_sum.iter())
        .filter_map(|((time, temp), rain)| {
            let date = NaiveDate::parse_from_str(time, "%Y-%m-%d").ok()?;
            Some(DailyWeather {
                date,
                mean_temp_c: (*temp)?,
                total_rain_mm: (*rain)?,
            })
        })
        .collect();

    table.sort_by_key(|row| row.date);
    table
}
