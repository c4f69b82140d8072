//! Data-fetch helper
//!
//! Pulls the historical daily weather table and the NDVI series for one
//! district and writes them as a joined CSV, one row per weather day with
//! the NDVI column blank on days without a clear satellite pass. Used to
//! assemble training tables outside the serving path.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use clap::Parser;

use shared::districts::district_center;
use umuhinzi_backend::external::vegetation::VegetationSample;
use umuhinzi_backend::external::weather::{DailyWeather, WeatherClient, WeatherProvider};
use umuhinzi_backend::external::VegetationClient;
use umuhinzi_backend::Config;

#[derive(Parser, Debug)]
#[command(
    name = "fetch-dataset",
    about = "Fetch weather and NDVI history for a district as CSV"
)]
struct Args {
    /// District name (e.g. Gasabo)
    #[arg(long)]
    district: String,

    /// Start date, YYYY-MM-DD
    #[arg(long)]
    start: String,

    /// End date, YYYY-MM-DD; defaults to today
    #[arg(long)]
    end: Option<String>,

    /// Output CSV path
    #[arg(long)]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "umuhinzi_backend=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();
    let config = Config::load()?;
    let args = Args::parse();

    let center = district_center(&args.district)
        .with_context(|| format!("Unknown district: {}", args.district))?;

    let start = NaiveDate::parse_from_str(&args.start, "%Y-%m-%d")
        .context("--start must be YYYY-MM-DD")?;
    let end = match &args.end {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .context("--end must be YYYY-MM-DD")?,
        None => Utc::now().date_naive(),
    };

    tracing::info!(
        "Fetching {} from {} to {} ({}, {})",
        args.district,
        start,
        end,
        center.latitude,
        center.longitude
    );

    let weather_client = WeatherClient::new(&config.weather);
    let vegetation_client = VegetationClient::new(&config.vegetation);

    let weather = weather_client.daily(center, start, end).await;
    let ndvi = vegetation_client.fetch_series(center, start, Some(end)).await;

    if weather.is_empty() {
        tracing::warn!("Weather archive returned no rows for the window");
    }

    let rows = joined_rows(&weather, &ndvi);
    let with_ndvi = rows.iter().filter(|row| !row[3].is_empty()).count();

    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("cannot write {}", args.out.display()))?;
    writer.write_record(["date", "mean_temp_c", "total_rain_mm", "mean_ndvi"])?;
    for row in &rows {
        writer.write_record(row)?;
    }
    writer.flush()?;

    tracing::info!(
        "Wrote {} weather rows ({} with NDVI) to {}",
        rows.len(),
        with_ndvi,
        args.out.display()
    );

    Ok(())
}

/// Left-join the NDVI series onto the weather table by date: one output row
/// per weather day, NDVI blank where no clear pass occurred.
fn joined_rows(weather: &[DailyWeather], ndvi: &[VegetationSample]) -> Vec<[String; 4]> {
    let ndvi_by_date: HashMap<NaiveDate, f64> = ndvi
        .iter()
        .map(|sample| (sample.date, sample.mean_ndvi))
        .collect();

    weather
        .iter()
        .map(|row| {
            [
                row.date.format("%Y-%m-%d").to_string(),
                row.mean_temp_c.to_string(),
                row.total_rain_mm.to_string(),
                ndvi_by_date
                    .get(&row.date)
                    .map(|v| v.to_string())
                    .unwrap_or_default(),
            ]
        })
        .collect()
}
