//! Feature derivation for the yield model
//!
//! Collapses a daily weather window (plus an NDVI signal) into the single
//! feature row the regression artifact was trained on. The feature set and
//! its order are the contract with the artifact and are owned here, not by
//! the predictor.

use chrono::Datelike;
use thiserror::Error;

use crate::external::vegetation::VegetationSeries;
use crate::external::weather::DailyWeather;

/// Trailing window for cumulative rainfall, days
const RAIN_WINDOW_DAYS: usize = 30;

/// Trailing window for the NDVI rolling mean, samples
/// (one sample per 16-day composite, so 3 samples span roughly 48 days)
const NDVI_ROLL_WINDOW: usize = 3;

/// Feature names in artifact order
pub const FEATURE_NAMES: [&str; 7] = [
    "mean_ndvi",
    "cum_rain_30d",
    "ndvi_roll_mean",
    "temp_anomaly",
    "mean_temp_c",
    "month",
    "total_rain_mm",
];

/// One engineered feature row, in artifact order
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub mean_ndvi: f64,
    pub cum_rain_30d: f64,
    pub ndvi_roll_mean: f64,
    pub temp_anomaly: f64,
    pub mean_temp_c: f64,
    pub month: f64,
    pub total_rain_mm: f64,
}

impl FeatureVector {
    /// Values in the exact order of [`FEATURE_NAMES`].
    pub fn as_ordered(&self) -> [f64; 7] {
        [
            self.mean_ndvi,
            self.cum_rain_30d,
            self.ndvi_roll_mean,
            self.temp_anomaly,
            self.mean_temp_c,
            self.month,
            self.total_rain_mm,
        ]
    }
}

/// Feature derivation failures
#[derive(Error, Debug, PartialEq)]
pub enum FeatureError {
    #[error("no weather data for window")]
    NoData,
}

/// Per-day engineered columns before the collapse
struct DayFeatures {
    mean_ndvi: f64,
    cum_rain_30d: f64,
    ndvi_roll_mean: f64,
    temp_anomaly: f64,
    mean_temp_c: f64,
    month: f64,
    total_rain_mm: f64,
}

/// Derive the feature row for a forecast window, where true NDVI is
/// unobservable and both NDVI features take the historical proxy value.
pub fn derive_forecast_features(
    weather: &[DailyWeather],
    ndvi_proxy: f64,
) -> Result<FeatureVector, FeatureError> {
    derive(weather, ndvi_proxy, ndvi_proxy)
}

/// Derive the feature row for a retrospective window with an observed NDVI
/// series. An empty series falls back to the proxy, mirroring the
/// degrade-to-empty policy of the vegetation client.
pub fn derive_observed_features(
    weather: &[DailyWeather],
    ndvi: &VegetationSeries,
    ndvi_proxy: f64,
) -> Result<FeatureVector, FeatureError> {
    if ndvi.is_empty() {
        return derive(weather, ndvi_proxy, ndvi_proxy);
    }

    let values: Vec<f64> = ndvi.iter().map(|sample| sample.mean_ndvi).collect();
    let mean_ndvi = mean(&values);
    let roll = trailing_means(&values, NDVI_ROLL_WINDOW);
    let ndvi_roll_mean = mean(&roll);

    derive(weather, mean_ndvi, ndvi_roll_mean)
}

fn derive(
    weather: &[DailyWeather],
    mean_ndvi: f64,
    ndvi_roll_mean: f64,
) -> Result<FeatureVector, FeatureError> {
    if weather.is_empty() {
        return Err(FeatureError::NoData);
    }

    let window_mean_temp = mean_temp(weather);
    let rain_sums = trailing_rain_sums(weather);

    let days: Vec<DayFeatures> = weather
        .iter()
        .zip(rain_sums)
        .map(|(day, cum_rain_30d)| DayFeatures {
            mean_ndvi,
            cum_rain_30d,
            ndvi_roll_mean,
            temp_anomaly: day.mean_temp_c - window_mean_temp,
            mean_temp_c: day.mean_temp_c,
            month: f64::from(day.date.month()),
            total_rain_mm: day.total_rain_mm,
        })
        .collect();

    Ok(collapse_by_mean(&days))
}

/// Per-day trailing sum of precipitation over the last [`RAIN_WINDOW_DAYS`]
/// rows (fewer at the start of the series). Rows are contiguous days, so a
/// row window is a day window; days absent from the table contribute zero.
pub fn trailing_rain_sums(weather: &[DailyWeather]) -> Vec<f64> {
    let mut sums = Vec::with_capacity(weather.len());
    let mut running = 0.0;

    for (i, day) in weather.iter().enumerate() {
        running += day.total_rain_mm;
        if i >= RAIN_WINDOW_DAYS {
            running -= weather[i - RAIN_WINDOW_DAYS].total_rain_mm;
        }
        sums.push(running);
    }

    sums
}

/// Arithmetic mean temperature of the whole window.
fn mean_temp(weather: &[DailyWeather]) -> f64 {
    let total: f64 = weather.iter().map(|day| day.mean_temp_c).sum();
    total / weather.len() as f64
}

/// Trailing rolling means over a sample series, window `window`, minimum
/// one sample.
fn trailing_means(values: &[f64], window: usize) -> Vec<f64> {
    let mut means = Vec::with_capacity(values.len());
    let mut running = 0.0;

    for (i, value) in values.iter().enumerate() {
        running += value;
        if i >= window {
            running -= values[i - window];
        }
        let n = (i + 1).min(window);
        means.push(running / n as f64);
    }

    means
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Collapse the per-day table to one row by taking the arithmetic mean of
/// every column. `month` is averaged like the other columns: a window that
/// spans a month boundary yields a fractional month, which is what the
/// artifact was trained on.
fn collapse_by_mean(days: &[DayFeatures]) -> FeatureVector {
    let n = days.len() as f64;
    let mut totals = [0.0f64; 7];

    for day in days {
        totals[0] += day.mean_ndvi;
        totals[1] += day.cum_rain_30d;
        totals[2] += day.ndvi_roll_mean;
        totals[3] += day.temp_anomaly;
        totals[4] += day.mean_temp_c;
        totals[5] += day.month;
        totals[6] += day.total_rain_mm;
    }

    FeatureVector {
        mean_ndvi: totals[0] / n,
        cum_rain_30d: totals[1] / n,
        ndvi_roll_mean: totals[2] / n,
        temp_anomaly: totals[3] / n,
        mean_temp_c: totals[4] / n,
        month: totals[5] / n,
        total_rain_mm: totals[6] / n,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn constant_window(days: u32, temp: f64, rain: f64) -> Vec<DailyWeather> {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        (0..days)
            .map(|i| DailyWeather {
                date: start + chrono::Duration::days(i64::from(i)),
                mean_temp_c: temp,
                total_rain_mm: rain,
            })
            .collect()
    }

    #[test]
    fn test_empty_window_is_no_data() {
        assert_eq!(
            derive_forecast_features(&[], 0.55),
            Err(FeatureError::NoData)
        );
    }

    #[test]
    fn test_trailing_rain_sum_caps_at_thirty_days() {
        let window = constant_window(90, 20.0, 5.0);
        let sums = trailing_rain_sums(&window);
        for (i, sum) in sums.iter().enumerate() {
            let expected = (i + 1).min(30) as f64 * 5.0;
            assert!((sum - expected).abs() < 1e-9, "day {i}: {sum} != {expected}");
        }
    }

    #[test]
    fn test_short_window_rain_sum_equals_total() {
        // Fewer than 30 days: the trailing sum is just the running total.
        let window = constant_window(10, 20.0, 3.0);
        let sums = trailing_rain_sums(&window);
        assert_eq!(*sums.last().unwrap(), 30.0);
    }

    #[test]
    fn test_constant_temperature_has_zero_anomaly() {
        let window = constant_window(90, 20.0, 5.0);
        let features = derive_forecast_features(&window, 0.55).unwrap();
        assert_eq!(features.temp_anomaly, 0.0);
        assert_eq!(features.mean_temp_c, 20.0);
    }

    #[test]
    fn test_forecast_features_use_proxy_for_both_ndvi_columns() {
        let window = constant_window(30, 22.0, 2.0);
        let features = derive_forecast_features(&window, 0.55).unwrap();
        assert_eq!(features.mean_ndvi, 0.55);
        assert_eq!(features.ndvi_roll_mean, 0.55);
    }

    #[test]
    fn test_month_averages_across_boundary() {
        // 16 days of March + 15 days of April
        let start = NaiveDate::from_ymd_opt(2025, 3, 16).unwrap();
        let window: Vec<DailyWeather> = (0..31)
            .map(|i| DailyWeather {
                date: start + chrono::Duration::days(i),
                mean_temp_c: 20.0,
                total_rain_mm: 0.0,
            })
            .collect();

        let features = derive_forecast_features(&window, 0.55).unwrap();
        let expected = (16.0 * 3.0 + 15.0 * 4.0) / 31.0;
        assert!((features.month - expected).abs() < 1e-9);
    }

    #[test]
    fn test_derivation_is_pure() {
        let window = constant_window(45, 19.5, 4.2);
        let a = derive_forecast_features(&window, 0.55).unwrap();
        let b = derive_forecast_features(&window, 0.55).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_ordered(), b.as_ordered());
    }

    #[test]
    fn test_observed_features_from_series() {
        use crate::external::vegetation::VegetationSample;

        let window = constant_window(30, 21.0, 1.0);
        let series = vec![
            VegetationSample {
                date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
                mean_ndvi: 0.4,
            },
            VegetationSample {
                date: NaiveDate::from_ymd_opt(2025, 3, 17).unwrap(),
                mean_ndvi: 0.6,
            },
        ];

        let features = derive_observed_features(&window, &series, 0.55).unwrap();
        assert!((features.mean_ndvi - 0.5).abs() < 1e-12);
        // Rolling means: [0.4, 0.5] -> mean 0.45
        assert!((features.ndvi_roll_mean - 0.45).abs() < 1e-12);
    }

    #[test]
    fn test_observed_features_fall_back_to_proxy() {
        let window = constant_window(30, 21.0, 1.0);
        let features = derive_observed_features(&window, &Vec::new(), 0.55).unwrap();
        assert_eq!(features.mean_ndvi, 0.55);
        assert_eq!(features.ndvi_roll_mean, 0.55);
    }
}
