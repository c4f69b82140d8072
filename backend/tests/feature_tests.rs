//! Property tests for feature derivation
//!
//! Covers the windowed statistics the model depends on: trailing rainfall
//! sums, window-relative temperature anomalies, and purity of the
//! derivation itself.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use umuhinzi_backend::external::weather::DailyWeather;
use umuhinzi_backend::services::features::{
    derive_forecast_features, trailing_rain_sums, FeatureError, FEATURE_NAMES,
};

fn window_from(temps: &[f64], rains: &[f64]) -> Vec<DailyWeather> {
    let start = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
    temps
        .iter()
        .zip(rains)
        .enumerate()
        .map(|(i, (temp, rain))| DailyWeather {
            date: start + Duration::days(i as i64),
            mean_temp_c: *temp,
            total_rain_mm: *rain,
        })
        .collect()
}

#[test]
fn feature_order_matches_training_contract() {
    assert_eq!(
        FEATURE_NAMES,
        [
            "mean_ndvi",
            "cum_rain_30d",
            "ndvi_roll_mean",
            "temp_anomaly",
            "mean_temp_c",
            "month",
            "total_rain_mm",
        ]
    );
}

#[test]
fn empty_window_fails_with_no_data() {
    assert_eq!(
        derive_forecast_features(&[], 0.55).unwrap_err(),
        FeatureError::NoData
    );
}

proptest! {
    /// Identical daily temperatures give a zero anomaly regardless of the
    /// window length or the temperature itself.
    #[test]
    fn constant_temperature_has_zero_anomaly(
        temp in -10.0f64..40.0,
        len in 1usize..120,
    ) {
        let temps = vec![temp; len];
        let rains = vec![0.0; len];
        let features = derive_forecast_features(&window_from(&temps, &rains), 0.55).unwrap();
        prop_assert!(features.temp_anomaly.abs() < 1e-9);
    }

    /// A window shorter than 30 days never reaches the cap: every trailing
    /// sum is the running total of all available days.
    #[test]
    fn short_window_rain_sum_equals_running_total(
        rains in proptest::collection::vec(0.0f64..50.0, 1..30),
    ) {
        let temps = vec![20.0; rains.len()];
        let sums = trailing_rain_sums(&window_from(&temps, &rains));

        let mut running = 0.0;
        for (i, sum) in sums.iter().enumerate() {
            running += rains[i];
            prop_assert!((sum - running).abs() < 1e-9);
        }
    }

    /// The trailing sum over a longer window only ever covers the last 30
    /// rows.
    #[test]
    fn long_window_rain_sum_covers_thirty_rows(
        rains in proptest::collection::vec(0.0f64..50.0, 31..120),
    ) {
        let temps = vec![20.0; rains.len()];
        let sums = trailing_rain_sums(&window_from(&temps, &rains));

        let last = *sums.last().unwrap();
        let expected: f64 = rains[rains.len() - 30..].iter().sum();
        prop_assert!((last - expected).abs() < 1e-6);
    }

    /// Same input, same output: the derivation holds no hidden state.
    #[test]
    fn derivation_is_bit_identical(
        temps in proptest::collection::vec(-10.0f64..40.0, 1..100),
        proxy in 0.0f64..1.0,
    ) {
        let rains: Vec<f64> = temps.iter().map(|t| (t + 10.0) / 2.0).collect();
        let window = window_from(&temps, &rains);

        let a = derive_forecast_features(&window, proxy).unwrap();
        let b = derive_forecast_features(&window, proxy).unwrap();
        prop_assert_eq!(a.as_ordered(), b.as_ordered());
    }
}
