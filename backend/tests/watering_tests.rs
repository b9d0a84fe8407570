//! Watering scheduler tests
//!
//! Unit anchors for the documented calculation examples plus property-based
//! coverage of the scheduler's invariants.

use proptest::prelude::*;

use chrono::NaiveDate;
use shared::models::{DailyHumidity, DailyHumiditySeries, WateringBenchmark};
use shared::watering::{
    calculate_average_humidity, calculate_humidity_adjustment, calculate_next_watering,
    convert_to_days_and_hours, extract_average_days, BenchmarkDays,
};

/// Helper to build a humidity series from plain values
fn series(values: &[Option<f64>]) -> DailyHumiditySeries {
    values
        .iter()
        .enumerate()
        .map(|(i, &humidity)| DailyHumidity {
            date: NaiveDate::from_ymd_opt(2026, 1, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(i as u64))
                .unwrap(),
            humidity,
        })
        .collect()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_benchmark_extraction_examples() {
        assert_eq!(
            extract_average_days(&WateringBenchmark::new("7", "days")).days(),
            7.0
        );
        assert_eq!(
            extract_average_days(&WateringBenchmark::new("6-12", "days")).days(),
            9.0
        );
        // Unsupported unit falls back to the default base
        assert_eq!(
            extract_average_days(&WateringBenchmark::new("7", "weeks")).days(),
            7.0
        );
    }

    #[test]
    fn test_adjustment_examples() {
        assert_eq!(calculate_humidity_adjustment(85.0), 1.1);
        assert_eq!(calculate_humidity_adjustment(95.0), 1.2);
        assert_eq!(calculate_humidity_adjustment(25.0), 0.9);
        assert_eq!(calculate_humidity_adjustment(55.0), 1.0);
    }

    #[test]
    fn test_conversion_examples() {
        let half = convert_to_days_and_hours(7.5);
        assert_eq!((half.days, half.hours, half.total_hours), (7, 12, 180));

        // Rounded hours at the day boundary carry into a full day
        let boundary = convert_to_days_and_hours(6.999_999);
        assert_eq!((boundary.days, boundary.hours), (7, 0));
    }

    #[test]
    fn test_full_pipeline_humid_city() {
        let result = calculate_next_watering(
            &WateringBenchmark::new("7", "days"),
            &series(&[Some(80.0), Some(85.0), Some(90.0)]),
        );

        assert_eq!(result.average_humidity, 85.0);
        assert_eq!(result.humidity_adjustment_factor, 1.1);
        assert_eq!(result.days, 7);
        assert_eq!(result.hours, 17);
        assert_eq!(result.total_hours, 185);
    }

    #[test]
    fn test_full_pipeline_without_humidity_data() {
        let result = calculate_next_watering(
            &WateringBenchmark::new("6-12", "days"),
            &series(&[None, None, None]),
        );

        assert_eq!(result.average_humidity, 60.0);
        assert_eq!(result.humidity_adjustment_factor, 1.0);
        assert_eq!(result.adjusted_total_days, 9.0);
        assert_eq!((result.days, result.hours), (9, 0));
    }

    #[test]
    fn test_unparseable_benchmark_is_distinguishable() {
        assert_eq!(
            extract_average_days(&WateringBenchmark::new("twice", "days")),
            BenchmarkDays::Unparseable
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for humidity percentages with one decimal of precision
    fn humidity_strategy() -> impl Strategy<Value = f64> {
        (0i64..=1000i64).prop_map(|n| n as f64 / 10.0)
    }

    /// Strategy for humidity series mixing present and absent readings
    fn series_strategy() -> impl Strategy<Value = Vec<Option<f64>>> {
        prop::collection::vec(prop::option::of(humidity_strategy()), 0..14)
    }

    /// Strategy for single-value day benchmarks
    fn single_benchmark_strategy() -> impl Strategy<Value = (WateringBenchmark, f64)> {
        (1u32..=60u32).prop_map(|days| {
            (
                WateringBenchmark::new(days.to_string(), "days"),
                days as f64,
            )
        })
    }

    /// Strategy for ranged day benchmarks
    fn range_benchmark_strategy() -> impl Strategy<Value = (WateringBenchmark, f64)> {
        (1u32..=30u32, 0u32..=30u32).prop_map(|(lo, span)| {
            let hi = lo + span;
            (
                WateringBenchmark::new(format!("{}-{}", lo, hi), "days"),
                (lo + hi) as f64 / 2.0,
            )
        })
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Adjustment factor is always within [0.3, 1.3] for valid humidity
        #[test]
        fn prop_adjustment_bounded(humidity in humidity_strategy()) {
            let adjustment = calculate_humidity_adjustment(humidity);
            prop_assert!(adjustment >= 0.3);
            prop_assert!(adjustment <= 1.3);
        }

        /// The neutral band applies no adjustment
        #[test]
        fn prop_neutral_band_is_identity(humidity in 400i64..=700i64) {
            let adjustment = calculate_humidity_adjustment(humidity as f64 / 10.0);
            prop_assert_eq!(adjustment, 1.0);
        }

        /// Higher humidity never shortens the interval, lower never extends it
        #[test]
        fn prop_adjustment_direction(humidity in humidity_strategy()) {
            let adjustment = calculate_humidity_adjustment(humidity);
            if humidity > 70.0 {
                prop_assert!(adjustment >= 1.0);
            }
            if humidity < 40.0 {
                prop_assert!(adjustment <= 1.0);
            }
        }

        /// Out-of-range and absent entries never corrupt the average
        #[test]
        fn prop_average_ignores_invalid_entries(valid in prop::collection::vec(humidity_strategy(), 1..8)) {
            let mut entries: Vec<Option<f64>> = valid.iter().copied().map(Some).collect();
            entries.push(None);
            entries.push(Some(250.0));
            entries.push(Some(-40.0));
            entries.push(Some(f64::NAN));

            let expected = {
                let sum: f64 = valid.iter().sum();
                ((sum / valid.len() as f64) * 10.0).round() / 10.0
            };

            prop_assert_eq!(calculate_average_humidity(&series(&entries)), expected);
        }

        /// A series with no usable entry falls back to the 60% default
        #[test]
        fn prop_empty_series_defaults(len in 0usize..10) {
            let entries: Vec<Option<f64>> = vec![None; len];
            prop_assert_eq!(calculate_average_humidity(&series(&entries)), 60.0);
        }

        /// Hours stay below 24 and recombine exactly into total hours
        #[test]
        fn prop_day_hour_decomposition_consistent(total in 0i64..=100_000i64) {
            let total_days = total as f64 / 1000.0;
            let breakdown = convert_to_days_and_hours(total_days);

            prop_assert!(breakdown.hours < 24);
            prop_assert_eq!(breakdown.days * 24 + breakdown.hours, breakdown.total_hours);
        }

        /// The scheduler is a pure function: identical inputs, identical output
        #[test]
        fn prop_idempotent(
            (benchmark, _) in single_benchmark_strategy(),
            entries in series_strategy()
        ) {
            let humidity = series(&entries);
            let first = calculate_next_watering(&benchmark, &humidity);
            let second = calculate_next_watering(&benchmark, &humidity);
            prop_assert_eq!(first, second);
        }

        /// Adjusted total is always base times factor
        #[test]
        fn prop_adjusted_is_base_times_factor(
            (benchmark, base) in single_benchmark_strategy(),
            entries in series_strategy()
        ) {
            let result = calculate_next_watering(&benchmark, &series(&entries));
            prop_assert_eq!(result.base_watering_days, base);
            let expected = base * result.humidity_adjustment_factor;
            prop_assert!((result.adjusted_total_days - expected).abs() < 1e-9);
        }

        /// Ranged benchmarks resolve to their midpoint
        #[test]
        fn prop_range_midpoint((benchmark, midpoint) in range_benchmark_strategy()) {
            prop_assert_eq!(extract_average_days(&benchmark).days(), midpoint);
        }

        /// The calculation never fails to produce a message
        #[test]
        fn prop_message_always_present(
            value in "[a-z0-9-]{0,12}",
            unit in prop::sample::select(vec!["days", "weeks", "Days", ""]),
            entries in series_strategy()
        ) {
            let benchmark = WateringBenchmark::new(value, unit);
            let result = calculate_next_watering(&benchmark, &series(&entries));
            prop_assert!(result.message.starts_with("Next watering in"));
            prop_assert!(!result.humidity_explanation.is_empty());
        }
    }
}
