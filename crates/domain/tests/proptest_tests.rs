//! Property-based tests for the rolling buffer and forecast aggregation
//!
//! These tests use proptest to verify invariants across many random inputs.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use domain::{ForecastPoint, Location, Sample, SeriesBuffer, aggregate_forecast};
use proptest::prelude::*;

fn sample(i: usize, temperature: f64) -> Sample {
    Sample {
        timestamp: DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(i as i64),
        temperature,
        humidity: temperature + 1.0,
        wind_speed: temperature + 2.0,
        pressure: temperature + 3.0,
    }
}

// ============================================================================
// SeriesBuffer Property Tests
// ============================================================================

mod series_buffer_tests {
    use super::*;

    proptest! {
        #[test]
        fn retains_most_recent_samples_in_order(
            temps in prop::collection::vec(-50.0f64..50.0, 0..200),
            capacity in 1usize..80
        ) {
            let mut buffer = SeriesBuffer::new(capacity);
            for (i, t) in temps.iter().enumerate() {
                buffer.append(sample(i, *t));
            }

            let expected_len = temps.len().min(capacity);
            prop_assert_eq!(buffer.len(), expected_len);
            prop_assert_eq!(buffer.timestamps().len(), expected_len);
            prop_assert_eq!(buffer.temperatures().len(), expected_len);
            prop_assert_eq!(buffer.humidity().len(), expected_len);
            prop_assert_eq!(buffer.wind_speeds().len(), expected_len);
            prop_assert_eq!(buffer.pressures().len(), expected_len);

            let tail: Vec<f64> = temps[temps.len() - expected_len..].to_vec();
            let kept: Vec<f64> = buffer.temperatures().iter().copied().collect();
            prop_assert_eq!(kept, tail);
        }

        #[test]
        fn reset_behaves_like_fresh(
            before in prop::collection::vec(-50.0f64..50.0, 0..100),
            after in prop::collection::vec(-50.0f64..50.0, 0..100)
        ) {
            let mut reused = SeriesBuffer::default();
            for (i, t) in before.iter().enumerate() {
                reused.append(sample(i, *t));
            }
            reused.reset();

            let mut fresh = SeriesBuffer::default();
            for (i, t) in after.iter().enumerate() {
                reused.append(sample(i, *t));
                fresh.append(sample(i, *t));
            }

            prop_assert_eq!(reused, fresh);
        }
    }
}

// ============================================================================
// Forecast Aggregation Property Tests
// ============================================================================

mod forecast_tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    proptest! {
        #[test]
        fn never_exceeds_day_cap(
            offsets in prop::collection::vec(-3i64..12, 0..60),
            cap in 0usize..8
        ) {
            let points: Vec<ForecastPoint> = offsets
                .iter()
                .map(|o| ForecastPoint {
                    time: (today() + Duration::days(*o)).and_hms_opt(12, 0, 0).unwrap(),
                    condition: "Clear".to_string(),
                    temperature: 1.0,
                })
                .collect();

            let days = aggregate_forecast(&points, today(), cap);

            prop_assert!(days.len() <= cap);
            prop_assert!(days.iter().all(|d| d.date > today()));
            let total: usize = days.iter().map(|d| d.points).sum();
            prop_assert!(total <= points.len());
        }

        #[test]
        fn average_lies_between_min_and_max(
            temps in prop::collection::vec(-40.0f64..45.0, 1..20)
        ) {
            let tomorrow = today() + Duration::days(1);
            let points: Vec<ForecastPoint> = temps
                .iter()
                .map(|t| ForecastPoint {
                    time: tomorrow.and_hms_opt(9, 0, 0).unwrap(),
                    condition: "Clouds".to_string(),
                    temperature: *t,
                })
                .collect();

            let days = aggregate_forecast(&points, today(), 4);
            prop_assert_eq!(days.len(), 1);

            let min = temps.iter().copied().fold(f64::INFINITY, f64::min);
            let max = temps.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(days[0].average_temperature >= min - 1e-9);
            prop_assert!(days[0].average_temperature <= max + 1e-9);
        }
    }
}

// ============================================================================
// Location Property Tests
// ============================================================================

mod location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_names_are_trimmed(name in "[A-Za-z][A-Za-z ]{0,30}[A-Za-z]", pad in " {0,4}") {
            let padded = format!("{pad}{name}{pad}");
            let loc = Location::new(&padded).unwrap();
            prop_assert_eq!(loc.as_str(), name.as_str());
        }

        #[test]
        fn whitespace_only_rejected(ws in "[ \t\n]{0,10}") {
            prop_assert!(Location::new(&ws).is_err());
        }
    }
}
