//! Forecast normalization
//!
//! Reduces the weather provider's raw multi-day payload to one representative
//! humidity figure per calendar day. Missing data is carried through as
//! `None` rather than defaulted; default policy belongs to the watering
//! scheduler.

use crate::models::{DailyHumidity, DailyHumiditySeries, RawForecastDay};

/// Normalize a raw provider forecast into an ordered per-day humidity series.
///
/// Day order follows the input. For each day:
/// - no hourly records: the day-level average humidity, if the provider sent
///   one, else `None`;
/// - otherwise the mean of the usable hourly readings, rounded to 1 decimal;
///   `None` when no reading is usable.
///
/// Never fails, whatever the payload shape.
pub fn normalize(days: &[RawForecastDay]) -> DailyHumiditySeries {
    days.iter()
        .map(|day| DailyHumidity {
            date: day.date,
            humidity: day_average(day),
        })
        .collect()
}

/// Representative humidity for a single forecast day
fn day_average(day: &RawForecastDay) -> Option<f64> {
    if day.hour.is_empty() {
        return day.day.as_ref().and_then(|d| d.avghumidity);
    }

    let readings: Vec<f64> = day
        .hour
        .iter()
        .filter_map(|h| h.humidity)
        .filter(|h| h.is_finite())
        .collect();

    if readings.is_empty() {
        return None;
    }

    let mean = readings.iter().sum::<f64>() / readings.len() as f64;
    Some(round1(mean))
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ForecastDaySummary, ForecastHour};
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn hours(values: &[Option<f64>]) -> Vec<ForecastHour> {
        values
            .iter()
            .map(|&humidity| ForecastHour { humidity })
            .collect()
    }

    #[test]
    fn test_hourly_mean_rounded_to_one_decimal() {
        let day = RawForecastDay {
            date: date("2026-08-06"),
            hour: hours(&[Some(60.0), Some(61.0), Some(62.5)]),
            day: None,
        };

        let series = normalize(&[day]);
        assert_eq!(series.0[0].humidity, Some(61.2));
    }

    #[test]
    fn test_missing_hourly_readings_are_skipped() {
        let day = RawForecastDay {
            date: date("2026-08-06"),
            hour: hours(&[Some(80.0), None, Some(90.0), None]),
            day: None,
        };

        let series = normalize(&[day]);
        assert_eq!(series.0[0].humidity, Some(85.0));
    }

    #[test]
    fn test_day_level_fallback_when_no_hourly_records() {
        let day = RawForecastDay {
            date: date("2026-08-06"),
            hour: vec![],
            day: Some(ForecastDaySummary {
                avghumidity: Some(72.0),
            }),
        };

        let series = normalize(&[day]);
        assert_eq!(series.0[0].humidity, Some(72.0));
    }

    #[test]
    fn test_no_data_at_all_yields_none() {
        let bare = RawForecastDay {
            date: date("2026-08-06"),
            hour: vec![],
            day: None,
        };
        let empty_summary = RawForecastDay {
            date: date("2026-08-07"),
            hour: vec![],
            day: Some(ForecastDaySummary { avghumidity: None }),
        };
        let all_hours_missing = RawForecastDay {
            date: date("2026-08-08"),
            hour: hours(&[None, None]),
            day: Some(ForecastDaySummary {
                avghumidity: Some(50.0),
            }),
        };

        let series = normalize(&[bare, empty_summary, all_hours_missing]);
        assert_eq!(series.0[0].humidity, None);
        assert_eq!(series.0[1].humidity, None);
        // Hourly records exist but none is usable: the day-level fallback is
        // only for days with zero hourly records
        assert_eq!(series.0[2].humidity, None);
    }

    #[test]
    fn test_day_order_is_preserved() {
        let days: Vec<RawForecastDay> = ["2026-08-08", "2026-08-06", "2026-08-07"]
            .iter()
            .enumerate()
            .map(|(i, d)| RawForecastDay {
                date: date(d),
                hour: hours(&[Some(50.0 + i as f64)]),
                day: None,
            })
            .collect();

        let series = normalize(&days);
        let dates: Vec<NaiveDate> = series.iter().map(|d| d.date).collect();
        assert_eq!(
            dates,
            vec![date("2026-08-08"), date("2026-08-06"), date("2026-08-07")]
        );
    }

    #[test]
    fn test_empty_forecast() {
        assert!(normalize(&[]).is_empty());
    }
}
