//! Weather forecast models
//!
//! `RawForecastDay` mirrors one entry of the weather provider's multi-day
//! payload; every humidity field is optional because the provider omits
//! readings freely. The normalized shape handed to the watering scheduler is
//! `DailyHumiditySeries`.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One day of the raw provider forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawForecastDay {
    pub date: NaiveDate,
    /// Hourly records; the provider may send none for the tail of the range
    #[serde(default)]
    pub hour: Vec<ForecastHour>,
    /// Day-level aggregates, used as a fallback when hourly data is absent
    pub day: Option<ForecastDaySummary>,
}

/// A single hourly record within a forecast day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastHour {
    pub humidity: Option<f64>,
}

/// Day-level aggregates from the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDaySummary {
    pub avghumidity: Option<f64>,
}

/// Average humidity for one calendar day; `None` when the provider had no
/// usable reading for that date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyHumidity {
    pub date: NaiveDate,
    pub humidity: Option<f64>,
}

/// Ordered per-day humidity series, one entry per forecast day.
///
/// Order follows the provider payload; dates are assumed unique per call, so
/// no deduplication happens here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DailyHumiditySeries(pub Vec<DailyHumidity>);

impl DailyHumiditySeries {
    pub fn new(entries: Vec<DailyHumidity>) -> Self {
        Self(entries)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DailyHumidity> {
        self.0.iter()
    }

    /// Humidity values in day order, without dates
    pub fn values(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.0.iter().map(|d| d.humidity)
    }
}

impl FromIterator<DailyHumidity> for DailyHumiditySeries {
    fn from_iter<I: IntoIterator<Item = DailyHumidity>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Forecast summary returned to API clients alongside a watering calculation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub city: String,
    /// Number of forecast days that were requested from the provider
    pub days: u32,
    pub daily_humidity: DailyHumiditySeries,
    pub retrieved_at: DateTime<Utc>,
}
