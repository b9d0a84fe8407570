//! Watering schedule calculation
//!
//! Turns a plant's nominal watering benchmark and a per-day humidity series
//! into a concrete "time until next watering". Pure and total: malformed
//! input degrades to documented defaults instead of failing, so the caller
//! can always hand the user some estimate.

use crate::models::{DailyHumiditySeries, WateringBenchmark, WateringResult};

/// Base interval used when the benchmark is missing or its unit is not days
pub const DEFAULT_BASE_DAYS: f64 = 7.0;

/// Average humidity assumed when the series holds no usable reading
pub const DEFAULT_AVERAGE_HUMIDITY: f64 = 60.0;

/// Floor for the adjustment factor: never shorten below 30% of nominal
const MIN_ADJUSTMENT: f64 = 0.3;

/// Interpretation of a benchmark's value/unit pair.
///
/// `Unparseable` keeps the upstream catalog's observable behavior (a zero
/// base interval) but stays distinguishable so callers can log or reject it;
/// see DESIGN.md before changing that fallback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BenchmarkDays {
    /// Single parsable token, e.g. `"7"`
    Single(f64),
    /// Inclusive range, e.g. `"6-12"`, interpreted as its midpoint
    Range { min: f64, max: f64 },
    /// Missing fields or a unit other than days
    Default,
    /// Single token that is not a number
    Unparseable,
}

impl BenchmarkDays {
    /// Nominal watering interval in days
    pub fn days(self) -> f64 {
        match self {
            BenchmarkDays::Single(days) => days,
            BenchmarkDays::Range { min, max } => (min + max) / 2.0,
            BenchmarkDays::Default => DEFAULT_BASE_DAYS,
            BenchmarkDays::Unparseable => 0.0,
        }
    }
}

/// Adjusted interval decomposed into whole days and hours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBreakdown {
    pub days: u32,
    pub hours: u32,
    pub total_hours: u32,
}

/// Calculate the time until the next watering.
///
/// Deterministic and infallible for every input shape; identical inputs give
/// identical results.
pub fn calculate_next_watering(
    benchmark: &WateringBenchmark,
    humidity: &DailyHumiditySeries,
) -> WateringResult {
    let base = extract_average_days(benchmark);
    if base == BenchmarkDays::Unparseable {
        tracing::warn!(
            value = %benchmark.value,
            "watering benchmark value did not parse as a number; base interval falls back to 0 days"
        );
    }
    let base_days = base.days();

    let average_humidity = calculate_average_humidity(humidity);
    let adjustment = calculate_humidity_adjustment(average_humidity);
    let adjusted_days = base_days * adjustment;
    let breakdown = convert_to_days_and_hours(adjusted_days);

    tracing::debug!(
        base_days,
        average_humidity,
        adjustment,
        adjusted_days,
        days = breakdown.days,
        hours = breakdown.hours,
        "watering schedule calculated"
    );

    WateringResult {
        base_watering_days: base_days,
        average_humidity,
        humidity_adjustment_factor: adjustment,
        adjusted_total_days: adjusted_days,
        days: breakdown.days,
        hours: breakdown.hours,
        total_hours: breakdown.total_hours,
        message: watering_message(&breakdown),
        humidity_explanation: humidity_explanation(average_humidity, adjustment),
    }
}

/// Extract the nominal interval from a benchmark.
///
/// Missing value/unit or a unit other than `"days"` (case-insensitive) maps
/// to [`BenchmarkDays::Default`]. Surrounding double quotes on the value are
/// stripped. Ranged values resolve to their midpoint; a missing or
/// unparseable range end falls back to the start.
pub fn extract_average_days(benchmark: &WateringBenchmark) -> BenchmarkDays {
    let unit = benchmark.unit.trim();
    let value = benchmark.value.trim();
    if unit.is_empty() || value.is_empty() {
        return BenchmarkDays::Default;
    }
    if !unit.eq_ignore_ascii_case("days") {
        return BenchmarkDays::Default;
    }

    let value = value.trim_matches('"').trim();

    if value.contains('-') {
        let parts: Vec<&str> = value.split('-').collect();
        let min = parse_number(parts[0]).unwrap_or(0.0);
        let max = parts
            .get(1)
            .and_then(|token| parse_number(token))
            .unwrap_or(min);
        return BenchmarkDays::Range { min, max };
    }

    match parse_number(value) {
        Some(days) => BenchmarkDays::Single(days),
        None => BenchmarkDays::Unparseable,
    }
}

/// Average the usable entries of a humidity series, rounded to 1 decimal.
///
/// Entries that are absent, non-finite or outside [0, 100] are excluded;
/// with nothing usable the default of 60% applies (adjustment factor 1.0).
pub fn calculate_average_humidity(humidity: &DailyHumiditySeries) -> f64 {
    let valid: Vec<f64> = humidity
        .values()
        .flatten()
        .filter(|h| h.is_finite() && (0.0..=100.0).contains(h))
        .collect();

    if valid.is_empty() {
        return DEFAULT_AVERAGE_HUMIDITY;
    }

    round1(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Adjustment factor for an average humidity, rounded to 2 decimals.
///
/// Above 70%: +10% per full 10-point tranche (evaporation slows, the
/// interval stretches). Below 40%: -10% per full tranche, floored at 0.3.
/// In between: no adjustment.
pub fn calculate_humidity_adjustment(average_humidity: f64) -> f64 {
    let adjustment = if average_humidity > 70.0 {
        let tranches = ((average_humidity - 70.0) / 10.0).floor();
        1.0 + tranches * 0.10
    } else if average_humidity < 40.0 {
        let tranches = ((40.0 - average_humidity) / 10.0).floor();
        (1.0 - tranches * 0.10).max(MIN_ADJUSTMENT)
    } else {
        1.0
    };

    round2(adjustment)
}

/// Decompose a fractional day count into whole days and hours.
///
/// Hours are rounded to the nearest whole hour; a rounded value of 24 carries
/// into an extra day.
pub fn convert_to_days_and_hours(total_days: f64) -> TimeBreakdown {
    // Total function: non-finite or negative inputs collapse to zero
    let total_days = if total_days.is_finite() && total_days > 0.0 {
        total_days
    } else {
        0.0
    };

    let mut days = total_days.floor();
    let mut hours = ((total_days - days) * 24.0).round();
    if hours >= 24.0 {
        days += 1.0;
        hours = 0.0;
    }

    TimeBreakdown {
        days: days as u32,
        hours: hours as u32,
        total_hours: (total_days * 24.0).round() as u32,
    }
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn watering_message(breakdown: &TimeBreakdown) -> String {
    let days = breakdown.days;
    let hours = breakdown.hours;

    if days == 0 {
        return format!("Next watering in {} {}", hours, plural(hours, "hour"));
    }
    if hours == 0 {
        return format!("Next watering in {} {}", days, plural(days, "day"));
    }
    format!(
        "Next watering in {} {} and {} {}",
        days,
        plural(days, "day"),
        hours,
        plural(hours, "hour")
    )
}

fn humidity_explanation(average_humidity: f64, adjustment: f64) -> String {
    if adjustment > 1.0 {
        let increase = ((adjustment - 1.0) * 100.0).round() as i64;
        return format!(
            "High humidity ({}%): watering interval increased by {}%",
            format_percent(average_humidity),
            increase
        );
    }
    if adjustment < 1.0 {
        let decrease = ((1.0 - adjustment) * 100.0).round() as i64;
        return format!(
            "Low humidity ({}%): watering interval reduced by {}%",
            format_percent(average_humidity),
            decrease
        );
    }
    format!(
        "Normal humidity ({}%): no adjustment needed",
        format_percent(average_humidity)
    )
}

fn plural(n: u32, word: &str) -> String {
    if n == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Render a humidity percentage without a trailing `.0`
fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
