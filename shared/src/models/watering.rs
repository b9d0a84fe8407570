//! Watering calculation result model

use serde::{Deserialize, Serialize};

/// Result of one watering-schedule calculation.
///
/// Built fresh per request and returned once; never stored. Intermediate
/// values are kept alongside the final breakdown so API clients can show how
/// the schedule was derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WateringResult {
    /// Nominal interval extracted from the plant's benchmark
    pub base_watering_days: f64,
    /// Average humidity the adjustment was based on
    pub average_humidity: f64,
    /// Multiplier applied to the nominal interval (1.0 = no change)
    pub humidity_adjustment_factor: f64,
    pub adjusted_total_days: f64,
    pub days: u32,
    pub hours: u32,
    pub total_hours: u32,
    pub message: String,
    pub humidity_explanation: String,
}
