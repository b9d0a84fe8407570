//! Plant catalog models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A plant species in the global catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub id: Uuid,
    /// Identifier of the species in the external plant catalog, when imported
    pub api_id: Option<i32>,
    pub common_name: String,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub origin: Option<String>,
    pub default_image: Option<String>,
    pub watering_general_benchmark: WateringBenchmark,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A plant-care guideline expressing how often a plant nominally needs
/// watering.
///
/// Both fields come straight from the external catalog and are kept as the
/// provider sends them: `value` may be a single token (`"7"`) or an inclusive
/// range (`"6-12"`), sometimes quote-wrapped, and `unit` is only meaningful
/// when it equals `"days"` (case-insensitive). The scheduler never mutates a
/// benchmark; interpretation happens in [`crate::watering`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WateringBenchmark {
    pub value: String,
    pub unit: String,
}

impl WateringBenchmark {
    pub fn new(value: impl Into<String>, unit: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            unit: unit.into(),
        }
    }
}
