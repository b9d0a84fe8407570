//! Plant catalog client
//!
//! Client for the Perenual species-details API, used by the catalog sync job
//! to import plants into the local database.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::WateringBenchmark;

/// Client for the external plant catalog
#[derive(Clone)]
pub struct PlantCatalogClient {
    base_url: String,
    api_key: String,
    http_client: Client,
}

/// Species details as returned by the catalog API
#[derive(Debug, Deserialize)]
pub struct CatalogSpecies {
    pub id: i32,
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Vec<String>,
    pub family: Option<String>,
    #[serde(default)]
    pub origin: Option<Vec<String>>,
    pub default_image: Option<CatalogImage>,
    pub watering_general_benchmark: Option<CatalogBenchmark>,
}

/// Image URLs attached to a species
#[derive(Debug, Deserialize)]
pub struct CatalogImage {
    pub regular_url: Option<String>,
    pub original_url: Option<String>,
    pub thumbnail: Option<String>,
}

/// Watering benchmark as the catalog sends it; both fields may be missing
#[derive(Debug, Deserialize)]
pub struct CatalogBenchmark {
    pub value: Option<String>,
    pub unit: Option<String>,
}

impl CatalogSpecies {
    /// Display name, `"Unknown"` when the catalog has none
    pub fn display_name(&self) -> String {
        self.common_name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Scientific names joined into one field
    pub fn scientific_name_joined(&self) -> Option<String> {
        if self.scientific_name.is_empty() {
            None
        } else {
            Some(self.scientific_name.join(", "))
        }
    }

    /// Origins joined into one field
    pub fn origin_joined(&self) -> Option<String> {
        self.origin
            .as_ref()
            .filter(|o| !o.is_empty())
            .map(|o| o.join(", "))
    }

    /// Best available image URL
    pub fn image_url(&self) -> Option<String> {
        self.default_image.as_ref().and_then(|img| {
            img.regular_url
                .clone()
                .or_else(|| img.original_url.clone())
                .or_else(|| img.thumbnail.clone())
        })
    }

    /// Benchmark with missing fields blanked out; the scheduler interprets
    /// blanks as "no benchmark" and falls back to its default
    pub fn benchmark(&self) -> WateringBenchmark {
        match &self.watering_general_benchmark {
            Some(b) => WateringBenchmark::new(
                b.value.clone().unwrap_or_default(),
                b.unit.clone().unwrap_or_default(),
            ),
            None => WateringBenchmark::new("", ""),
        }
    }
}

impl PlantCatalogClient {
    /// Create a new plant catalog client
    pub fn new(base_url: String, api_key: String) -> Self {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        Self {
            base_url,
            api_key,
            http_client,
        }
    }

    /// Fetch species details by catalog id
    pub async fn get_species(&self, species_id: i32) -> AppResult<CatalogSpecies> {
        let url = format!("{}/{}", self.base_url, species_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| AppError::CatalogApiError(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::CatalogApiError(format!(
                "species {} request failed with status {}",
                species_id, status
            )));
        }

        let species: CatalogSpecies = response.json().await.map_err(|e| {
            AppError::CatalogApiError(format!(
                "species {} returned empty or invalid data: {}",
                species_id, e
            ))
        })?;

        Ok(species)
    }
}
