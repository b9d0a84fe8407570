//! Plant catalog service for global plant CRUD

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Plant, WateringBenchmark};
use shared::types::Pagination;
use shared::validation::validate_benchmark;

/// Plant service for managing the global plant catalog
#[derive(Clone)]
pub struct PlantService {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct PlantRow {
    id: Uuid,
    api_id: Option<i32>,
    common_name: String,
    scientific_name: Option<String>,
    family: Option<String>,
    origin: Option<String>,
    default_image: Option<String>,
    watering_general_benchmark: Json<WateringBenchmark>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PlantRow> for Plant {
    fn from(row: PlantRow) -> Self {
        Plant {
            id: row.id,
            api_id: row.api_id,
            common_name: row.common_name,
            scientific_name: row.scientific_name,
            family: row.family,
            origin: row.origin,
            default_image: row.default_image,
            watering_general_benchmark: row.watering_general_benchmark.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a plant
#[derive(Debug, Deserialize)]
pub struct CreatePlantInput {
    pub common_name: String,
    pub watering_general_benchmark: WateringBenchmark,
    pub scientific_name: Option<String>,
    pub family: Option<String>,
    pub origin: Option<String>,
    pub default_image: Option<String>,
}

/// Input for updating a plant; benchmark fields merge over the existing ones
#[derive(Debug, Deserialize)]
pub struct UpdatePlantInput {
    pub common_name: Option<String>,
    pub watering_general_benchmark: Option<UpdateBenchmarkInput>,
}

/// Partial benchmark update
#[derive(Debug, Deserialize)]
pub struct UpdateBenchmarkInput {
    pub value: Option<String>,
    pub unit: Option<String>,
}

const PLANT_COLUMNS: &str = "id, api_id, common_name, scientific_name, family, origin, \
                             default_image, watering_general_benchmark, created_at, updated_at";

impl PlantService {
    /// Create a new PlantService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List plants, newest first
    pub async fn list_plants(&self, pagination: &Pagination) -> AppResult<Vec<Plant>> {
        let rows = sqlx::query_as::<_, PlantRow>(&format!(
            "SELECT {PLANT_COLUMNS} FROM plants ORDER BY common_name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(Plant::from).collect())
    }

    /// Find the first plant whose common name contains the given fragment
    pub async fn get_by_name(&self, common_name: &str) -> AppResult<Plant> {
        let row = sqlx::query_as::<_, PlantRow>(&format!(
            "SELECT {PLANT_COLUMNS} FROM plants WHERE common_name ILIKE $1 ORDER BY common_name ASC LIMIT 1"
        ))
        .bind(format!("%{}%", common_name))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Plant".to_string()))?;

        Ok(row.into())
    }

    /// Create a new plant
    pub async fn create_plant(&self, input: CreatePlantInput) -> AppResult<Plant> {
        if input.common_name.trim().is_empty() {
            return Err(AppError::Validation {
                field: "common_name".to_string(),
                message: "Common name cannot be empty".to_string(),
                message_fr: "Le nom commun ne peut pas etre vide".to_string(),
            });
        }
        validate_benchmark(&input.watering_general_benchmark)
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let row = sqlx::query_as::<_, PlantRow>(&format!(
            r#"
            INSERT INTO plants (common_name, scientific_name, family, origin, default_image,
                                watering_general_benchmark)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {PLANT_COLUMNS}
            "#
        ))
        .bind(input.common_name.trim())
        .bind(&input.scientific_name)
        .bind(&input.family)
        .bind(&input.origin)
        .bind(&input.default_image)
        .bind(Json(&input.watering_general_benchmark))
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Update a plant; partial benchmark input merges over the stored object
    pub async fn update_plant(&self, plant_id: Uuid, input: UpdatePlantInput) -> AppResult<Plant> {
        let existing = sqlx::query_as::<_, PlantRow>(&format!(
            "SELECT {PLANT_COLUMNS} FROM plants WHERE id = $1"
        ))
        .bind(plant_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Plant".to_string()))?;

        let common_name = input
            .common_name
            .unwrap_or_else(|| existing.common_name.clone());

        let mut benchmark = existing.watering_general_benchmark.0.clone();
        if let Some(partial) = input.watering_general_benchmark {
            if let Some(value) = partial.value {
                benchmark.value = value;
            }
            if let Some(unit) = partial.unit {
                benchmark.unit = unit;
            }
        }

        let row = sqlx::query_as::<_, PlantRow>(&format!(
            r#"
            UPDATE plants
            SET common_name = $1, watering_general_benchmark = $2, updated_at = NOW()
            WHERE id = $3
            RETURNING {PLANT_COLUMNS}
            "#
        ))
        .bind(common_name.trim())
        .bind(Json(&benchmark))
        .bind(plant_id)
        .fetch_one(&self.db)
        .await?;

        Ok(row.into())
    }

    /// Delete a plant
    pub async fn delete_plant(&self, plant_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM plants WHERE id = $1")
            .bind(plant_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Plant".to_string()));
        }

        Ok(())
    }
}
