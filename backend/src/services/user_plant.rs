//! User plant service: plants attached to a user account

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::models::{Plant, WateringBenchmark};
use shared::validation::validate_city;

/// Service for managing the plants a user owns
#[derive(Clone)]
pub struct UserPlantService {
    db: PgPool,
}

/// A plant owned by a user, with the catalog entry expanded
#[derive(Debug, Clone, Serialize)]
pub struct OwnedPlant {
    /// Pivot id linking user and plant; used for detach and schedule lookups
    pub id: Uuid,
    pub city: String,
    pub plant: Plant,
    pub added_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct OwnedPlantRow {
    id: Uuid,
    city: String,
    added_at: DateTime<Utc>,
    plant_id: Uuid,
    api_id: Option<i32>,
    common_name: String,
    scientific_name: Option<String>,
    family: Option<String>,
    origin: Option<String>,
    default_image: Option<String>,
    watering_general_benchmark: Json<WateringBenchmark>,
    plant_created_at: DateTime<Utc>,
    plant_updated_at: DateTime<Utc>,
}

impl From<OwnedPlantRow> for OwnedPlant {
    fn from(row: OwnedPlantRow) -> Self {
        OwnedPlant {
            id: row.id,
            city: row.city,
            added_at: row.added_at,
            plant: Plant {
                id: row.plant_id,
                api_id: row.api_id,
                common_name: row.common_name,
                scientific_name: row.scientific_name,
                family: row.family,
                origin: row.origin,
                default_image: row.default_image,
                watering_general_benchmark: row.watering_general_benchmark.0,
                created_at: row.plant_created_at,
                updated_at: row.plant_updated_at,
            },
        }
    }
}

const OWNED_PLANT_QUERY: &str = r#"
    SELECT up.id, up.city, up.created_at AS added_at,
           p.id AS plant_id, p.api_id, p.common_name, p.scientific_name, p.family,
           p.origin, p.default_image, p.watering_general_benchmark,
           p.created_at AS plant_created_at, p.updated_at AS plant_updated_at
    FROM user_plants up
    JOIN plants p ON p.id = up.plant_id
"#;

impl UserPlantService {
    /// Create a new UserPlantService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List all plants owned by a user
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<OwnedPlant>> {
        let rows = sqlx::query_as::<_, OwnedPlantRow>(&format!(
            "{OWNED_PLANT_QUERY} WHERE up.user_id = $1 ORDER BY up.created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(OwnedPlant::from).collect())
    }

    /// Get one owned plant by pivot id
    pub async fn get_owned(&self, user_id: Uuid, user_plant_id: Uuid) -> AppResult<OwnedPlant> {
        let row = sqlx::query_as::<_, OwnedPlantRow>(&format!(
            "{OWNED_PLANT_QUERY} WHERE up.id = $1 AND up.user_id = $2"
        ))
        .bind(user_plant_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User plant".to_string()))?;

        Ok(row.into())
    }

    /// Attach a catalog plant to a user by plant name.
    ///
    /// The name is matched like the catalog lookup (first ILIKE hit); the
    /// city is what the weather collaborator will be queried with.
    pub async fn attach(
        &self,
        user_id: Uuid,
        plant_name: &str,
        city: &str,
    ) -> AppResult<OwnedPlant> {
        validate_city(city).map_err(|e| AppError::Validation {
            field: "city".to_string(),
            message: e.to_string(),
            message_fr: "Ville invalide".to_string(),
        })?;

        let plant_id = sqlx::query_scalar::<_, Uuid>(
            "SELECT id FROM plants WHERE common_name ILIKE $1 ORDER BY common_name ASC LIMIT 1",
        )
        .bind(format!("%{}%", plant_name))
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Plant".to_string()))?;

        let pivot_id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO user_plants (user_id, plant_id, city)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(plant_id)
        .bind(city.trim())
        .fetch_one(&self.db)
        .await?;

        self.get_owned(user_id, pivot_id).await
    }

    /// Detach a plant from a user by pivot id
    pub async fn detach(&self, user_id: Uuid, user_plant_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM user_plants WHERE id = $1 AND user_id = $2")
            .bind(user_plant_id)
            .bind(user_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User plant".to_string()));
        }

        Ok(())
    }
}
