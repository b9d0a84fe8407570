//! Plant catalog sync service
//!
//! Imports species from the external plant catalog into the local `plants`
//! table, walking catalog ids in ascending order up to a request budget.
//! Individual failures are counted and logged; a sync run never aborts.

use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::external::plant_catalog::{CatalogSpecies, PlantCatalogClient};

/// Catalog sync service
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
    client: PlantCatalogClient,
}

/// Summary of one sync run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SyncStats {
    pub processed: u32,
    pub created: u32,
    pub updated: u32,
    pub errors: u32,
}

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool, client: PlantCatalogClient) -> Self {
        Self { db, client }
    }

    /// Fetch up to `max_requests` species from the catalog and upsert them
    pub async fn fetch_and_store_plants(&self, max_requests: u32) -> AppResult<SyncStats> {
        let mut stats = SyncStats::default();

        tracing::info!("Starting plant sync from catalog ({} requests)", max_requests);

        for species_id in 1..=max_requests.max(1) as i32 {
            stats.processed += 1;

            let species = match self.client.get_species(species_id).await {
                Ok(species) => species,
                Err(e) => {
                    stats.errors += 1;
                    tracing::error!("Species {} fetch failed: {}", species_id, e);
                    continue;
                }
            };

            match self.upsert_species(&species).await {
                Ok(true) => stats.created += 1,
                Ok(false) => stats.updated += 1,
                Err(e) => {
                    stats.errors += 1;
                    tracing::error!("Failed to save species {}: {}", species_id, e);
                }
            }
        }

        tracing::info!(
            processed = stats.processed,
            created = stats.created,
            updated = stats.updated,
            errors = stats.errors,
            "Plant sync completed"
        );

        Ok(stats)
    }

    /// Upsert one species keyed by its catalog id; returns true when created
    async fn upsert_species(&self, species: &CatalogSpecies) -> AppResult<bool> {
        let existing = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM plants WHERE api_id = $1)",
        )
        .bind(species.id)
        .fetch_one(&self.db)
        .await?;

        let benchmark = species.benchmark();

        if existing {
            sqlx::query(
                r#"
                UPDATE plants
                SET common_name = $1, scientific_name = $2, family = $3, origin = $4,
                    default_image = $5, watering_general_benchmark = $6, updated_at = NOW()
                WHERE api_id = $7
                "#,
            )
            .bind(species.display_name())
            .bind(species.scientific_name_joined())
            .bind(&species.family)
            .bind(species.origin_joined())
            .bind(species.image_url())
            .bind(Json(&benchmark))
            .bind(species.id)
            .execute(&self.db)
            .await?;

            Ok(false)
        } else {
            sqlx::query(
                r#"
                INSERT INTO plants (api_id, common_name, scientific_name, family, origin,
                                    default_image, watering_general_benchmark)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                "#,
            )
            .bind(species.id)
            .bind(species.display_name())
            .bind(species.scientific_name_joined())
            .bind(&species.family)
            .bind(species.origin_joined())
            .bind(species.image_url())
            .bind(Json(&benchmark))
            .execute(&self.db)
            .await?;

            Ok(true)
        }
    }
}
