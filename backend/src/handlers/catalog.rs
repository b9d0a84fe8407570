//! Plant catalog sync HTTP handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::external::PlantCatalogClient;
use crate::middleware::CurrentUser;
use crate::services::catalog::{CatalogService, SyncStats};
use crate::AppState;

/// Query parameters for a catalog sync run
#[derive(Debug, Deserialize)]
pub struct SyncQuery {
    /// Number of catalog requests to make (defaults to 1)
    pub max: Option<u32>,
}

/// Trigger a plant catalog sync run
pub async fn sync_catalog(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<SyncQuery>,
) -> AppResult<Json<SyncStats>> {
    let client = PlantCatalogClient::new(
        state.config.catalog.base_url.clone(),
        state.config.catalog.api_key.clone(),
    );
    let service = CatalogService::new(state.db.clone(), client);

    let stats = service
        .fetch_and_store_plants(query.max.unwrap_or(1))
        .await?;
    Ok(Json(stats))
}
