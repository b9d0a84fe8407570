//! Plant catalog HTTP handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::services::plant::{CreatePlantInput, PlantService, UpdatePlantInput};
use crate::models::Plant;
use crate::AppState;
use shared::types::Pagination;

/// List plants in the global catalog
pub async fn list_plants(
    State(state): State<AppState>,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<serde_json::Value>> {
    let service = PlantService::new(state.db.clone());
    let plants = service.list_plants(&pagination).await?;
    Ok(Json(serde_json::json!({ "data": plants })))
}

/// Get a plant by (a fragment of) its common name
pub async fn get_plant_by_name(
    State(state): State<AppState>,
    Path(common_name): Path<String>,
) -> AppResult<Json<Plant>> {
    let service = PlantService::new(state.db.clone());
    let plant = service.get_by_name(&common_name).await?;
    Ok(Json(plant))
}

/// Create a plant in the global catalog
pub async fn create_plant(
    State(state): State<AppState>,
    Json(input): Json<CreatePlantInput>,
) -> AppResult<(StatusCode, Json<Plant>)> {
    let service = PlantService::new(state.db.clone());
    let plant = service.create_plant(input).await?;
    Ok((StatusCode::CREATED, Json(plant)))
}

/// Update a plant; benchmark fields merge over the stored benchmark
pub async fn update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
    Json(input): Json<UpdatePlantInput>,
) -> AppResult<Json<Plant>> {
    let service = PlantService::new(state.db.clone());
    let plant = service.update_plant(plant_id, input).await?;
    Ok(Json(plant))
}

/// Delete a plant
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = PlantService::new(state.db.clone());
    service.delete_plant(plant_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
