//! HTTP handlers for the authenticated user's plants

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::services::user_plant::{OwnedPlant, UserPlantService};
use crate::models::{WateringResult, WeatherInfo};
use crate::services::WateringService;
use crate::AppState;

#[derive(Deserialize, Validate)]
pub struct AddUserPlantRequest {
    #[validate(length(min = 1, max = 255))]
    pub plant_name: String,
    #[validate(length(min = 1, max = 255))]
    pub city: String,
}

/// Response for adding a plant; the watering fields are absent when the
/// weather collaborator failed (the plant is attached regardless)
#[derive(Serialize)]
pub struct AddUserPlantResponse {
    pub message: String,
    pub plant: OwnedPlant,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weather_info: Option<WeatherInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering_calculation: Option<WateringResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// List the authenticated user's plants
pub async fn list_my_plants(
    State(state): State<AppState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<OwnedPlant>>> {
    let service = UserPlantService::new(state.db.clone());
    let plants = service.list_for_user(current_user.0.user_id).await?;
    Ok(Json(plants))
}

/// Attach a catalog plant to the authenticated user and compute its first
/// watering schedule
pub async fn add_my_plant(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Json(body): Json<AddUserPlantRequest>,
) -> AppResult<Json<AddUserPlantResponse>> {
    body.validate()
        .map_err(|e| AppError::ValidationError(e.to_string()))?;

    let service = UserPlantService::new(state.db.clone());
    let owned = service
        .attach(current_user.0.user_id, &body.plant_name, &body.city)
        .await?;

    let watering = WateringService::new(state.db.clone(), &state.config);
    match watering
        .schedule_for(&owned.plant.watering_general_benchmark, &owned.city)
        .await
    {
        Ok(schedule) => Ok(Json(AddUserPlantResponse {
            message: "Plant added to user successfully".to_string(),
            plant: owned,
            weather_info: Some(schedule.weather_info),
            watering_calculation: Some(schedule.watering_calculation),
            error: None,
        })),
        Err(e) => {
            // The plant is already attached; report the schedule as
            // unavailable instead of failing the request
            tracing::error!(
                "Plant attached but watering calculation unavailable for {}: {}",
                owned.city,
                e
            );
            Ok(Json(AddUserPlantResponse {
                message:
                    "Plant added to user successfully, but weather/watering calculation unavailable"
                        .to_string(),
                plant: owned,
                weather_info: None,
                watering_calculation: None,
                error: Some(format!(
                    "Weather/watering calculation could not be completed: {}",
                    e
                )),
            }))
        }
    }
}

/// Detach a plant from the authenticated user
pub async fn remove_my_plant(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_plant_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    let service = UserPlantService::new(state.db.clone());
    service
        .detach(current_user.0.user_id, user_plant_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
