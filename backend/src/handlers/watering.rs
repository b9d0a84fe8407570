//! Watering schedule HTTP handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::services::watering::{WateringSchedule, WateringService};
use crate::AppState;

/// Recompute the watering schedule for one of the user's plants
pub async fn get_watering_schedule(
    State(state): State<AppState>,
    current_user: CurrentUser,
    Path(user_plant_id): Path<Uuid>,
) -> AppResult<Json<WateringSchedule>> {
    let service = WateringService::new(state.db.clone(), &state.config);
    let schedule = service
        .schedule_for_user_plant(current_user.0.user_id, user_plant_id)
        .await?;
    Ok(Json(schedule))
}
