//! Weather forecast HTTP handlers

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::CurrentUser;
use crate::models::WeatherInfo;
use crate::services::WeatherService;
use crate::AppState;
use shared::forecast;

/// Query parameters for the forecast endpoint
#[derive(Debug, Deserialize)]
pub struct ForecastQuery {
    pub city: String,
    pub days: Option<u32>,
}

/// Fetch and normalize a humidity forecast for a city
pub async fn get_weather_forecast(
    State(state): State<AppState>,
    _current_user: CurrentUser,
    Query(query): Query<ForecastQuery>,
) -> AppResult<Json<WeatherInfo>> {
    let service = WeatherService::new(state.db.clone(), &state.config.weather);
    let days = query.days.unwrap_or(state.config.weather.max_forecast_days);

    let forecast = service.get_forecast(&query.city, days).await?;
    let daily_humidity = forecast::normalize(&forecast.days);

    Ok(Json(WeatherInfo {
        city: forecast.city,
        days: forecast.requested_days,
        daily_humidity,
        retrieved_at: forecast.retrieved_at,
    }))
}
