//! Watering schedule orchestration
//!
//! Runs the full pipeline for one plant: benchmark → forecast fetch →
//! normalization → schedule calculation. The calculation itself lives in
//! `shared::watering` and stays pure; this service supplies its inputs.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::services::weather::WeatherService;
use shared::forecast;
use shared::models::{WateringBenchmark, WateringResult, WeatherInfo};
use shared::watering::calculate_next_watering;

/// Watering service for computing schedules
#[derive(Clone)]
pub struct WateringService {
    db: PgPool,
    weather: WeatherService,
}

/// A computed schedule together with the forecast it was based on
#[derive(Debug, Clone, Serialize)]
pub struct WateringSchedule {
    pub weather_info: WeatherInfo,
    pub watering_calculation: WateringResult,
}

#[derive(sqlx::FromRow)]
struct OwnedPlantRow {
    city: String,
    watering_general_benchmark: sqlx::types::Json<WateringBenchmark>,
}

impl WateringService {
    /// Create a new WateringService instance
    pub fn new(db: PgPool, config: &Config) -> Self {
        let weather = WeatherService::new(db.clone(), &config.weather);
        Self { db, weather }
    }

    /// Compute the watering schedule for one of a user's plants
    pub async fn schedule_for_user_plant(
        &self,
        user_id: Uuid,
        user_plant_id: Uuid,
    ) -> AppResult<WateringSchedule> {
        let row = sqlx::query_as::<_, OwnedPlantRow>(
            r#"
            SELECT up.city, p.watering_general_benchmark
            FROM user_plants up
            JOIN plants p ON p.id = up.plant_id
            WHERE up.id = $1 AND up.user_id = $2
            "#,
        )
        .bind(user_plant_id)
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("User plant".to_string()))?;

        self.schedule_for(&row.watering_general_benchmark.0, &row.city)
            .await
    }

    /// Compute a schedule from a benchmark and a city
    pub async fn schedule_for(
        &self,
        benchmark: &WateringBenchmark,
        city: &str,
    ) -> AppResult<WateringSchedule> {
        let days = self.weather.determine_forecast_days(benchmark);
        let forecast = self.weather.get_forecast(city, days).await?;

        let daily_humidity = forecast::normalize(&forecast.days);
        let watering_calculation = calculate_next_watering(benchmark, &daily_humidity);

        Ok(WateringSchedule {
            weather_info: WeatherInfo {
                city: forecast.city,
                days: forecast.requested_days,
                daily_humidity,
                retrieved_at: forecast.retrieved_at,
            },
            watering_calculation,
        })
    }
}
