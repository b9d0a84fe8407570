//! Weather service: cache-then-fetch forecast orchestration
//!
//! Forecast responses are cached in Postgres behind the [`ForecastCache`]
//! capability so the rest of the pipeline never knows whether a series came
//! from a cache hit or a live fetch.

use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::config::WeatherConfig;
use crate::error::{AppError, AppResult};
use crate::external::weather::{ProviderForecast, WeatherApiClient};
use shared::models::{RawForecastDay, WateringBenchmark};
use shared::watering::{extract_average_days, BenchmarkDays};

/// A forecast ready for normalization, whatever its origin
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Location name as resolved by the provider
    pub city: String,
    /// Number of days that were requested
    pub requested_days: u32,
    pub days: Vec<RawForecastDay>,
    pub retrieved_at: DateTime<Utc>,
}

/// Capability interface for forecast caching
#[axum::async_trait]
pub trait ForecastCache: Send + Sync {
    async fn get(&self, key: &str) -> AppResult<Option<CachedForecast>>;
    async fn put(&self, key: &str, forecast: &ProviderForecast, ttl: Duration) -> AppResult<()>;
}

/// A cached provider forecast
#[derive(Debug, Clone)]
pub struct CachedForecast {
    pub city: String,
    pub days: Vec<RawForecastDay>,
    pub fetched_at: DateTime<Utc>,
}

/// Postgres-backed forecast cache
#[derive(Clone)]
pub struct PgForecastCache {
    db: PgPool,
}

#[derive(sqlx::FromRow)]
struct CacheRow {
    city: String,
    payload: serde_json::Value,
    fetched_at: DateTime<Utc>,
}

impl PgForecastCache {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[axum::async_trait]
impl ForecastCache for PgForecastCache {
    async fn get(&self, key: &str) -> AppResult<Option<CachedForecast>> {
        let row = sqlx::query_as::<_, CacheRow>(
            r#"
            SELECT city, payload, fetched_at
            FROM weather_forecast_cache
            WHERE cache_key = $1 AND expires_at > NOW()
            ORDER BY fetched_at DESC
            LIMIT 1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.db)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let days: Vec<RawForecastDay> = serde_json::from_value(row.payload)
            .map_err(|e| AppError::Internal(format!("corrupt cached forecast: {}", e)))?;

        Ok(Some(CachedForecast {
            city: row.city,
            days,
            fetched_at: row.fetched_at,
        }))
    }

    async fn put(&self, key: &str, forecast: &ProviderForecast, ttl: Duration) -> AppResult<()> {
        let payload = serde_json::to_value(&forecast.days)
            .map_err(|e| AppError::Internal(e.to_string()))?;
        let expires_at = Utc::now() + ttl;

        sqlx::query(
            r#"
            INSERT INTO weather_forecast_cache (cache_key, city, payload, expires_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (cache_key)
            DO UPDATE SET city = $2, payload = $3, expires_at = $4, fetched_at = NOW()
            "#,
        )
        .bind(key)
        .bind(&forecast.city)
        .bind(&payload)
        .bind(expires_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

/// Weather service for fetching city forecasts
#[derive(Clone)]
pub struct WeatherService {
    cache: Arc<dyn ForecastCache>,
    client: WeatherApiClient,
    max_forecast_days: u32,
    cache_ttl: Duration,
}

impl WeatherService {
    /// Create a WeatherService with a Postgres-backed cache
    pub fn new(db: PgPool, config: &WeatherConfig) -> Self {
        Self::with_cache(Arc::new(PgForecastCache::new(db)), config)
    }

    /// Create a WeatherService with a custom cache implementation
    pub fn with_cache(cache: Arc<dyn ForecastCache>, config: &WeatherConfig) -> Self {
        Self {
            cache,
            client: WeatherApiClient::new(config.base_url.clone(), config.api_key.clone()),
            max_forecast_days: config.max_forecast_days,
            cache_ttl: Duration::minutes(config.cache_ttl_minutes),
        }
    }

    /// How many forecast days to request for a benchmark.
    ///
    /// Ranged benchmarks need the range maximum covered; unsupported units
    /// and unparseable values fall back to the provider plan maximum. The
    /// result always lands in [1, max_forecast_days].
    pub fn determine_forecast_days(&self, benchmark: &WateringBenchmark) -> u32 {
        let max = self.max_forecast_days.max(1);

        let days = match extract_average_days(benchmark) {
            BenchmarkDays::Single(days) => days,
            BenchmarkDays::Range { max: upper, .. } => upper,
            BenchmarkDays::Default | BenchmarkDays::Unparseable => return max,
        };

        (days.floor() as i64).clamp(1, max as i64) as u32
    }

    /// Fetch an N-day forecast for a city, from cache when fresh
    pub async fn get_forecast(&self, city: &str, days: u32) -> AppResult<Forecast> {
        let days = days.clamp(1, self.max_forecast_days.max(1));
        let key = cache_key(city, days);

        if let Some(cached) = self.cache.get(&key).await? {
            tracing::info!("Weather data retrieved from cache for {}", city);
            return Ok(Forecast {
                city: cached.city,
                requested_days: days,
                days: cached.days,
                retrieved_at: cached.fetched_at,
            });
        }

        let fetched = self.client.get_forecast(city, days).await?;
        let retrieved_at = Utc::now();

        if let Err(e) = self.cache.put(&key, &fetched, self.cache_ttl).await {
            // A cache failure must not fail the request
            tracing::warn!("Failed to cache forecast for {}: {}", city, e);
        }

        Ok(Forecast {
            city: fetched.city,
            requested_days: days,
            days: fetched.days,
            retrieved_at,
        })
    }
}

/// Cache key for one city/day-count combination
fn cache_key(city: &str, days: u32) -> String {
    format!(
        "weather_forecast_{}_{}_days",
        city.trim().to_lowercase(),
        days
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_normalizes_city() {
        assert_eq!(cache_key("Paris", 5), "weather_forecast_paris_5_days");
        assert_eq!(cache_key("  New York ", 3), "weather_forecast_new york_3_days");
    }

    fn service(max_days: u32) -> WeatherService {
        let config = crate::config::WeatherConfig {
            base_url: "https://api.weatherapi.com/v1".to_string(),
            api_key: "test".to_string(),
            max_forecast_days: max_days,
            cache_ttl_minutes: 60,
        };

        struct NoCache;

        #[axum::async_trait]
        impl ForecastCache for NoCache {
            async fn get(&self, _key: &str) -> AppResult<Option<CachedForecast>> {
                Ok(None)
            }
            async fn put(
                &self,
                _key: &str,
                _forecast: &ProviderForecast,
                _ttl: Duration,
            ) -> AppResult<()> {
                Ok(())
            }
        }

        WeatherService::with_cache(Arc::new(NoCache), &config)
    }

    #[test]
    fn test_forecast_days_from_single_value() {
        let svc = service(5);
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("3", "days")),
            3
        );
    }

    #[test]
    fn test_forecast_days_clamped_to_plan_maximum() {
        let svc = service(5);
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("6-12", "days")),
            5
        );
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("14", "days")),
            5
        );
    }

    #[test]
    fn test_forecast_days_range_uses_upper_bound() {
        let svc = service(10);
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("2-4", "days")),
            4
        );
    }

    #[test]
    fn test_forecast_days_fallbacks() {
        let svc = service(5);
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("7", "weeks")),
            5
        );
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("often", "days")),
            5
        );
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("", "")),
            5
        );
    }

    #[test]
    fn test_forecast_days_never_below_one() {
        let svc = service(5);
        assert_eq!(
            svc.determine_forecast_days(&WateringBenchmark::new("0.5", "days")),
            1
        );
    }
}
