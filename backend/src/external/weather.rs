//! Weather API client for fetching humidity forecasts
//!
//! Integrates with the WeatherAPI `forecast.json` endpoint. Only the fields
//! the watering pipeline consumes are deserialized; everything else in the
//! provider payload is ignored.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use shared::models::RawForecastDay;

/// Weather API client
#[derive(Clone)]
pub struct WeatherApiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// A provider forecast: the resolved location name plus the raw days
#[derive(Debug, Clone)]
pub struct ProviderForecast {
    pub city: String,
    pub days: Vec<RawForecastDay>,
}

/// WeatherAPI response for forecast.json
#[derive(Debug, Deserialize)]
struct WapiForecastResponse {
    location: WapiLocation,
    forecast: WapiForecast,
}

#[derive(Debug, Deserialize)]
struct WapiLocation {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WapiForecast {
    #[serde(default)]
    forecastday: Vec<RawForecastDay>,
}

impl WeatherApiClient {
    /// Create a new WeatherApiClient
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Fetch an N-day forecast for a city.
    ///
    /// `days` is passed through as-is; clamping to the provider plan limit is
    /// the caller's concern (see `WeatherService::determine_forecast_days`).
    pub async fn get_forecast(&self, city: &str, days: u32) -> AppResult<ProviderForecast> {
        let url = format!("{}/forecast.json", self.base_url);
        let days_param = days.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", city),
                ("days", days_param.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Weather API request failed for {}: {}", city, e);
                AppError::WeatherServiceUnavailable
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Weather API error for {}, status: {}", city, status);
            return Err(AppError::WeatherApiError(format!(
                "failed to fetch weather data for {} (status {})",
                city, status
            )));
        }

        let data: WapiForecastResponse = response.json().await.map_err(|e| {
            AppError::WeatherApiError(format!("failed to parse forecast response: {}", e))
        })?;

        if data.forecast.forecastday.is_empty() {
            tracing::warn!("Weather API returned no forecast days for {}", city);
            return Err(AppError::WeatherApiError(
                "empty or invalid forecast data returned".to_string(),
            ));
        }

        Ok(ProviderForecast {
            city: data.location.name,
            days: data.forecast.forecastday,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_payload_deserialization() {
        let body = serde_json::json!({
            "location": { "name": "Paris", "country": "France" },
            "forecast": {
                "forecastday": [
                    {
                        "date": "2026-08-06",
                        "day": { "avghumidity": 64.0, "maxtemp_c": 25.1 },
                        "hour": [
                            { "humidity": 70, "temp_c": 18.2 },
                            { "humidity": 58 }
                        ]
                    },
                    {
                        "date": "2026-08-07",
                        "day": { "avghumidity": 59.0 }
                    }
                ]
            }
        });

        let parsed: WapiForecastResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.location.name, "Paris");
        assert_eq!(parsed.forecast.forecastday.len(), 2);
        assert_eq!(parsed.forecast.forecastday[0].hour.len(), 2);
        assert_eq!(parsed.forecast.forecastday[0].hour[0].humidity, Some(70.0));
        // Second day has no hourly block at all
        assert!(parsed.forecast.forecastday[1].hour.is_empty());
        assert_eq!(
            parsed.forecast.forecastday[1]
                .day
                .as_ref()
                .and_then(|d| d.avghumidity),
            Some(59.0)
        );
    }
}
