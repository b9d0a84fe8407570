//! Route definitions for the PlantCare API

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes())
        // Global plant catalog (public, as in the upstream API)
        .nest("/plants", plant_routes())
        // Protected routes - the authenticated user's plants
        .nest("/me/plants", user_plant_routes())
        // Protected routes - weather forecasts
        .nest("/weather", weather_routes())
        // Protected routes - catalog import
        .nest("/catalog", catalog_routes())
}

/// Authentication routes (public)
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route("/refresh", post(handlers::refresh))
}

/// Global plant catalog routes (public)
fn plant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_plants).post(handlers::create_plant))
        .route("/name/:common_name", get(handlers::get_plant_by_name))
        .route(
            "/:plant_id",
            axum::routing::patch(handlers::update_plant).delete(handlers::delete_plant),
        )
}

/// User plant routes (protected)
fn user_plant_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_my_plants).post(handlers::add_my_plant))
        .route("/:user_plant_id", delete(handlers::remove_my_plant))
        .route(
            "/:user_plant_id/watering-schedule",
            get(handlers::get_watering_schedule),
        )
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Weather routes (protected)
fn weather_routes() -> Router<AppState> {
    Router::new()
        .route("/forecast", get(handlers::get_weather_forecast))
        .route_layer(middleware::from_fn(auth_middleware))
}

/// Catalog sync routes (protected)
fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(handlers::sync_catalog))
        .route_layer(middleware::from_fn(auth_middleware))
}
