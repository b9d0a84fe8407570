//! Business logic services for the PlantCare backend

pub mod auth;
pub mod catalog;
pub mod plant;
pub mod user_plant;
pub mod watering;
pub mod weather;

pub use auth::AuthService;
pub use catalog::CatalogService;
pub use plant::PlantService;
pub use user_plant::UserPlantService;
pub use watering::WateringService;
pub use weather::WeatherService;
