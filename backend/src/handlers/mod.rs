//! HTTP handlers for the PlantCare API

pub mod auth;
pub mod catalog;
pub mod health;
pub mod plant;
pub mod user_plant;
pub mod watering;
pub mod weather;

pub use auth::*;
pub use catalog::*;
pub use health::*;
pub use plant::*;
pub use user_plant::*;
pub use watering::*;
pub use weather::*;
