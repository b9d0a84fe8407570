//! Database models for the PlantCare backend
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
