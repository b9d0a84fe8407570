//! User account models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user account on the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A plant owned by a user, tied to the city it lives in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPlant {
    pub id: Uuid,
    pub user_id: Uuid,
    pub plant_id: Uuid,
    /// City used to fetch the humidity forecast for this plant
    pub city: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
