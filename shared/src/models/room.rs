//! Room Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Room entity (seeded reference data, never mutated by the site)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Room {
    pub id: i64,
    pub room_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Room {
    pub fn new(id: i64, room_name: impl Into<String>) -> Self {
        Self {
            id,
            room_name: room_name.into(),
            ..Default::default()
        }
    }
}
