//! User Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Administrator account
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// argon2 PHC string, never rendered
    #[serde(skip_serializing, default)]
    pub password: String,
    pub access_level: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
