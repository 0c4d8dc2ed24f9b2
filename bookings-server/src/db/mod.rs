//! Database Module
//!
//! Handles the PostgreSQL connection pool and migrations

pub mod repository;

use chrono::Utc;
use shared::error::AppError;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

/// Database service, owns a PostgreSQL connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: PgPool,
}

impl DbService {
    /// Connect, then apply pending migrations (schema and seed rows)
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        tracing::info!(max_connections, "Database connection established (PostgreSQL)");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to apply migrations: {e}")))?;
        tracing::info!("Database migrations applied");

        Ok(Self { pool })
    }

    /// Create the administrator account unless one with `email` exists
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        let hash = crate::util::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        let now = Utc::now();
        let result = sqlx::query(
            "INSERT INTO users (first_name, last_name, email, password, access_level, created_at, updated_at)
             VALUES ('Admin', 'User', $1, $2, 3, $3, $3)
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(email)
        .bind(hash)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create admin user: {e}")))?;

        if result.rows_affected() > 0 {
            tracing::info!(email, "Administrator account created");
        }
        Ok(())
    }
}
