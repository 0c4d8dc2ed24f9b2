//! Repository Module
//!
//! [`DatabaseRepo`] is the only persistence capability handlers see.
//! [`PostgresRepo`] backs the running site, [`MemoryRepo`] backs tests and
//! database-less development runs. Both apply the same overlap predicates:
//!
//! - availability: `existing.start_date < end AND existing.end_date > start`
//! - calendar:     `existing.start_date <= end AND existing.end_date > start`

pub mod memory;
pub mod postgres;

pub use memory::MemoryRepo;
pub use postgres::PostgresRepo;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::error::{AppError, ErrorCode};
use shared::models::{Reservation, Room, RoomRestriction, User};
use std::time::Duration;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Incorrect password")]
    InvalidCredentials,

    #[error("Database call exceeded its {0:?} deadline")]
    Timeout(Duration),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepoError::NotFound("row".into()),
            other => RepoError::Database(other.to_string()),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(what) => AppError::not_found(what),
            RepoError::InvalidCredentials => AppError::invalid_credentials(),
            RepoError::Timeout(after) => {
                AppError::timeout(format!("database deadline of {after:?} exceeded"))
            }
            RepoError::Database(msg) => AppError::with_message(ErrorCode::DatabaseError, msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Persistence capability used by the reservation workflow and admin pages
#[async_trait]
pub trait DatabaseRepo: Send + Sync {
    // ── Availability ────────────────────────────────────────────────

    /// True iff no restriction on `room_id` overlaps `[start, end)`
    async fn search_availability_by_dates_by_room_id(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        room_id: i64,
    ) -> RepoResult<bool>;

    /// Rooms with no restriction overlapping `[start, end)`; empty is not an error
    async fn search_availability_for_all_rooms(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<Room>>;

    // ── Rooms ───────────────────────────────────────────────────────

    async fn get_room_by_id(&self, id: i64) -> RepoResult<Room>;

    /// All rooms ordered by name
    async fn all_rooms(&self) -> RepoResult<Vec<Room>>;

    // ── Reservations ────────────────────────────────────────────────

    /// Insert guest fields, dates and room; returns the new id
    async fn insert_reservation(&self, reservation: &Reservation) -> RepoResult<i64>;

    async fn insert_room_restriction(&self, restriction: &RoomRestriction) -> RepoResult<()>;

    /// Insert a reservation and its occupancy restriction as one unit
    async fn insert_reservation_with_restriction(
        &self,
        reservation: &Reservation,
    ) -> RepoResult<i64>;

    /// All reservations by `start_date` ascending, room joined
    async fn all_reservations(&self) -> RepoResult<Vec<Reservation>>;

    /// Unprocessed reservations by `start_date` ascending, room joined
    async fn all_new_reservations(&self) -> RepoResult<Vec<Reservation>>;

    async fn get_reservation_by_id(&self, id: i64) -> RepoResult<Reservation>;

    /// Update guest fields of `reservation.id`
    async fn update_reservation(&self, reservation: &Reservation) -> RepoResult<()>;

    async fn delete_reservation(&self, id: i64) -> RepoResult<()>;

    async fn update_processed_for_reservation(&self, id: i64, processed: i32) -> RepoResult<()>;

    // ── Calendar blocks ─────────────────────────────────────────────

    /// Restriction rows of `room_id` touching `[start, end]` (inclusive upper bound)
    async fn get_restrictions(
        &self,
        room_id: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<RoomRestriction>>;

    /// One-day owner block `[start_date, start_date + 1)`
    async fn insert_block_for_room(&self, room_id: i64, start_date: NaiveDate) -> RepoResult<()>;

    /// Delete one room_restrictions row by its own id
    async fn delete_block_by_id(&self, restriction_id: i64) -> RepoResult<()>;

    // ── Users ───────────────────────────────────────────────────────

    async fn get_user_by_id(&self, id: i64) -> RepoResult<User>;

    async fn update_user(&self, user: &User) -> RepoResult<()>;

    /// Returns `(id, password_hash)` when `password` matches the stored hash
    async fn authenticate(&self, email: &str, password: &str) -> RepoResult<(i64, String)>;
}
