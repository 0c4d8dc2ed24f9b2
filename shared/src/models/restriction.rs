//! Restriction and RoomRestriction Models

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Reason code attached to a blocked date range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restriction {
    pub id: i64,
    pub restriction_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Seeded `restrictions` rows
pub struct RestrictionKind;

impl RestrictionKind {
    /// Occupancy created by a guest reservation
    pub const RESERVATION: i64 = 1;
    /// Manual block set by the owner from the calendar
    pub const OWNER_BLOCK: i64 = 2;
}

/// A room marked unavailable for `[start_date, end_date)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RoomRestriction {
    pub id: i64,
    pub room_id: i64,
    /// Absent for owner blocks
    pub reservation_id: Option<i64>,
    pub restriction_id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RoomRestriction {
    /// Occupancy row for a freshly inserted reservation
    pub fn for_reservation(
        reservation_id: i64,
        room_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            room_id,
            reservation_id: Some(reservation_id),
            restriction_id: RestrictionKind::RESERVATION,
            start_date,
            end_date,
            created_at: None,
            updated_at: None,
        }
    }

    /// One-day owner block starting at `start_date`
    pub fn owner_block(room_id: i64, start_date: NaiveDate) -> Self {
        Self {
            id: 0,
            room_id,
            reservation_id: None,
            restriction_id: RestrictionKind::OWNER_BLOCK,
            start_date,
            end_date: start_date + chrono::Duration::days(1),
            created_at: None,
            updated_at: None,
        }
    }

    pub fn is_owner_block(&self) -> bool {
        self.reservation_id.is_none()
    }
}
