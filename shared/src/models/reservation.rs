//! Reservation Model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Room;

/// Guest reservation for `[start_date, end_date)` in one room
///
/// `room` is joined in by the listing queries and is not a column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub room_id: i64,
    /// 0 = new, anything else = processed
    pub processed: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[cfg_attr(feature = "db", sqlx(skip))]
    #[serde(default)]
    pub room: Room,
}

impl Reservation {
    /// A stay without guest details yet (search → choose room → form)
    pub fn pending(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: 0,
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            start_date,
            end_date,
            room_id: 0,
            processed: 0,
            created_at: None,
            updated_at: None,
            room: Room::default(),
        }
    }

    pub fn is_processed(&self) -> bool {
        self.processed != 0
    }

    /// Number of nights in the stay
    pub fn nights(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Guest fields an administrator may edit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

impl ReservationUpdate {
    pub fn apply_to(self, reservation: &mut Reservation) {
        reservation.first_name = self.first_name;
        reservation.last_name = self.last_name;
        reservation.email = self.email;
        reservation.phone = self.phone;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_reservation_is_new() {
        let start = NaiveDate::from_ymd_opt(2050, 1, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2050, 1, 4).unwrap();
        let r = Reservation::pending(start, end);
        assert!(!r.is_processed());
        assert_eq!(r.nights(), 3);
        assert_eq!(r.room_id, 0);
    }

    #[test]
    fn test_session_roundtrip_keeps_joined_room() {
        let start = NaiveDate::from_ymd_opt(2050, 1, 1).unwrap();
        let mut r = Reservation::pending(start, start + chrono::Duration::days(1));
        r.room = Room::new(1, "General's Quarters");
        let json = serde_json::to_value(&r).unwrap();
        assert_eq!(json["start_date"], "2050-01-01");
        let back: Reservation = serde_json::from_value(json).unwrap();
        assert_eq!(back.room.room_name, "General's Quarters");
    }
}
