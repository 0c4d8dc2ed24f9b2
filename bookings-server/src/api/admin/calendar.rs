//! Month view of room restrictions

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use shared::models::{Room, RoomRestriction};
use shared::util::format_date;

/// One calendar month, `first` is always day 1
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Month {
    pub first: NaiveDate,
}

impl Month {
    /// Month containing `year`/`month`, or `None` for an impossible month
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|first| Self { first })
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first: date.with_day(1).unwrap_or(date),
        }
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    pub fn month(&self) -> u32 {
        self.first.month()
    }

    pub fn next(&self) -> Self {
        Self {
            first: self.first.checked_add_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn previous(&self) -> Self {
        Self {
            first: self.first.checked_sub_months(Months::new(1)).unwrap_or(self.first),
        }
    }

    pub fn last(&self) -> NaiveDate {
        self.next().first.pred_opt().unwrap_or(self.first)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        self.first.iter_days().take_while({
            let last = self.last();
            move |d| *d <= last
        })
    }
}

/// One cell of a room row
#[derive(Debug, Clone, Serialize)]
pub struct Day {
    pub day: u32,
    pub date: String,
    /// Guest reservation occupying the night of `date`
    pub reservation_id: Option<i64>,
    /// Owner block row covering `date`
    pub block_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomRow {
    pub room: Room,
    pub days: Vec<Day>,
}

/// Lay `restrictions` of `room` out over the days of `month`
pub fn room_row(room: Room, month: Month, restrictions: &[RoomRestriction]) -> RoomRow {
    let days = month
        .days()
        .map(|date| {
            let covering = |rr: &&RoomRestriction| rr.start_date <= date && date < rr.end_date;
            let reservation_id = restrictions
                .iter()
                .filter(covering)
                .find_map(|rr| rr.reservation_id);
            let block_id = restrictions
                .iter()
                .filter(covering)
                .find(|rr| rr.is_owner_block())
                .map(|rr| rr.id);
            Day {
                day: date.day(),
                date: format_date(date),
                reservation_id,
                block_id,
            }
        })
        .collect();
    RoomRow { room, days }
}

/// Form key of the checkbox that keeps an existing block
pub fn remove_block_key(room_id: i64, restriction_id: i64) -> String {
    format!("remove_block_{room_id}_{restriction_id}")
}

/// Hidden marker rendered next to every block checkbox; only marked blocks
/// may be removed by a save
pub fn shown_block_key(room_id: i64, restriction_id: i64) -> String {
    format!("shown_block_{room_id}_{restriction_id}")
}

/// Parse `add_block_{room}_{date}` into the room and day to block
pub fn parse_add_block_key(key: &str) -> Option<(i64, NaiveDate)> {
    let rest = key.strip_prefix("add_block_")?;
    let (room, date) = rest.split_once('_')?;
    Some((room.parse().ok()?, shared::util::parse_date(date)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::util::parse_date;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        let feb = Month::new(2052, 2).unwrap();
        assert_eq!(feb.last(), d("2052-02-29"));
        assert_eq!(feb.days().count(), 29);
        assert_eq!(feb.next(), Month::new(2052, 3).unwrap());
        assert_eq!(Month::new(2052, 1).unwrap().previous(), Month::new(2051, 12).unwrap());
        assert!(Month::new(2052, 13).is_none());
    }

    #[test]
    fn test_room_row_marks_nights_and_blocks() {
        let month = Month::new(2050, 1).unwrap();
        let mut stay = RoomRestriction::for_reservation(7, 1, d("2050-01-10"), d("2050-01-12"));
        stay.id = 1;
        let mut block = RoomRestriction::owner_block(1, d("2050-01-20"));
        block.id = 2;

        let row = room_row(Room::new(1, "General's Quarters"), month, &[stay, block]);
        assert_eq!(row.days.len(), 31);
        assert_eq!(row.days[9].reservation_id, Some(7));
        assert_eq!(row.days[10].reservation_id, Some(7));
        // checkout day is free
        assert_eq!(row.days[11].reservation_id, None);
        assert_eq!(row.days[19].block_id, Some(2));
        assert_eq!(row.days[20].block_id, None);
    }

    #[test]
    fn test_room_row_keeps_block_under_reservation() {
        let month = Month::new(2050, 1).unwrap();
        let mut block = RoomRestriction::owner_block(1, d("2050-01-10"));
        block.id = 3;
        let mut stay = RoomRestriction::for_reservation(8, 1, d("2050-01-09"), d("2050-01-12"));
        stay.id = 4;

        let row = room_row(Room::new(1, "General's Quarters"), month, &[block, stay]);
        assert_eq!(row.days[9].reservation_id, Some(8));
        assert_eq!(row.days[9].block_id, Some(3));
    }

    #[test]
    fn test_add_block_key() {
        assert_eq!(
            parse_add_block_key("add_block_2_2050-01-05"),
            Some((2, d("2050-01-05")))
        );
        assert_eq!(parse_add_block_key("remove_block_2_5"), None);
        assert_eq!(parse_add_block_key("add_block_x_2050-01-05"), None);
        assert_eq!(remove_block_key(2, 5), "remove_block_2_5");
        assert_eq!(shown_block_key(2, 5), "shown_block_2_5");
    }
}
