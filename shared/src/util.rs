//! Date helpers shared by handlers and repositories

use chrono::NaiveDate;

/// Layout used by every date field on the site (`2050-01-31`)
pub const DATE_LAYOUT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` form value
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_LAYOUT).ok()
}

/// Format a date the way forms expect it back
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_LAYOUT).to_string()
}

/// Strict half-open overlap test: `[a_start, a_end)` intersects `[b_start, b_end)`
pub fn overlaps(a_start: NaiveDate, a_end: NaiveDate, b_start: NaiveDate, b_end: NaiveDate) -> bool {
    a_start < b_end && a_end > b_start
}
