//! Trading-weekday calendar.
//!
//! Market holidays are not modeled: a holiday weekday simply comes back
//! from the provider with no results and produces no aggregate row.

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// All weekdays in the inclusive range `[start, end]`, ascending.
pub fn weekdays(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
            days.push(current);
        }
        current += Duration::days(1);
    }
    days
}
