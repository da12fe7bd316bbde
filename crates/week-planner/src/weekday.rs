//! Weekday arithmetic relative to a configurable first day of the week.
//!
//! Day ordinals are always measured from an explicit anchor: the anchor is
//! offset 0, the following day is offset 1, and so on up to 6. The weekend is
//! fixed to the canonical Saturday/Sunday pair and never rotates with the
//! anchor.

use chrono::Weekday;

use crate::error::{PlannerError, Result};

pub const MINUTES_PER_DAY: u32 = 1440;
pub const DAYS_PER_WEEK: u32 = 7;
pub const MINUTES_PER_WEEK: u32 = MINUTES_PER_DAY * DAYS_PER_WEEK;

const SUNDAY_FIRST: [Weekday; 7] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

/// Number of days from `anchor` forward to `day`, in `0..7`.
pub fn day_offset(day: Weekday, anchor: Weekday) -> u32 {
    (day.num_days_from_sunday() + DAYS_PER_WEEK - anchor.num_days_from_sunday()) % DAYS_PER_WEEK
}

/// The weekday `offset` days after `anchor`. Offsets wrap modulo 7.
pub fn day_at(anchor: Weekday, offset: u32) -> Weekday {
    SUNDAY_FIRST[((anchor.num_days_from_sunday() + offset) % DAYS_PER_WEEK) as usize]
}

/// True for the canonical weekend days, regardless of which day anchors the week.
pub fn is_weekend(day: Weekday) -> bool {
    matches!(day, Weekday::Sat | Weekday::Sun)
}

/// Full English name, e.g. `"Wednesday"`.
pub fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse a weekday from its full or three-letter English name, ignoring case.
pub fn parse_day(s: &str) -> Result<Weekday> {
    s.trim()
        .parse::<Weekday>()
        .map_err(|_| PlannerError::InvalidTimeSpec(format!("unknown day name '{}'", s)))
}
