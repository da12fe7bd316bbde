//! Time intervals on a repeating 7-day timeline.
//!
//! A [`CyclicTime`] is a (day, minute-of-day) start paired with a (day,
//! minute-of-day) end. Its end is always understood as the first occurrence of
//! that (day, minute) strictly after the start, so every interval is between 1
//! minute and one week minus 1 minute long.
//!
//! Overlap is decided by normalizing both intervals to half-open integer ranges
//! of "minutes since the anchor's midnight" and comparing the first range
//! against the second shifted by -1, 0 and +1 weeks. An interval that ends
//! exactly when another starts does not overlap it.

use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::weekday::{self, MINUTES_PER_DAY, MINUTES_PER_WEEK};

const WEEK: i64 = MINUTES_PER_WEEK as i64;

/// A start/end pair of (weekday, minute-of-day) points on the weekly cycle.
///
/// Serializes as the four-field record
/// `{"start_day": "Friday", "start_time": "1800", "end_day": "Sunday", "end_time": "1200"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CyclicTimeRecord", into = "CyclicTimeRecord")]
pub struct CyclicTime {
    start_day: Weekday,
    start_minute: u32,
    end_day: Weekday,
    end_minute: u32,
}

impl CyclicTime {
    /// Build an interval from raw endpoints.
    ///
    /// # Errors
    /// `InvalidTimeSpec` if a minute is outside `0..1440`, `DegenerateDuration`
    /// if start and end are the same point.
    pub fn new(start_day: Weekday, start_minute: u32, end_day: Weekday, end_minute: u32) -> Result<Self> {
        check_minute(start_minute)?;
        check_minute(end_minute)?;
        if start_day == end_day && start_minute == end_minute {
            return Err(degenerate(start_day, start_minute));
        }
        Ok(Self {
            start_day,
            start_minute,
            end_day,
            end_minute,
        })
    }

    /// Build an interval from its four text fields, e.g.
    /// `CyclicTime::parse("Friday", "1800", "Sunday", "1200")`.
    pub fn parse(start_day: &str, start_time: &str, end_day: &str, end_time: &str) -> Result<Self> {
        Self::new(
            weekday::parse_day(start_day)?,
            parse_time(start_time)?,
            weekday::parse_day(end_day)?,
            parse_time(end_time)?,
        )
    }

    /// Build an interval from minute offsets measured from the anchor's midnight.
    /// Offsets are reduced modulo one week.
    pub fn from_offsets(start: u32, end: u32, anchor: Weekday) -> Result<Self> {
        let (start_day, start_minute) = point_at(start, anchor);
        let (end_day, end_minute) = point_at(end, anchor);
        Self::new(start_day, start_minute, end_day, end_minute)
    }

    pub fn start_day(&self) -> Weekday {
        self.start_day
    }

    pub fn start_minute(&self) -> u32 {
        self.start_minute
    }

    pub fn end_day(&self) -> Weekday {
        self.end_day
    }

    pub fn end_minute(&self) -> u32 {
        self.end_minute
    }

    /// Re-time the start. The interval is left untouched on error.
    pub fn set_start(&mut self, day: Weekday, minute: u32) -> Result<()> {
        *self = Self::new(day, minute, self.end_day, self.end_minute)?;
        Ok(())
    }

    /// Re-time the end. The interval is left untouched on error.
    pub fn set_end(&mut self, day: Weekday, minute: u32) -> Result<()> {
        *self = Self::new(self.start_day, self.start_minute, day, minute)?;
        Ok(())
    }

    /// Minutes from the anchor's midnight to the start, in `0..10080`.
    pub fn start_offset(&self, anchor: Weekday) -> u32 {
        point_offset(self.start_day, self.start_minute, anchor)
    }

    /// Minutes from the anchor's midnight to the end point, in `0..10080`.
    ///
    /// This is the raw position of the end within the week; it is smaller than
    /// [`start_offset`](Self::start_offset) exactly when the interval
    /// [`wraps`](Self::wraps).
    pub fn end_offset(&self, anchor: Weekday) -> u32 {
        point_offset(self.end_day, self.end_minute, anchor)
    }

    /// True when the interval runs past the end of the anchor-relative week and
    /// finishes in the next pass of the cycle.
    pub fn wraps(&self, anchor: Weekday) -> bool {
        self.end_offset(anchor) < self.start_offset(anchor)
    }

    /// Normalized half-open range `[start, end)` in minutes since the anchor's
    /// midnight. `end` exceeds 10080 for wrapping intervals.
    pub fn span(&self, anchor: Weekday) -> (i64, i64) {
        let start = self.start_offset(anchor) as i64;
        let mut end = self.end_offset(anchor) as i64;
        if end < start {
            end += WEEK;
        }
        (start, end)
    }

    /// Length in minutes. Independent of the anchor.
    pub fn duration_minutes(&self) -> i64 {
        let (start, end) = self.span(Weekday::Sun);
        end - start
    }

    /// True if the instant `(day, minute)` lies inside `[start, end)`.
    pub fn contains(&self, day: Weekday, minute: u32) -> bool {
        if minute >= MINUTES_PER_DAY {
            return false;
        }
        let start = self.start_offset(Weekday::Sun) as i64;
        let point = point_offset(day, minute, Weekday::Sun) as i64;
        (point - start).rem_euclid(WEEK) < self.duration_minutes()
    }

    /// Whether the two intervals share at least one minute on the weekly cycle.
    pub fn overlaps(&self, other: &CyclicTime, anchor: Weekday) -> bool {
        let (a_start, a_end) = self.span(anchor);
        let (b_start, b_end) = other.span(anchor);
        [-WEEK, 0, WEEK].iter().any(|shift| {
            let (b_start, b_end) = (b_start + shift, b_end + shift);
            !(a_end <= b_start || b_end <= a_start)
        })
    }

    /// Total number of minutes the two intervals share on the weekly cycle.
    ///
    /// Two long intervals can meet in two separate pieces (one at each end);
    /// both pieces are counted.
    pub fn overlap_minutes(&self, other: &CyclicTime, anchor: Weekday) -> i64 {
        let (a_start, a_end) = self.span(anchor);
        let (b_start, b_end) = other.span(anchor);
        [-WEEK, 0, WEEK]
            .iter()
            .map(|shift| (a_end.min(b_end + shift) - a_start.max(b_start + shift)).max(0))
            .sum()
    }
}

/// Whether `a` and `b` overlap when both repeat every week.
///
/// The anchor only changes how minutes are numbered internally; the answer is
/// the same for every anchor.
pub fn check_overlap(a: &CyclicTime, b: &CyclicTime, anchor: Weekday) -> bool {
    a.overlaps(b, anchor)
}

impl fmt::Display for CyclicTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            weekday::day_name(self.start_day),
            format_time(self.start_minute),
            weekday::day_name(self.end_day),
            format_time(self.end_minute)
        )
    }
}

/// Parses `"Friday 1800 Sunday 1200"`; a standalone `-` between the endpoints
/// is allowed, so the [`Display`](fmt::Display) form parses back.
impl FromStr for CyclicTime {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        let fields: Vec<&str> = s.split_whitespace().filter(|t| *t != "-").collect();
        match fields.as_slice() {
            [start_day, start_time, end_day, end_time] => {
                Self::parse(start_day, start_time, end_day, end_time)
            }
            _ => Err(PlannerError::InvalidTimeSpec(format!(
                "expected 'DAY HHMM DAY HHMM', got '{}'",
                s
            ))),
        }
    }
}

/// The four-field text form used by the persistence and UI layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclicTimeRecord {
    pub start_day: String,
    pub start_time: String,
    pub end_day: String,
    pub end_time: String,
}

impl TryFrom<CyclicTimeRecord> for CyclicTime {
    type Error = PlannerError;

    fn try_from(record: CyclicTimeRecord) -> Result<Self> {
        Self::parse(
            &record.start_day,
            &record.start_time,
            &record.end_day,
            &record.end_time,
        )
    }
}

impl From<CyclicTime> for CyclicTimeRecord {
    fn from(time: CyclicTime) -> Self {
        Self {
            start_day: weekday::day_name(time.start_day).to_string(),
            start_time: format_time(time.start_minute),
            end_day: weekday::day_name(time.end_day).to_string(),
            end_time: format_time(time.end_minute),
        }
    }
}

/// Format a minute-of-day as a 4-digit 24-hour string, e.g. `570` → `"0930"`.
pub fn format_time(minute: u32) -> String {
    format!("{:02}{:02}", minute / 60, minute % 60)
}

/// Parse a 4-digit 24-hour string (`"0000"`..=`"2359"`) into a minute-of-day.
pub fn parse_time(s: &str) -> Result<u32> {
    let s = s.trim();
    if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PlannerError::InvalidTimeSpec(format!(
            "time '{}' is not a 4-digit HHMM value",
            s
        )));
    }
    // All four bytes are ASCII digits, so slicing and parsing cannot fail.
    let hours: u32 = s[..2].parse().unwrap_or(u32::MAX);
    let minutes: u32 = s[2..].parse().unwrap_or(u32::MAX);
    if hours > 23 || minutes > 59 {
        return Err(PlannerError::InvalidTimeSpec(format!(
            "time '{}' is out of range",
            s
        )));
    }
    Ok(hours * 60 + minutes)
}

fn check_minute(minute: u32) -> Result<()> {
    if minute >= MINUTES_PER_DAY {
        return Err(PlannerError::InvalidTimeSpec(format!(
            "minute-of-day {} is out of range 0..{}",
            minute, MINUTES_PER_DAY
        )));
    }
    Ok(())
}

fn degenerate(day: Weekday, minute: u32) -> PlannerError {
    PlannerError::DegenerateDuration {
        day: weekday::day_name(day).to_string(),
        time: format_time(minute),
    }
}

fn point_offset(day: Weekday, minute: u32, anchor: Weekday) -> u32 {
    weekday::day_offset(day, anchor) * MINUTES_PER_DAY + minute
}

fn point_at(offset: u32, anchor: Weekday) -> (Weekday, u32) {
    let offset = offset % MINUTES_PER_WEEK;
    (
        weekday::day_at(anchor, offset / MINUTES_PER_DAY),
        offset % MINUTES_PER_DAY,
    )
}
