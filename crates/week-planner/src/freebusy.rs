//! Merged busy blocks and mutual free windows across several schedules.
//!
//! Every event is projected onto the anchor-relative week `[0, 10080)`.
//! Wrapping events are split at the week boundary, overlapping or adjacent busy
//! periods are merged, and the gaps between them are the free windows. A gap
//! that touches both the end and the start of the week is reported as a single
//! wrapping window.

use std::fmt;

use chrono::Weekday;
use serde::Serialize;

use crate::cyclic::{format_time, CyclicTime};
use crate::error::Result;
use crate::schedule::Schedule;
use crate::weekday::{self, MINUTES_PER_DAY, MINUTES_PER_WEEK};

/// A merged busy period, as minute offsets from the anchor's midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusyBlock {
    pub start: u32,
    pub end: u32,
}

/// A span of time during which none of the schedules has an event.
///
/// `start` is in `0..10080`; `end` may run past 10080 when the window wraps
/// into the next week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FreeWindow {
    pub anchor: Weekday,
    pub start: u32,
    pub end: u32,
    pub duration_minutes: i64,
}

impl FreeWindow {
    fn new(anchor: Weekday, start: u32, end: u32) -> Self {
        Self {
            anchor,
            start,
            end,
            duration_minutes: i64::from(end - start),
        }
    }

    /// The window as an interval. Fails with `DegenerateDuration` for a window
    /// covering the whole week, which no interval can represent.
    pub fn to_cyclic(&self) -> Result<CyclicTime> {
        CyclicTime::from_offsets(self.start, self.end, self.anchor)
    }
}

impl fmt::Display for FreeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = |offset: u32| {
            let offset = offset % MINUTES_PER_WEEK;
            format!(
                "{} {}",
                weekday::day_name(weekday::day_at(self.anchor, offset / MINUTES_PER_DAY)),
                format_time(offset % MINUTES_PER_DAY)
            )
        };
        write!(
            f,
            "{} - {} ({} min)",
            point(self.start),
            point(self.end),
            self.duration_minutes
        )
    }
}

/// Merge all events of all schedules into sorted, non-overlapping busy blocks
/// within the anchor-relative week.
pub fn merge_busy_periods(schedules: &[Schedule], anchor: Weekday) -> Vec<BusyBlock> {
    let week = i64::from(MINUTES_PER_WEEK);
    let mut intervals: Vec<(u32, u32)> = Vec::new();
    for event in schedules.iter().flat_map(|s| s.events()) {
        let (start, end) = event.time.span(anchor);
        if end > week {
            intervals.push((start as u32, MINUTES_PER_WEEK));
            intervals.push((0, (end - week) as u32));
        } else {
            intervals.push((start as u32, end as u32));
        }
    }

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort_unstable();

    let mut merged: Vec<BusyBlock> = Vec::new();
    for (start, end) in intervals {
        if let Some(last) = merged.last_mut() {
            if start <= last.end {
                // Overlapping or adjacent: extend the current block.
                last.end = last.end.max(end);
                continue;
            }
        }
        merged.push(BusyBlock { start, end });
    }

    merged
}

/// Free windows common to every schedule, sorted by start.
pub fn free_windows(schedules: &[Schedule], anchor: Weekday) -> Vec<FreeWindow> {
    let busy = merge_busy_periods(schedules, anchor);

    let mut gaps: Vec<(u32, u32)> = Vec::new();
    let mut cursor = 0;
    for block in &busy {
        if cursor < block.start {
            gaps.push((cursor, block.start));
        }
        cursor = cursor.max(block.end);
    }
    if cursor < MINUTES_PER_WEEK {
        gaps.push((cursor, MINUTES_PER_WEEK));
    }

    // Join the gap that ends the week with the one that starts it.
    if gaps.len() > 1 {
        let first = gaps[0];
        let last = gaps[gaps.len() - 1];
        if first.0 == 0 && last.1 == MINUTES_PER_WEEK {
            gaps.remove(0);
            let joined = gaps.len() - 1;
            gaps[joined] = (last.0, MINUTES_PER_WEEK + first.1);
        }
    }

    gaps.into_iter()
        .map(|(start, end)| FreeWindow::new(anchor, start, end))
        .collect()
}

/// The earliest free window of at least `min_duration_minutes`.
pub fn first_free_window(
    schedules: &[Schedule],
    anchor: Weekday,
    min_duration_minutes: i64,
) -> Option<FreeWindow> {
    free_windows(schedules, anchor)
        .into_iter()
        .find(|window| window.duration_minutes >= min_duration_minutes)
}
