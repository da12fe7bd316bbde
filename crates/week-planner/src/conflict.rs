//! Detect overlapping events between two weekly event lists.
//!
//! Performs pairwise comparison on the weekly cycle. Adjacent events (where one
//! ends exactly when another starts) are NOT conflicts.

use chrono::Weekday;

use crate::event::Event;

/// A detected conflict between two events.
#[derive(Debug, Clone, PartialEq)]
pub struct Conflict {
    pub event_a: Event,
    pub event_b: Event,
    pub overlap_minutes: i64,
}

/// Find all pairwise conflicts between two event lists, in `events_a` order.
///
/// Used to validate a manual edit against another participant's schedule,
/// where the caller wants to show what clashes and by how much.
pub fn find_conflicts(events_a: &[Event], events_b: &[Event], anchor: Weekday) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for a in events_a {
        for b in events_b {
            if a.time.overlaps(&b.time, anchor) {
                conflicts.push(Conflict {
                    event_a: a.clone(),
                    event_b: b.clone(),
                    overlap_minutes: a.time.overlap_minutes(&b.time, anchor),
                });
            }
        }
    }

    conflicts
}
