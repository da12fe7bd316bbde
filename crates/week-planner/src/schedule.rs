//! One participant's weekly schedule.
//!
//! A [`Schedule`] owns a list of events kept in insertion order. No two of its
//! events overlap; [`Schedule::insert`] is the only way in and rejects clashes.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::cyclic::CyclicTime;
use crate::error::{PlannerError, Result};
use crate::event::Event;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ScheduleRecord", into = "ScheduleRecord")]
pub struct Schedule {
    owner: String,
    events: Vec<Event>,
}

impl Schedule {
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Events in insertion order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// True iff any stored event overlaps `candidate`.
    pub fn has_conflict(&self, candidate: &CyclicTime, anchor: Weekday) -> bool {
        self.events
            .iter()
            .any(|event| event.time.overlaps(candidate, anchor))
    }

    /// Every stored event that overlaps `candidate`, in insertion order.
    pub fn conflicts(&self, candidate: &CyclicTime, anchor: Weekday) -> Vec<&Event> {
        self.events
            .iter()
            .filter(|event| event.time.overlaps(candidate, anchor))
            .collect()
    }

    /// Append `event` unless it overlaps something already scheduled.
    ///
    /// # Errors
    /// `Conflict` naming the first clashing event; the schedule is unchanged.
    pub fn insert(&mut self, event: Event, anchor: Weekday) -> Result<()> {
        if let Some(existing) = self
            .events
            .iter()
            .find(|e| e.time.overlaps(&event.time, anchor))
        {
            tracing::trace!(
                owner = %self.owner,
                event = %event.name(),
                existing = %existing.name(),
                "schedule insert rejected"
            );
            return Err(PlannerError::Conflict {
                owner: self.owner.clone(),
                existing: existing.name().to_string(),
            });
        }
        self.events.push(event);
        Ok(())
    }

    /// Remove the first stored event equal to `event` and return it.
    pub fn remove(&mut self, event: &Event) -> Result<Event> {
        match self.events.iter().position(|e| e == event) {
            Some(index) => Ok(self.events.remove(index)),
            None => Err(PlannerError::NotFound {
                owner: self.owner.clone(),
                name: event.name().to_string(),
            }),
        }
    }

    /// First event whose interval contains the instant `(day, minute)`.
    pub fn find_at(&self, day: Weekday, minute: u32) -> Option<&Event> {
        self.events.iter().find(|e| e.time.contains(day, minute))
    }

    /// Events ordered by start, counting days from `anchor`, for display.
    pub fn sorted(&self, anchor: Weekday) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().collect();
        events.sort_by_key(|e| (e.time.start_offset(anchor), e.time.duration_minutes()));
        events
    }
}

/// Serialized form. Decoding replays [`Schedule::insert`] so an overlapping
/// document is rejected instead of producing a schedule that breaks the
/// no-overlap invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRecord {
    pub owner: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl TryFrom<ScheduleRecord> for Schedule {
    type Error = PlannerError;

    fn try_from(record: ScheduleRecord) -> Result<Self> {
        let mut schedule = Schedule::new(record.owner);
        for event in record.events {
            // Overlap does not depend on the anchor, so any day will do here.
            schedule.insert(event, Weekday::Sun)?;
        }
        Ok(schedule)
    }
}

impl From<Schedule> for ScheduleRecord {
    fn from(schedule: Schedule) -> Self {
        Self {
            owner: schedule.owner,
            events: schedule.events,
        }
    }
}
