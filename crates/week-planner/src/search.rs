//! Earliest-slot search over a week of participant schedules.
//!
//! The search walks the policy's legal start offsets in increasing order,
//! materializes a trial interval of the requested length at each one, and
//! returns the first trial the policy admits. Schedules are only read; placing
//! the resulting event into each schedule is the caller's job.

use std::collections::BTreeSet;

use chrono::Weekday;

use crate::config::{PlannerConfig, WorkWindow};
use crate::cyclic::CyclicTime;
use crate::error::{PlannerError, Result};
use crate::event::{Event, EventDraft};
use crate::policy::{Admission, SchedulingPolicy};
use crate::schedule::Schedule;

/// Everything one search needs. Borrowing the schedules keeps the search a
/// read-only pass over a snapshot.
#[derive(Debug, Clone)]
pub struct SchedulingRequest<'a> {
    pub draft: EventDraft,
    pub duration_minutes: i64,
    pub schedules: &'a [Schedule],
    pub policy: SchedulingPolicy,
    pub anchor: Weekday,
    pub work_hours: WorkWindow,
}

impl<'a> SchedulingRequest<'a> {
    /// An `Unrestricted` request using the anchor and work window from `config`.
    pub fn new(
        draft: EventDraft,
        duration_minutes: i64,
        schedules: &'a [Schedule],
        config: &PlannerConfig,
    ) -> Self {
        Self {
            draft,
            duration_minutes,
            schedules,
            policy: SchedulingPolicy::default(),
            anchor: config.first_day_of_week,
            work_hours: config.work_hours,
        }
    }

    pub fn with_policy(mut self, policy: SchedulingPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Check the request before scanning.
    ///
    /// # Errors
    /// - `InvalidConfig` for a malformed work window.
    /// - `InvalidDuration` / `DurationTooLong` per the policy's limits.
    /// - `InvalidScheduleSet` if there are no schedules, an owner appears twice,
    ///   or the host or an invitee has no schedule.
    pub fn validate(&self) -> Result<()> {
        self.work_hours.validate()?;
        self.policy
            .validate_duration(self.duration_minutes, &self.work_hours)?;

        if self.schedules.is_empty() {
            return Err(PlannerError::InvalidScheduleSet(
                "no schedules to check".to_string(),
            ));
        }

        let mut owners = BTreeSet::new();
        for schedule in self.schedules {
            if !owners.insert(schedule.owner()) {
                return Err(PlannerError::InvalidScheduleSet(format!(
                    "owner '{}' appears more than once",
                    schedule.owner()
                )));
            }
        }

        for participant in self.draft.participants() {
            if !owners.contains(participant) {
                return Err(PlannerError::InvalidScheduleSet(format!(
                    "participant '{}' has no schedule",
                    participant
                )));
            }
        }

        Ok(())
    }
}

/// Outcome of a well-formed search. Running out of offsets is a normal result,
/// not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Found(Event),
    Exhausted,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }

    pub fn event(&self) -> Option<&Event> {
        match self {
            SearchOutcome::Found(event) => Some(event),
            SearchOutcome::Exhausted => None,
        }
    }

    pub fn into_event(self) -> Option<Event> {
        match self {
            SearchOutcome::Found(event) => Some(event),
            SearchOutcome::Exhausted => None,
        }
    }

    /// Just the chosen interval.
    pub fn time(&self) -> Option<CyclicTime> {
        self.event().map(|event| event.time)
    }
}

/// Find the earliest admissible slot for `request`.
///
/// Identical requests always produce identical outcomes.
///
/// # Errors
/// Any error from [`SchedulingRequest::validate`]. No error is returned once
/// scanning starts.
pub fn find_slot(request: &SchedulingRequest<'_>) -> Result<SearchOutcome> {
    request.validate()?;

    let duration = request.duration_minutes as u32;
    let host = request.draft.host.as_str();

    tracing::debug!(
        policy = %request.policy,
        duration_minutes = duration,
        schedules = request.schedules.len(),
        anchor = %request.anchor,
        "slot search started"
    );

    let mut scanned = 0usize;
    for offset in request
        .policy
        .legal_offsets(duration, request.anchor, &request.work_hours)
    {
        scanned += 1;
        let trial = CyclicTime::from_offsets(offset, offset + duration, request.anchor)?;
        let invitees = match request
            .policy
            .admit(
                &trial,
                request.schedules,
                host,
                &request.draft.invitees,
                request.anchor,
            )
        {
            Admission::Rejected => continue,
            Admission::Accepted => request.draft.invitees.clone(),
            Admission::AcceptedWithQuorum(quorum) => quorum,
        };

        tracing::debug!(offset, scanned, time = %trial, "slot found");
        let draft = EventDraft {
            invitees,
            ..request.draft.clone()
        };
        return Ok(SearchOutcome::Found(draft.at(trial)));
    }

    tracing::debug!(scanned, "slot search exhausted");
    Ok(SearchOutcome::Exhausted)
}
