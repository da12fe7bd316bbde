//! Admission policies for the slot search.
//!
//! Each policy decides three things: which start offsets may be tried, whether a
//! trial interval is acceptable given the participants' schedules, and whether
//! the produced event's invitee list is rewritten.
//!
//! | Policy | Offsets | Admission | Invitees |
//! |---|---|---|---|
//! | `Unrestricted` | every minute of the week | every schedule free | unchanged |
//! | `WorkHours` | work window on Monday-Friday | every schedule free | unchanged |
//! | `LenientQuorum` | work window on Monday-Friday | host free and one invitee free | the free invitees |

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::config::WorkWindow;
use crate::cyclic::CyclicTime;
use crate::error::{PlannerError, Result};
use crate::schedule::Schedule;
use crate::weekday::{self, MINUTES_PER_DAY, MINUTES_PER_WEEK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SchedulingPolicy {
    /// Any start minute of the week; all schedules must be free.
    #[default]
    Unrestricted,
    /// Work-window starts on weekdays only; all schedules must be free.
    WorkHours,
    /// Work-window starts on weekdays only; the host and at least one other
    /// participant must be free, and only the free participants stay invited.
    LenientQuorum,
}

/// Result of checking one trial interval against the schedules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    Rejected,
    /// Accepted; the draft's invitees are kept as they are.
    Accepted,
    /// Accepted; the invitee list becomes exactly this set.
    AcceptedWithQuorum(BTreeSet<String>),
}

impl SchedulingPolicy {
    pub fn name(&self) -> &'static str {
        match self {
            SchedulingPolicy::Unrestricted => "unrestricted",
            SchedulingPolicy::WorkHours => "work-hours",
            SchedulingPolicy::LenientQuorum => "lenient-quorum",
        }
    }

    /// Longest event the policy will place, in minutes.
    pub fn max_duration(&self, work_hours: &WorkWindow) -> i64 {
        match self {
            SchedulingPolicy::Unrestricted => i64::from(MINUTES_PER_WEEK) - 1,
            SchedulingPolicy::WorkHours | SchedulingPolicy::LenientQuorum => {
                work_hours.len_minutes()
            }
        }
    }

    /// # Errors
    /// `InvalidDuration` for zero or negative durations, `DurationTooLong` past
    /// [`max_duration`](Self::max_duration).
    pub fn validate_duration(&self, duration_minutes: i64, work_hours: &WorkWindow) -> Result<()> {
        if duration_minutes <= 0 {
            return Err(PlannerError::InvalidDuration(duration_minutes));
        }
        let max = self.max_duration(work_hours);
        if duration_minutes > max {
            return Err(PlannerError::DurationTooLong {
                requested: duration_minutes,
                max,
                policy: self.name(),
            });
        }
        Ok(())
    }

    /// Candidate start offsets (minutes since the anchor's midnight) in
    /// strictly increasing order.
    ///
    /// `duration_minutes` must already be validated against this policy.
    pub fn legal_offsets(
        &self,
        duration_minutes: u32,
        anchor: Weekday,
        work_hours: &WorkWindow,
    ) -> LegalOffsets {
        match self {
            SchedulingPolicy::Unrestricted => LegalOffsets {
                kind: OffsetKind::EveryMinute,
                cursor: 0,
            },
            SchedulingPolicy::WorkHours | SchedulingPolicy::LenientQuorum => LegalOffsets {
                kind: OffsetKind::WorkHours {
                    anchor,
                    first: work_hours.start_minute,
                    last: work_hours.end_minute.saturating_sub(duration_minutes),
                },
                cursor: work_hours.start_minute,
            },
        }
    }

    /// Classify `trial` against `schedules`. `host` names the schedule that
    /// must be free under `LenientQuorum`; only owners in `invitees` count
    /// toward its quorum.
    pub fn admit(
        &self,
        trial: &CyclicTime,
        schedules: &[Schedule],
        host: &str,
        invitees: &BTreeSet<String>,
        anchor: Weekday,
    ) -> Admission {
        match self {
            SchedulingPolicy::Unrestricted | SchedulingPolicy::WorkHours => {
                if schedules.iter().any(|s| s.has_conflict(trial, anchor)) {
                    Admission::Rejected
                } else {
                    Admission::Accepted
                }
            }
            SchedulingPolicy::LenientQuorum => {
                let mut host_free = false;
                let mut quorum = BTreeSet::new();
                for schedule in schedules {
                    if schedule.has_conflict(trial, anchor) {
                        continue;
                    }
                    if schedule.owner() == host {
                        host_free = true;
                    } else if invitees.contains(schedule.owner()) {
                        quorum.insert(schedule.owner().to_string());
                    }
                }
                if host_free && !quorum.is_empty() {
                    Admission::AcceptedWithQuorum(quorum)
                } else {
                    Admission::Rejected
                }
            }
        }
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SchedulingPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "unrestricted" => Ok(SchedulingPolicy::Unrestricted),
            "work-hours" => Ok(SchedulingPolicy::WorkHours),
            "lenient-quorum" | "lenient" => Ok(SchedulingPolicy::LenientQuorum),
            other => Err(PlannerError::InvalidConfig(format!(
                "unknown scheduling policy '{}'",
                other
            ))),
        }
    }
}

/// Iterator over the start offsets a policy allows, in increasing order.
///
/// For the work-hours policies it skips whole weekend days and jumps to the
/// next day's window start once a start would push the event past the end of
/// the current day's window.
#[derive(Debug, Clone)]
pub struct LegalOffsets {
    kind: OffsetKind,
    cursor: u32,
}

#[derive(Debug, Clone, Copy)]
enum OffsetKind {
    EveryMinute,
    WorkHours { anchor: Weekday, first: u32, last: u32 },
}

impl Iterator for LegalOffsets {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        loop {
            if self.cursor >= MINUTES_PER_WEEK {
                return None;
            }
            match self.kind {
                OffsetKind::EveryMinute => {}
                OffsetKind::WorkHours {
                    anchor,
                    first,
                    last,
                } => {
                    let day = self.cursor / MINUTES_PER_DAY;
                    let minute = self.cursor % MINUTES_PER_DAY;
                    if weekday::is_weekend(weekday::day_at(anchor, day)) || minute > last {
                        self.cursor = (day + 1) * MINUTES_PER_DAY + first;
                        continue;
                    }
                    if minute < first {
                        self.cursor = day * MINUTES_PER_DAY + first;
                        continue;
                    }
                }
            }
            let offset = self.cursor;
            self.cursor += 1;
            return Some(offset);
        }
    }
}
