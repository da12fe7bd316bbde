//! Planner configuration: the first day of the week and the working-hours window.
//!
//! Configuration is a plain value handed to every call that needs it; nothing
//! here is global.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::cyclic::{format_time, parse_time};
use crate::error::{PlannerError, Result};
use crate::weekday::{self, MINUTES_PER_DAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Anchor day: offset 0 of every scan and of the display order.
    #[serde(with = "day_name")]
    pub first_day_of_week: Weekday,
    /// Window used by the work-hours policies.
    pub work_hours: WorkWindow,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Weekday::Sun,
            work_hours: WorkWindow::default(),
        }
    }
}

impl PlannerConfig {
    pub fn with_first_day(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.work_hours.validate()
    }

    /// Parse and validate a JSON configuration document. Missing fields take
    /// their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(json)
            .map_err(|e| PlannerError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

/// Daily working window `[start_minute, end_minute)`, 09:00-17:00 by default.
/// Serialized as 4-digit times, e.g. `{"start": "0900", "end": "1700"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WorkWindowRecord", into = "WorkWindowRecord")]
pub struct WorkWindow {
    pub start_minute: u32,
    pub end_minute: u32,
}

impl Default for WorkWindow {
    fn default() -> Self {
        Self {
            start_minute: 540,
            end_minute: 1020,
        }
    }
}

impl WorkWindow {
    pub fn validate(&self) -> Result<()> {
        if self.start_minute >= self.end_minute || self.end_minute > MINUTES_PER_DAY {
            return Err(PlannerError::InvalidConfig(format!(
                "work window {}-{} must satisfy start < end <= 2400",
                self.start_minute, self.end_minute
            )));
        }
        Ok(())
    }

    /// Window length in minutes; the longest event the work-hours policies accept.
    pub fn len_minutes(&self) -> i64 {
        i64::from(self.end_minute) - i64::from(self.start_minute)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkWindowRecord {
    start: String,
    end: String,
}

impl TryFrom<WorkWindowRecord> for WorkWindow {
    type Error = PlannerError;

    fn try_from(record: WorkWindowRecord) -> Result<Self> {
        let start_minute = parse_time(&record.start)?;
        // "2400" is allowed as an end so a window can run to midnight.
        let end_minute = if record.end.trim() == "2400" {
            MINUTES_PER_DAY
        } else {
            parse_time(&record.end)?
        };
        let window = WorkWindow {
            start_minute,
            end_minute,
        };
        window.validate()?;
        Ok(window)
    }
}

impl From<WorkWindow> for WorkWindowRecord {
    fn from(window: WorkWindow) -> Self {
        Self {
            start: format_time(window.start_minute),
            end: format_time(window.end_minute),
        }
    }
}

mod day_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::weekday::day_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        super::weekday::parse_day(&name).map_err(serde::de::Error::custom)
    }
}
