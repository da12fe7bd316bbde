//! Error types for week-planner operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlannerError {
    #[error("Invalid time spec: {0}")]
    InvalidTimeSpec(String),

    #[error("Degenerate duration: interval starts and ends at {day} {time}")]
    DegenerateDuration { day: String, time: String },

    #[error("Invalid duration: {0} minutes (must be positive)")]
    InvalidDuration(i64),

    #[error("Duration too long: {requested} minutes exceeds the {policy} maximum of {max}")]
    DurationTooLong {
        requested: i64,
        max: i64,
        policy: &'static str,
    },

    #[error("Invalid schedule set: {0}")]
    InvalidScheduleSet(String),

    #[error("Conflict: '{existing}' already occupies that time in {owner}'s schedule")]
    Conflict { owner: String, existing: String },

    #[error("Not found: '{name}' is not in {owner}'s schedule")]
    NotFound { owner: String, name: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
