//! # week-planner
//!
//! Cyclic weekly-calendar model and auto-scheduling search for multi-user
//! schedules.
//!
//! Events live on a repeating 7-day timeline: an interval may start on Friday
//! evening and end on Sunday noon, crossing whatever day the planner treats as
//! the first of the week. Every computation that numbers days takes that first
//! day (the *anchor*) as an explicit argument.
//!
//! ## Quick start
//!
//! ```rust
//! use week_planner::{find_slot, EventDraft, PlannerConfig, Schedule, SchedulingPolicy,
//!     SchedulingRequest, CyclicTime};
//!
//! let config = PlannerConfig::default();
//! let mut alice = Schedule::new("alice");
//! alice
//!     .insert(
//!         EventDraft::new("standup", "alice").at(CyclicTime::parse("Monday", "0900", "Monday", "1000").unwrap()),
//!         config.first_day_of_week,
//!     )
//!     .unwrap();
//! let schedules = vec![alice, Schedule::new("bob")];
//!
//! let draft = EventDraft::new("review", "alice").invite("bob");
//! let request = SchedulingRequest::new(draft, 60, &schedules, &config)
//!     .with_policy(SchedulingPolicy::WorkHours);
//! let event = find_slot(&request).unwrap().into_event().unwrap();
//! assert_eq!(event.time.to_string(), "Monday 1000 - Monday 1100");
//! ```
//!
//! ## Modules
//!
//! - [`weekday`]: day names and anchor-relative day arithmetic
//! - [`cyclic`]: `CyclicTime` intervals and the overlap predicate
//! - [`event`]: event drafts and timed events
//! - [`schedule`]: one participant's non-overlapping schedule
//! - [`conflict`]: pairwise conflict listing between event lists
//! - [`freebusy`]: merged busy blocks and mutual free windows
//! - [`policy`]: the three admission policies
//! - [`search`]: earliest-slot search
//! - [`config`]: planner configuration
//! - [`error`]: error types

pub mod config;
pub mod conflict;
pub mod cyclic;
pub mod error;
pub mod event;
pub mod freebusy;
pub mod policy;
pub mod schedule;
pub mod search;
pub mod weekday;

pub use config::{PlannerConfig, WorkWindow};
pub use conflict::{find_conflicts, Conflict};
pub use cyclic::{check_overlap, CyclicTime};
pub use error::PlannerError;
pub use event::{Event, EventDraft};
pub use freebusy::{first_free_window, free_windows, FreeWindow};
pub use policy::SchedulingPolicy;
pub use schedule::Schedule;
pub use search::{find_slot, SchedulingRequest, SearchOutcome};
