//! WASM bindings for week-planner.
//!
//! Exposes the overlap predicate, the slot search, conflict listing and
//! free-window listing to JavaScript via `wasm-bindgen`. All complex types are
//! passed as JSON strings; intervals use the four-field record
//! `{start_day, start_time, end_day, end_time}`.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p week-planner-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target nodejs --out-dir packages/week-planner-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/week_planner_wasm.wasm
//! ```

use chrono::Weekday;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use week_planner::cyclic::format_time;
use week_planner::weekday::day_name;
use week_planner::{
    CyclicTime, Event, EventDraft, FreeWindow, PlannerConfig, PlannerError, Schedule,
    SchedulingPolicy, SchedulingRequest, SearchOutcome,
};

// ---------------------------------------------------------------------------
// Serde-friendly DTOs for crossing the WASM boundary as JSON
// ---------------------------------------------------------------------------

/// Input format for `findSlot`.
#[derive(Deserialize)]
struct FindSlotInput {
    draft: EventDraft,
    duration_minutes: i64,
    schedules: Vec<Schedule>,
    #[serde(default)]
    policy: SchedulingPolicy,
    #[serde(default)]
    config: PlannerConfig,
}

#[derive(Serialize)]
#[serde(rename_all = "snake_case")]
enum SearchOutcomeDto {
    Found(Event),
    Exhausted(bool),
}

impl From<SearchOutcome> for SearchOutcomeDto {
    fn from(outcome: SearchOutcome) -> Self {
        match outcome {
            SearchOutcome::Found(event) => SearchOutcomeDto::Found(event),
            SearchOutcome::Exhausted => SearchOutcomeDto::Exhausted(true),
        }
    }
}

#[derive(Serialize)]
struct ConflictDto {
    event_a: Event,
    event_b: Event,
    overlap_minutes: i64,
}

#[derive(Debug, PartialEq, Serialize)]
struct FreeWindowDto {
    start: String,
    end: String,
    duration_minutes: i64,
    whole_week: bool,
}

impl TryFrom<&FreeWindow> for FreeWindowDto {
    type Error = PlannerError;

    fn try_from(w: &FreeWindow) -> Result<Self, PlannerError> {
        match w.to_cyclic() {
            Ok(time) => Ok(Self {
                start: point(time.start_day(), time.start_minute()),
                end: point(time.end_day(), time.end_minute()),
                duration_minutes: w.duration_minutes,
                whole_week: false,
            }),
            // A window covering the whole week starts and ends at anchor midnight.
            Err(PlannerError::DegenerateDuration { .. }) => {
                let midnight = point(w.anchor, 0);
                Ok(Self {
                    start: midnight.clone(),
                    end: midnight,
                    duration_minutes: w.duration_minutes,
                    whole_week: true,
                })
            }
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn point(day: Weekday, minute: u32) -> String {
    format!("{} {}", day_name(day), format_time(minute))
}

fn parse_anchor(anchor: &str) -> Result<Weekday, JsValue> {
    week_planner::weekday::parse_day(anchor).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn parse_json<'a, T: Deserialize<'a>>(json: &'a str, what: &str) -> Result<T, JsValue> {
    serde_json::from_str(json).map_err(|e| JsValue::from_str(&format!("Invalid {} JSON: {}", what, e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Whether two intervals overlap on the weekly cycle.
///
/// `a_json` and `b_json` are four-field interval records; `anchor` is a day
/// name such as `"Monday"`.
#[wasm_bindgen(js_name = "checkOverlap")]
pub fn check_overlap(a_json: &str, b_json: &str, anchor: &str) -> Result<bool, JsValue> {
    let a: CyclicTime = parse_json(a_json, "interval")?;
    let b: CyclicTime = parse_json(b_json, "interval")?;
    Ok(week_planner::check_overlap(&a, &b, parse_anchor(anchor)?))
}

/// Find the earliest admissible slot.
///
/// Input: `{draft, duration_minutes, schedules, policy?, config?}`. Returns
/// `{"found": Event}` or `{"exhausted": true}`; malformed requests throw.
#[wasm_bindgen(js_name = "findSlot")]
pub fn find_slot(request_json: &str) -> Result<String, JsValue> {
    let input: FindSlotInput = parse_json(request_json, "request")?;
    input
        .config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let request = SchedulingRequest::new(
        input.draft,
        input.duration_minutes,
        &input.schedules,
        &input.config,
    )
    .with_policy(input.policy);

    let outcome =
        week_planner::find_slot(&request).map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&SearchOutcomeDto::from(outcome))
}

/// All pairwise conflicts between two JSON arrays of events.
#[wasm_bindgen(js_name = "findConflicts")]
pub fn find_conflicts(events_a_json: &str, events_b_json: &str, anchor: &str) -> Result<String, JsValue> {
    let events_a: Vec<Event> = parse_json(events_a_json, "events")?;
    let events_b: Vec<Event> = parse_json(events_b_json, "events")?;

    let dtos: Vec<ConflictDto> =
        week_planner::find_conflicts(&events_a, &events_b, parse_anchor(anchor)?)
            .into_iter()
            .map(|c| ConflictDto {
                event_a: c.event_a,
                event_b: c.event_b,
                overlap_minutes: c.overlap_minutes,
            })
            .collect();

    to_json(&dtos)
}

/// Windows in which every schedule of a JSON array is free.
///
/// Returns an array of `{start, end, duration_minutes, whole_week}` with
/// `"Day HHMM"` endpoints. A completely free week is one entry with
/// `whole_week: true` whose endpoints are both the anchor's midnight.
#[wasm_bindgen(js_name = "freeWindows")]
pub fn free_windows(schedules_json: &str, anchor: &str) -> Result<String, JsValue> {
    let schedules: Vec<Schedule> = parse_json(schedules_json, "schedules")?;

    let dtos = week_planner::free_windows(&schedules, parse_anchor(anchor)?)
        .iter()
        .map(FreeWindowDto::try_from)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    to_json(&dtos)
}
