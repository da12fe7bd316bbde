//! Tests for the earliest-slot search under each scheduling policy.

use chrono::Weekday;
use week_planner::{
    find_slot, CyclicTime, EventDraft, PlannerConfig, PlannerError, Schedule, SchedulingPolicy,
    SchedulingRequest, SearchOutcome,
};

// ── Helpers ─────────────────────────────────────────────────────────────────

fn schedule(owner: &str, times: &[&str]) -> Schedule {
    let mut schedule = Schedule::new(owner);
    for (i, time) in times.iter().enumerate() {
        let event = EventDraft::new(format!("{}-busy-{}", owner, i), owner).at(time.parse().unwrap());
        schedule.insert(event, Weekday::Sun).unwrap();
    }
    schedule
}

/// Busy 09:00-17:00 every weekday.
fn office_bound(owner: &str) -> Schedule {
    schedule(
        owner,
        &[
            "Monday 0900 Monday 1700",
            "Tuesday 0900 Tuesday 1700",
            "Wednesday 0900 Wednesday 1700",
            "Thursday 0900 Thursday 1700",
            "Friday 0900 Friday 1700",
        ],
    )
}

/// Busy every minute of the week.
fn fully_booked(owner: &str) -> Schedule {
    schedule(owner, &["Sunday 0000 Saturday 2359", "Saturday 2359 Sunday 0000"])
}

fn draft(host: &str, invitees: &[&str]) -> EventDraft {
    invitees
        .iter()
        .fold(EventDraft::new("planning", host).with_location("room 4"), |d, i| d.invite(*i))
}

fn ct(text: &str) -> CyclicTime {
    text.parse().unwrap()
}

fn config(anchor: Weekday) -> PlannerConfig {
    PlannerConfig::default().with_first_day(anchor)
}

// ── Unrestricted ────────────────────────────────────────────────────────────

#[test]
fn unrestricted_finds_full_day_at_anchor_midnight() {
    let schedules = vec![
        schedule("host", &["Sunday 2200 Monday 0000"]),
        schedule("bob", &["Tuesday 0900 Tuesday 1000"]),
        schedule("carol", &["Saturday 1200 Sunday 1200"]),
    ];
    let request = SchedulingRequest::new(draft("host", &["bob", "carol"]), 1440, &schedules, &config(Weekday::Mon));

    let event = find_slot(&request).unwrap().into_event().unwrap();

    assert_eq!(event.time, ct("Monday 0000 Tuesday 0000"));
    assert_eq!(event.name(), "planning");
    assert_eq!(event.draft.location, "room 4");
    assert_eq!(
        event.invitees().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["bob", "carol"]
    );
}

#[test]
fn unrestricted_skips_to_first_mutual_gap() {
    let schedules = vec![
        schedule("host", &["Sunday 0000 Sunday 0930"]),
        schedule("bob", &["Sunday 0930 Sunday 1000", "Sunday 1030 Sunday 1100"]),
    ];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 30, &schedules, &config(Weekday::Sun));

    let outcome = find_slot(&request).unwrap();

    assert_eq!(outcome.time(), Some(ct("Sunday 1000 Sunday 1030")));
}

#[test]
fn unrestricted_slot_may_wrap_past_the_week_end() {
    // Everything is busy until Saturday 23:00 except for a slot that runs into
    // the next pass of the week.
    let schedules = vec![schedule(
        "host",
        &["Sunday 0100 Saturday 2300"],
    )];
    let request = SchedulingRequest::new(draft("host", &[]), 120, &schedules, &config(Weekday::Sun));

    let time = find_slot(&request).unwrap().time().unwrap();

    assert_eq!(time, ct("Saturday 2300 Sunday 0100"));
    assert!(time.wraps(Weekday::Sun));
}

#[test]
fn unrestricted_accepts_just_under_a_week() {
    let schedules = vec![Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &[]), 10079, &schedules, &config(Weekday::Wed));

    let time = find_slot(&request).unwrap().time().unwrap();

    assert_eq!(time, ct("Wednesday 0000 Tuesday 2359"));
}

#[test]
fn unrestricted_rejects_a_full_week() {
    let schedules = vec![Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &[]), 10080, &schedules, &config(Weekday::Sun));

    assert!(matches!(
        find_slot(&request),
        Err(PlannerError::DurationTooLong { max: 10079, .. })
    ));
}

#[test]
fn unrestricted_exhausts_when_someone_is_always_busy() {
    let schedules = vec![Schedule::new("host"), fully_booked("bob")];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 1, &schedules, &config(Weekday::Sun));

    assert_eq!(find_slot(&request).unwrap(), SearchOutcome::Exhausted);
}

#[test]
fn changing_the_anchor_moves_the_scan_start() {
    let schedules = vec![Schedule::new("host")];
    for anchor in [Weekday::Sun, Weekday::Mon, Weekday::Thu] {
        let request = SchedulingRequest::new(draft("host", &[]), 60, &schedules, &config(anchor));
        let time = find_slot(&request).unwrap().time().unwrap();
        assert_eq!(time.start_day(), anchor);
        assert_eq!(time.start_minute(), 0);
    }
}

#[test]
fn identical_requests_give_identical_results() {
    let schedules = vec![
        schedule("host", &["Monday 0900 Monday 1200"]),
        schedule("bob", &["Monday 1200 Monday 1300"]),
        office_bound("carol"),
    ];
    let request = SchedulingRequest::new(draft("host", &["bob", "carol"]), 90, &schedules, &config(Weekday::Mon));

    let first = find_slot(&request).unwrap();
    let second = find_slot(&request).unwrap();

    assert_eq!(first, second);
}

#[test]
fn search_does_not_modify_schedules() {
    let schedules = vec![schedule("host", &["Monday 0900 Monday 1200"])];
    let before = schedules.clone();
    let request = SchedulingRequest::new(draft("host", &[]), 90, &schedules, &config(Weekday::Mon));

    let event = find_slot(&request).unwrap().into_event().unwrap();

    assert_eq!(schedules, before);
    // The caller can reserve the slot afterwards.
    let mut host = schedules[0].clone();
    host.insert(event, Weekday::Mon).unwrap();
    assert_eq!(host.len(), 2);
}

// ── WorkHours ───────────────────────────────────────────────────────────────

#[test]
fn work_hours_starts_at_nine_on_first_weekday() {
    let schedules = vec![Schedule::new("host"), Schedule::new("bob")];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 60, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::WorkHours);

    let time = find_slot(&request).unwrap().time().unwrap();

    // Sunday is skipped as a weekend day.
    assert_eq!(time, ct("Monday 0900 Monday 1000"));
}

#[test]
fn work_hours_skips_canonical_weekend_for_friday_anchor() {
    // Busy all Friday working hours; the next weekday is Monday, not Saturday.
    let schedules = vec![schedule("host", &["Friday 0900 Friday 1700"])];
    let request = SchedulingRequest::new(draft("host", &[]), 30, &schedules, &config(Weekday::Fri))
        .with_policy(SchedulingPolicy::WorkHours);

    let time = find_slot(&request).unwrap().time().unwrap();

    assert_eq!(time, ct("Monday 0900 Monday 0930"));
}

#[test]
fn work_hours_keeps_the_event_inside_the_workday() {
    // Free only from 16:30 on Monday; a 60-minute event cannot fit before 17:00,
    // so the search moves to Tuesday morning.
    let schedules = vec![schedule(
        "host",
        &["Monday 0900 Monday 1630", "Tuesday 0000 Tuesday 0800"],
    )];
    let request = SchedulingRequest::new(draft("host", &[]), 60, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::WorkHours);

    let time = find_slot(&request).unwrap().time().unwrap();

    assert_eq!(time, ct("Tuesday 0900 Tuesday 1000"));
}

#[test]
fn work_hours_accepts_a_full_workday() {
    let schedules = vec![schedule("host", &["Monday 1200 Monday 1300"])];
    let request = SchedulingRequest::new(draft("host", &[]), 480, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::WorkHours);

    let time = find_slot(&request).unwrap().time().unwrap();

    assert_eq!(time, ct("Tuesday 0900 Tuesday 1700"));
}

#[test]
fn work_hours_rejects_more_than_eight_hours() {
    let schedules = vec![Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &[]), 481, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::WorkHours);

    let err = find_slot(&request).unwrap_err();

    assert_eq!(
        err,
        PlannerError::DurationTooLong {
            requested: 481,
            max: 480,
            policy: "work-hours",
        }
    );
}

#[test]
fn work_hours_exhausts_even_with_free_weekends() {
    let schedules = vec![Schedule::new("host"), office_bound("bob")];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 15, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::WorkHours);

    assert_eq!(find_slot(&request).unwrap(), SearchOutcome::Exhausted);
}

#[test]
fn work_hours_follows_a_configured_window() {
    let mut config = config(Weekday::Mon);
    config.work_hours.start_minute = 7 * 60;
    config.work_hours.end_minute = 11 * 60;
    let schedules = vec![Schedule::new("host")];

    let request = SchedulingRequest::new(draft("host", &[]), 240, &schedules, &config)
        .with_policy(SchedulingPolicy::WorkHours);
    assert_eq!(find_slot(&request).unwrap().time(), Some(ct("Monday 0700 Monday 1100")));

    let request = SchedulingRequest::new(draft("host", &[]), 241, &schedules, &config)
        .with_policy(SchedulingPolicy::WorkHours);
    assert!(matches!(
        find_slot(&request),
        Err(PlannerError::DurationTooLong { max: 240, .. })
    ));
}

// ── LenientQuorum ───────────────────────────────────────────────────────────

#[test]
fn lenient_quorum_narrows_invitees_to_the_free_participants() {
    let schedules = vec![
        Schedule::new("host"),
        office_bound("bob"),
        office_bound("carol"),
        office_bound("dave"),
        schedule("erin", &["Monday 0900 Monday 1000"]),
    ];
    let request = SchedulingRequest::new(
        draft("host", &["bob", "carol", "dave", "erin"]),
        60,
        &schedules,
        &config(Weekday::Sun),
    )
    .with_policy(SchedulingPolicy::LenientQuorum);

    let event = find_slot(&request).unwrap().into_event().unwrap();

    assert_eq!(event.time, ct("Monday 1000 Monday 1100"));
    assert_eq!(
        event.invitees().iter().map(String::as_str).collect::<Vec<_>>(),
        vec!["erin"]
    );
    assert_eq!(event.participants(), vec!["host", "erin"]);
}

#[test]
fn lenient_quorum_keeps_everyone_who_is_free() {
    let schedules = vec![
        Schedule::new("host"),
        Schedule::new("bob"),
        schedule("carol", &["Monday 0800 Monday 1000"]),
    ];
    let request = SchedulingRequest::new(draft("host", &["bob", "carol"]), 30, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::LenientQuorum);

    let event = find_slot(&request).unwrap().into_event().unwrap();

    assert_eq!(event.time, ct("Monday 0900 Monday 0930"));
    assert_eq!(event.participants(), vec!["host", "bob"]);
}

#[test]
fn lenient_quorum_requires_the_host_to_be_free() {
    let schedules = vec![office_bound("host"), Schedule::new("bob"), Schedule::new("carol")];
    let request = SchedulingRequest::new(draft("host", &["bob", "carol"]), 30, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::LenientQuorum);

    assert_eq!(find_slot(&request).unwrap(), SearchOutcome::Exhausted);
}

#[test]
fn lenient_quorum_requires_someone_besides_the_host() {
    let schedules = vec![Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &[]), 30, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::LenientQuorum);

    assert_eq!(find_slot(&request).unwrap(), SearchOutcome::Exhausted);
}

#[test]
fn lenient_quorum_ignores_free_schedules_of_uninvited_owners() {
    // mallory is free all week but not invited: she never completes the
    // quorum and never joins the event.
    let schedules = vec![Schedule::new("host"), office_bound("bob"), Schedule::new("mallory")];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 30, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::LenientQuorum);

    assert_eq!(find_slot(&request).unwrap(), SearchOutcome::Exhausted);

    let relaxed = vec![
        Schedule::new("host"),
        schedule("bob", &["Monday 0900 Monday 1200"]),
        Schedule::new("mallory"),
    ];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 30, &relaxed, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::LenientQuorum);

    let event = find_slot(&request).unwrap().into_event().unwrap();

    assert_eq!(event.time, ct("Monday 1200 Monday 1230"));
    assert_eq!(event.participants(), vec!["host", "bob"]);
}

#[test]
fn lenient_quorum_rejects_more_than_eight_hours() {
    let schedules = vec![Schedule::new("host"), Schedule::new("bob")];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 481, &schedules, &config(Weekday::Sun))
        .with_policy(SchedulingPolicy::LenientQuorum);

    assert!(matches!(
        find_slot(&request),
        Err(PlannerError::DurationTooLong { .. })
    ));
}

// ── Request validation ──────────────────────────────────────────────────────

#[test]
fn zero_and_negative_durations_are_invalid() {
    let schedules = vec![Schedule::new("host")];
    for duration in [0, -30] {
        let request = SchedulingRequest::new(draft("host", &[]), duration, &schedules, &config(Weekday::Sun));
        assert_eq!(
            find_slot(&request).unwrap_err(),
            PlannerError::InvalidDuration(duration)
        );
    }
}

#[test]
fn empty_schedule_list_is_invalid() {
    let request = SchedulingRequest::new(draft("host", &[]), 30, &[], &config(Weekday::Sun));
    assert!(matches!(
        find_slot(&request),
        Err(PlannerError::InvalidScheduleSet(_))
    ));
}

#[test]
fn participant_without_schedule_is_invalid() {
    let schedules = vec![Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &["bob"]), 30, &schedules, &config(Weekday::Sun));
    let err = find_slot(&request).unwrap_err();
    assert_eq!(
        err,
        PlannerError::InvalidScheduleSet("participant 'bob' has no schedule".to_string())
    );
}

#[test]
fn inverted_work_window_is_reported_before_the_duration() {
    let mut config = config(Weekday::Sun);
    config.work_hours.start_minute = 1000;
    config.work_hours.end_minute = 900;
    let schedules = vec![Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &[]), 30, &schedules, &config)
        .with_policy(SchedulingPolicy::WorkHours);

    assert!(matches!(
        find_slot(&request),
        Err(PlannerError::InvalidConfig(_))
    ));
}

#[test]
fn duplicate_owner_is_invalid() {
    let schedules = vec![Schedule::new("host"), Schedule::new("host")];
    let request = SchedulingRequest::new(draft("host", &[]), 30, &schedules, &config(Weekday::Sun));
    assert!(matches!(
        find_slot(&request),
        Err(PlannerError::InvalidScheduleSet(_))
    ));
}
