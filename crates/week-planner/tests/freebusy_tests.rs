//! Tests for merged busy blocks and mutual free windows.

use chrono::Weekday;
use week_planner::freebusy::{merge_busy_periods, BusyBlock};
use week_planner::{first_free_window, free_windows, CyclicTime, EventDraft, Schedule};

const DAY: u32 = 1440;
const WEEK: u32 = 7 * DAY;

fn schedule(owner: &str, times: &[&str]) -> Schedule {
    let mut schedule = Schedule::new(owner);
    for (i, time) in times.iter().enumerate() {
        let event = EventDraft::new(format!("{}-{}", owner, i), owner).at(time.parse().unwrap());
        schedule.insert(event, Weekday::Sun).unwrap();
    }
    schedule
}

#[test]
fn no_events_means_whole_week_free() {
    let windows = free_windows(&[Schedule::new("a")], Weekday::Mon);
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, 0);
    assert_eq!(windows[0].end, WEEK);
    assert_eq!(windows[0].duration_minutes, i64::from(WEEK));
    assert!(windows[0].to_cyclic().is_err(), "a full week has no interval form");
}

#[test]
fn busy_periods_from_several_schedules_merge() {
    let a = schedule("a", &["Monday 0900 Monday 1000", "Monday 1400 Monday 1500"]);
    let b = schedule("b", &["Monday 0930 Monday 1100", "Monday 1500 Monday 1600"]);

    let busy = merge_busy_periods(&[a, b], Weekday::Mon);

    assert_eq!(
        busy,
        vec![
            BusyBlock { start: 540, end: 660 },
            BusyBlock { start: 840, end: 960 },
        ]
    );
}

#[test]
fn free_windows_are_the_gaps_and_wrap_around() {
    let a = schedule("a", &["Monday 0900 Monday 1000"]);
    let b = schedule("b", &["Tuesday 0000 Tuesday 1200"]);

    let windows = free_windows(&[a, b], Weekday::Mon);

    // Monday 10:00 → Tuesday 00:00, then Tuesday 12:00 → next Monday 09:00.
    assert_eq!(windows.len(), 2);
    assert_eq!((windows[0].start, windows[0].end), (600, DAY));
    assert_eq!((windows[1].start, windows[1].end), (DAY + 720, WEEK + 540));
    assert_eq!(
        windows[1].to_cyclic().unwrap(),
        "Tuesday 1200 Monday 0900".parse::<CyclicTime>().unwrap()
    );
    assert_eq!(
        windows[0].to_string(),
        "Monday 1000 - Tuesday 0000 (840 min)"
    );
}

#[test]
fn wrapping_event_is_split_at_the_week_boundary() {
    let a = schedule("a", &["Friday 1800 Sunday 1200"]);

    let busy = merge_busy_periods(&[a.clone()], Weekday::Sun);
    assert_eq!(
        busy,
        vec![
            BusyBlock { start: 0, end: 720 },
            BusyBlock { start: 5 * DAY + 1080, end: WEEK },
        ]
    );

    let windows = free_windows(&[a], Weekday::Sun);
    assert_eq!(windows.len(), 1);
    assert_eq!((windows[0].start, windows[0].end), (720, 5 * DAY + 1080));
}

#[test]
fn first_free_window_respects_minimum_length() {
    let a = schedule(
        "a",
        &["Monday 0000 Monday 0900", "Monday 0930 Monday 2359"],
    );

    let short = first_free_window(&[a.clone()], Weekday::Mon, 30).unwrap();
    assert_eq!((short.start, short.end), (540, 570));

    let long = first_free_window(&[a], Weekday::Mon, 60).unwrap();
    assert_eq!(long.start, 1439);
}

#[test]
fn fully_booked_week_has_no_free_window() {
    let a = schedule("a", &["Sunday 0000 Saturday 2359", "Saturday 2359 Sunday 0000"]);
    assert!(free_windows(&[a.clone()], Weekday::Wed).is_empty());
    assert!(first_free_window(&[a], Weekday::Wed, 1).is_none());
}
