//! `weekplan` CLI: overlap checks, auto-scheduling and free-window listing
//! for weekly schedules.
//!
//! ## Usage
//!
//! ```sh
//! # Do two weekly intervals overlap?
//! weekplan overlap "Friday 1800 Sunday 1200" "Saturday 0800 Saturday 0900"
//!
//! # Earliest 60-minute work-hours slot for alice and bob (stdin → stdout)
//! cat team.json | weekplan find-slot --name review --host alice --invitee bob \
//!     --duration 60 --policy work-hours
//!
//! # Mutual free windows of at least 2 hours, Monday-first week
//! weekplan --first-day monday free -i team.json --min 120
//! ```
//!
//! Schedules are read as `{"schedules": [{"owner": "...", "events": [...]}]}`.
//! Set `RUST_LOG=debug` to trace the search on stderr.

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::Weekday;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;
use week_planner::{
    check_overlap, find_slot, free_windows, CyclicTime, EventDraft, PlannerConfig, Schedule,
    SchedulingPolicy, SchedulingRequest, SearchOutcome,
};

#[derive(Parser)]
#[command(
    name = "weekplan",
    version,
    about = "Weekly calendar overlap checks and auto-scheduling"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON configuration file (first_day_of_week, work_hours)
    #[arg(long, global = true)]
    config: Option<String>,

    /// First day of the week; overrides the configuration file
    #[arg(long, global = true, value_parser = parse_weekday)]
    first_day: Option<Weekday>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether two intervals ("DAY HHMM DAY HHMM") overlap
    Overlap {
        /// First interval, e.g. "Friday 1800 Sunday 1200"
        a: String,
        /// Second interval
        b: String,
    },
    /// Find the earliest slot where the participants are free
    FindSlot {
        /// Schedules file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Event name
        #[arg(long)]
        name: String,
        /// Hosting participant
        #[arg(long)]
        host: String,
        /// Invited participant (repeatable)
        #[arg(long = "invitee")]
        invitees: Vec<String>,
        /// Event length in minutes
        #[arg(long)]
        duration: i64,
        /// Admission policy: unrestricted, work-hours, lenient-quorum
        #[arg(long, default_value = "unrestricted", value_parser = parse_policy)]
        policy: SchedulingPolicy,
        /// Event location
        #[arg(long, default_value = "")]
        location: String,
        /// Mark the event as online
        #[arg(long)]
        online: bool,
    },
    /// List the windows in which every schedule is free
    Free {
        /// Schedules file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Only show windows of at least this many minutes
        #[arg(long, default_value_t = 1)]
        min: i64,
    },
}

#[derive(Deserialize)]
struct ScheduleDocument {
    schedules: Vec<Schedule>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref(), cli.first_day)?;
    let anchor = config.first_day_of_week;

    match cli.command {
        Commands::Overlap { a, b } => {
            let a: CyclicTime = a
                .parse()
                .with_context(|| format!("Invalid interval: '{}'", a))?;
            let b: CyclicTime = b
                .parse()
                .with_context(|| format!("Invalid interval: '{}'", b))?;
            if check_overlap(&a, &b, anchor) {
                println!("overlap ({} min)", a.overlap_minutes(&b, anchor));
            } else {
                println!("no overlap");
            }
        }
        Commands::FindSlot {
            input,
            name,
            host,
            invitees,
            duration,
            policy,
            location,
            online,
        } => {
            let schedules = read_schedules(input.as_deref())?;
            let draft = invitees.into_iter().fold(
                EventDraft::new(name, host)
                    .with_location(location)
                    .online(online),
                |draft, invitee| draft.invite(invitee),
            );
            let request =
                SchedulingRequest::new(draft, duration, &schedules, &config).with_policy(policy);

            match find_slot(&request).context("Slot search rejected the request")? {
                SearchOutcome::Found(event) => {
                    println!("{}", serde_json::to_string_pretty(&event)?);
                }
                SearchOutcome::Exhausted => println!("No slot found"),
            }
        }
        Commands::Free { input, min } => {
            let schedules = read_schedules(input.as_deref())?;
            for window in free_windows(&schedules, anchor)
                .iter()
                .filter(|w| w.duration_minutes >= min)
            {
                println!("{}", window);
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&str>, first_day: Option<Weekday>) -> Result<PlannerConfig> {
    let mut config = match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path))?;
            PlannerConfig::from_json(&json)
                .with_context(|| format!("Invalid config file: {}", path))?
        }
        None => PlannerConfig::default(),
    };
    if let Some(day) = first_day {
        config = config.with_first_day(day);
    }
    tracing::debug!(
        first_day = %config.first_day_of_week,
        work_start = config.work_hours.start_minute,
        work_end = config.work_hours.end_minute,
        "planner config loaded"
    );
    Ok(config)
}

fn read_schedules(path: Option<&str>) -> Result<Vec<Schedule>> {
    let json = read_input(path)?;
    let document: ScheduleDocument =
        serde_json::from_str(&json).context("Failed to parse schedules JSON")?;
    Ok(document.schedules)
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn parse_weekday(s: &str) -> std::result::Result<Weekday, String> {
    week_planner::weekday::parse_day(s).map_err(|e| e.to_string())
}

fn parse_policy(s: &str) -> std::result::Result<SchedulingPolicy, String> {
    s.parse().map_err(|e: week_planner::PlannerError| e.to_string())
}
