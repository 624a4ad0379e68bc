//! Live summary: `bl dashboard`.
//!
//! Shows how long ago each tracked thing last happened, the current sleep
//! state and today's counters at a glance.

use std::fmt::Write;

use anyhow::Result;
use bl_core::DashboardSummary;
use bl_core::format::{format_duration, format_time_since};
use bl_core::recency::{LastSeen, SleepStatus};

use super::util::{format_clock, whole_ml};

fn recency_line(last: Option<&LastSeen>) -> String {
    last.map_or_else(
        || "(none)".to_string(),
        |seen| {
            format!(
                "{} ({})",
                format_time_since(seen.elapsed_minutes),
                format_clock(seen.at)
            )
        },
    )
}

fn sleep_line(status: &SleepStatus) -> String {
    match status {
        SleepStatus::Asleep {
            since,
            elapsed_minutes,
        } => format!(
            "asleep {} (since {})",
            format_duration(*elapsed_minutes),
            format_clock(*since)
        ),
        SleepStatus::Awake {
            since_wake: Some(wake),
        } => format!(
            "awake {} (woke {})",
            format_duration(wake.elapsed_minutes),
            format_clock(wake.at)
        ),
        SleepStatus::Awake { since_wake: None } => "(no sleep recorded)".to_string(),
    }
}

/// Formats the human-readable dashboard.
pub fn format_dashboard(summary: &DashboardSummary) -> String {
    let mut output = String::new();
    let day = &summary.day;

    let date = summary.date.format("%A, %b %-d, %Y");
    writeln!(output, "DASHBOARD: {date}").unwrap();

    writeln!(output).unwrap();
    writeln!(
        output,
        "  Last feed:   {}",
        recency_line(summary.recency.last_feed.as_ref())
    )
    .unwrap();
    writeln!(output, "  Sleep:       {}", sleep_line(&summary.recency.sleep)).unwrap();
    writeln!(
        output,
        "  Last wet:    {}",
        recency_line(summary.recency.last_wet.as_ref())
    )
    .unwrap();
    writeln!(
        output,
        "  Last dirty:  {}",
        recency_line(summary.recency.last_dirty.as_ref())
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "TODAY").unwrap();
    writeln!(output, "─────").unwrap();
    writeln!(
        output,
        "  Feeds: {} ({} ml)   Naps: {} ({})   Wet: {}   Dirty: {}",
        day.milk_count() + day.solid_count,
        whole_ml(day.milk_volume_ml),
        day.nap_count,
        format_duration(day.sleep_minutes),
        day.wet_count,
        day.dirty_count
    )
    .unwrap();

    output
}

/// Runs the dashboard command.
pub fn run(summary: &DashboardSummary, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else {
        print!("{}", format_dashboard(summary));
    }
    Ok(())
}
