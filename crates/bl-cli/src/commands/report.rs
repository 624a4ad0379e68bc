//! Consolidated daily report: `bl report`.
//!
//! Renders today's counters next to yesterday's and the trailing-week daily
//! averages, plus the rolling health log, in a human table or as JSON.

use std::fmt::Write;

use anyhow::Result;
use bl_core::DailyReport;
use bl_core::format::{format_duration, format_duration_frac};
use bl_core::report::HealthEntryKind;

use super::util::{trim_float, whole_ml};

fn row(label: &str, today: &str, yesterday: &str, average: &str) -> String {
    format!("  {label:<14}{today:>9}{yesterday:>11}{average:>9}")
}

/// Formats the human-readable report.
pub fn format_report(report: &DailyReport) -> String {
    let mut output = String::new();
    let today = &report.today;
    let yesterday = &report.yesterday;
    let average = &report.week_average;

    let date = report.reference.format("%A, %b %-d, %Y");
    writeln!(output, "DAILY REPORT: {date}").unwrap();

    writeln!(output).unwrap();
    writeln!(output, "FEEDS").unwrap();
    writeln!(output, "─────").unwrap();
    writeln!(output, "{}", row("", "Today", "Yesterday", "Wk Avg")).unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Bottle",
            &today.bottle_count.to_string(),
            &yesterday.bottle_count.to_string(),
            &average.bottle_count.to_string(),
        )
    )
    .unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Breast",
            &today.breast_count.to_string(),
            &yesterday.breast_count.to_string(),
            &average.breast_count.to_string(),
        )
    )
    .unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Milk volume",
            &format!("{} ml", whole_ml(today.milk_volume_ml)),
            &format!("{} ml", whole_ml(yesterday.milk_volume_ml)),
            &format!("{} ml", average.milk_volume_ml),
        )
    )
    .unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Solids",
            &today.solid_count.to_string(),
            &yesterday.solid_count.to_string(),
            &format!("{:.1}", average.solid_count),
        )
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "SLEEP").unwrap();
    writeln!(output, "─────").unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Naps",
            &today.nap_count.to_string(),
            &yesterday.nap_count.to_string(),
            &average.nap_count.to_string(),
        )
    )
    .unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Total",
            &format_duration(today.sleep_minutes),
            &format_duration(yesterday.sleep_minutes),
            &format_duration_frac(average.sleep_minutes),
        )
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "DIAPERS").unwrap();
    writeln!(output, "───────").unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Wet",
            &today.wet_count.to_string(),
            &yesterday.wet_count.to_string(),
            &average.wet_count.to_string(),
        )
    )
    .unwrap();
    writeln!(
        output,
        "{}",
        row(
            "Dirty",
            &today.dirty_count.to_string(),
            &yesterday.dirty_count.to_string(),
            &average.dirty_count.to_string(),
        )
    )
    .unwrap();

    writeln!(output).unwrap();
    writeln!(output, "WELLNESS").unwrap();
    writeln!(output, "────────").unwrap();
    writeln!(
        output,
        "  Entries: {} today, {} yesterday",
        today.wellness_count, yesterday.wellness_count
    )
    .unwrap();
    if today.has_symptom {
        writeln!(output, "  Symptom recorded today.").unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "HEALTH LOG (last 30 days)").unwrap();
    writeln!(output, "─────────────────────────").unwrap();
    if report.health_log.is_empty() {
        writeln!(output, "  (none)").unwrap();
    } else {
        for entry in &report.health_log {
            let stamp = entry.recorded_at.format("%b %-d %H:%M");
            let text = match &entry.kind {
                HealthEntryKind::Symptom { description } => format!("Symptom: {description}"),
                HealthEntryKind::Temperature { value, unit } => {
                    format!("Temperature: {} {unit}", trim_float(*value))
                }
            };
            writeln!(output, "  {stamp}  {text}").unwrap();
        }
    }

    output
}

/// Runs the report command.
pub fn run(report: &DailyReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print!("{}", format_report(report));
    }
    Ok(())
}
