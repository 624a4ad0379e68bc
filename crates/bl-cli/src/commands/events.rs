//! Day event listing: `bl events`.

use std::fmt::Write;

use anyhow::Result;
use bl_core::Event;
use bl_core::classify::FilterCategory;
use chrono::NaiveDate;
use serde::Serialize;

use super::util::{event_label, format_clock};

/// JSON shape for one listed event.
#[derive(Debug, Serialize)]
struct JsonEvent {
    id: String,
    subject: String,
    time: String,
    category: String,
    label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
}

/// Selects and orders the events of one day, newest first.
#[must_use]
pub fn day_events<'a>(
    events: &'a [Event],
    date: NaiveDate,
    filter: Option<FilterCategory>,
) -> Vec<&'a Event> {
    let mut selected: Vec<&Event> = events
        .iter()
        .filter(|event| event.start.date() == date)
        .filter(|event| filter.is_none_or(|f| f.matches(event)))
        .collect();
    selected.sort_by(|a, b| b.start.cmp(&a.start));
    selected
}

/// Formats the human-readable listing.
pub fn format_events(events: &[&Event], date: NaiveDate) -> String {
    let mut output = String::new();

    writeln!(output, "EVENTS: {}", date.format("%A, %b %-d, %Y")).unwrap();
    writeln!(output).unwrap();

    if events.is_empty() {
        writeln!(output, "  (no events)").unwrap();
        return output;
    }

    for event in events {
        let notes = event
            .notes
            .as_deref()
            .map(|notes| format!("  ({notes})"))
            .unwrap_or_default();
        writeln!(
            output,
            "  {}  {}{notes}",
            format_clock(event.start),
            event_label(event)
        )
        .unwrap();
    }

    output
}

/// Runs the events command.
pub fn run(events: &[&Event], date: NaiveDate, json: bool) -> Result<()> {
    if json {
        let rows: Vec<JsonEvent> = events
            .iter()
            .map(|event| JsonEvent {
                id: event.id.to_string(),
                subject: event.subject.to_string(),
                time: event.start.format("%Y-%m-%dT%H:%M:%S").to_string(),
                category: event.category().as_str().to_string(),
                label: event_label(event),
                notes: event.notes.clone(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        print!("{}", format_events(events, date));
    }
    Ok(())
}
