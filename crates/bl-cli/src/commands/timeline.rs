//! Day timeline: `bl timeline`.
//!
//! Prints the layout computed by the engine: one row per placed event, in
//! axis order, with a marker row for the current time when the reference day
//! is today.

use std::fmt::Write;

use anyhow::Result;
use bl_core::format::format_duration;
use bl_core::timeline::{DisplayDuration, TimelineLayout};
use serde::Serialize;

use super::util::format_offset;

/// JSON shape for one placement.
#[derive(Debug, Serialize)]
struct JsonPlacement {
    event_id: String,
    category: String,
    offset_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_minutes: Option<i64>,
    ongoing: bool,
}

#[derive(Debug, Serialize)]
struct JsonTimeline {
    date: String,
    placements: Vec<JsonPlacement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    now_marker: Option<u32>,
}

/// Formats the human-readable timeline.
pub fn format_timeline(layout: &TimelineLayout, date: chrono::NaiveDate) -> String {
    let mut output = String::new();

    writeln!(output, "TIMELINE: {}", date.format("%A, %b %-d, %Y")).unwrap();
    writeln!(output).unwrap();

    if layout.placements.is_empty() {
        writeln!(output, "  (no events)").unwrap();
        return output;
    }

    let mut marker_written = false;
    for placement in &layout.placements {
        if let Some(now) = layout.now_marker {
            if !marker_written && placement.offset_minutes > now {
                writeln!(output, "  {} ── now", format_offset(now)).unwrap();
                marker_written = true;
            }
        }
        let extent = match placement.duration {
            DisplayDuration::Minutes(minutes) => format_duration(minutes),
            DisplayDuration::Ongoing => "ongoing".to_string(),
        };
        writeln!(
            output,
            "  {}  {:<8}{}",
            format_offset(placement.offset_minutes),
            placement.category.as_str(),
            extent
        )
        .unwrap();
    }
    if let Some(now) = layout.now_marker {
        if !marker_written {
            writeln!(output, "  {} ── now", format_offset(now)).unwrap();
        }
    }

    output
}

fn to_json(layout: &TimelineLayout, date: chrono::NaiveDate) -> JsonTimeline {
    JsonTimeline {
        date: date.format("%Y-%m-%d").to_string(),
        placements: layout
            .placements
            .iter()
            .map(|p| JsonPlacement {
                event_id: p.event_id.to_string(),
                category: p.category.as_str().to_string(),
                offset_minutes: p.offset_minutes,
                duration_minutes: match p.duration {
                    DisplayDuration::Minutes(minutes) => Some(minutes),
                    DisplayDuration::Ongoing => None,
                },
                ongoing: matches!(p.duration, DisplayDuration::Ongoing),
            })
            .collect(),
        now_marker: layout.now_marker,
    }
}

/// Runs the timeline command.
pub fn run(layout: &TimelineLayout, date: chrono::NaiveDate, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&to_json(layout, date))?);
    } else {
        print!("{}", format_timeline(layout, date));
    }
    Ok(())
}
