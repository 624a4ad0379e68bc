//! Event recording: `bl log <category>`.
//!
//! Builds a raw record in the store's wire shape, appends it, then echoes the
//! normalized event back so the user sees exactly what was recorded.

use anyhow::{Context, Result};
use bl_core::event::MeasurementKind;
use bl_core::{EventId, RawEvent, SubjectId, normalize};
use chrono::NaiveDateTime;
use serde_json::json;
use uuid::Uuid;

use crate::cli::LogEntry;
use crate::store::Store;

use super::util::{event_label, format_clock, resolve_at, resolve_end};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Builds the raw record for a log entry.
pub fn build_record(
    entry: &LogEntry,
    subject: &str,
    now: NaiveDateTime,
) -> Result<RawEvent> {
    let id = EventId::new(Uuid::new_v4().to_string()).context("generated id was invalid")?;
    let subject_id =
        SubjectId::new(subject).with_context(|| format!("invalid subject: {subject:?}"))?;

    let (category, at, end_time, details, notes) = match entry {
        LogEntry::Feed {
            method,
            amount_ml,
            side,
            item,
            at,
            notes,
        } => {
            let method = bl_core::event::FeedMethod::from(*method);
            let mut details = json!({ "method": serde_json::to_value(method)? });
            if let Some(ml) = amount_ml {
                details["amountMl"] = json!(ml);
            }
            if let Some(side) = side {
                details["side"] = serde_json::to_value(bl_core::event::Side::from(*side))?;
            }
            if let Some(item) = item {
                details["item"] = json!(item);
            }
            ("feed", at, None, details, notes.clone())
        }
        LogEntry::Sleep { at, end, notes } => {
            let start = resolve_at(at.as_deref(), now)?;
            let end_time = end
                .as_deref()
                .map(|end| resolve_end(end, start))
                .transpose()?
                .map(|end| end.format(TIMESTAMP_FORMAT).to_string());
            ("sleep", at, end_time, json!({}), notes.clone())
        }
        LogEntry::Diaper { status, at, notes } => {
            let status = bl_core::event::DiaperStatus::from(*status);
            (
                "diaper",
                at,
                None,
                json!({ "status": serde_json::to_value(status)? }),
                notes.clone(),
            )
        }
        LogEntry::Symptom {
            description,
            at,
            notes,
        } => (
            "symptom",
            at,
            None,
            json!({ "description": description }),
            notes.clone(),
        ),
        LogEntry::Movement {
            description,
            at,
            notes,
        } => {
            let mut details = json!({});
            if let Some(description) = description {
                details["description"] = json!(description);
            }
            ("movement", at, None, details, notes.clone())
        }
        LogEntry::Measurement {
            kind,
            value,
            at,
            notes,
        } => {
            let kind = MeasurementKind::from(*kind);
            let details = json!({
                "type": serde_json::to_value(kind)?,
                "value": value,
                "unit": kind.unit(),
            });
            ("measurement", at, None, details, notes.clone())
        }
        LogEntry::Note { text, at } => {
            let mut details = json!({});
            if let Some(text) = text {
                details["notes"] = json!(text);
            }
            ("note", at, None, details, None)
        }
    };

    let start = resolve_at(at.as_deref(), now)?;
    Ok(RawEvent {
        id,
        subject_id,
        category: category.to_string(),
        start_time: start.format(TIMESTAMP_FORMAT).to_string(),
        end_time,
        details,
        notes,
        created_at: Some(now.format(TIMESTAMP_FORMAT).to_string()),
    })
}

/// Runs the log command.
pub fn run(store: &Store, entry: &LogEntry, subject: &str, now: NaiveDateTime) -> Result<()> {
    let record = build_record(entry, subject, now)?;
    store.append(&record)?;

    // The record round-trips through the same normalization the readers use.
    if let Some(event) = normalize(&record) {
        println!("Logged: {} at {}", event_label(&event), format_clock(event.start));
    }
    Ok(())
}
