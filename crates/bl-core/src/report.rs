//! Composed report structures: the daily consolidated report and the
//! dashboard summary. Both are plain data for a renderer to format.

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::aggregate::{self, DayTotals, WeekAverages, WindowTotals};
use crate::classify::is_health_log_entry;
use crate::event::{Event, EventKind, MeasurementKind};
use crate::recency::{self, RecencySnapshot};
use crate::types::EventId;

/// Inclusive lookback for the health log, in calendar days.
pub const HEALTH_LOG_DAYS: u64 = 30;

/// Maximum number of health log entries surfaced.
pub const HEALTH_LOG_LIMIT: usize = 10;

/// What a health log entry records.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthEntryKind {
    Symptom { description: String },
    Temperature { value: f64, unit: String },
}

/// One row of the rolling health log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthEntry {
    pub event_id: EventId,
    pub recorded_at: NaiveDateTime,
    #[serde(flatten)]
    pub kind: HealthEntryKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// The consolidated daily report: three comparison windows plus the rolling
/// health log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReport {
    pub reference: NaiveDate,
    pub today: DayTotals,
    pub yesterday: DayTotals,
    pub week_average: WeekAverages,
    pub health_log: Vec<HealthEntry>,
}

/// Live dashboard state for a reference instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub date: NaiveDate,
    pub day: DayTotals,
    pub recency: RecencySnapshot,
}

fn health_entry(event: &Event) -> Option<HealthEntry> {
    let kind = match &event.kind {
        EventKind::Symptom { description } => HealthEntryKind::Symptom {
            description: description.clone(),
        },
        EventKind::Measurement {
            kind: MeasurementKind::Temperature,
            value,
            unit,
        } => HealthEntryKind::Temperature {
            value: *value,
            unit: unit.clone(),
        },
        _ => return None,
    };
    Some(HealthEntry {
        event_id: event.id.clone(),
        recorded_at: event.start,
        kind,
        notes: event.notes.clone(),
    })
}

/// Collects the health log: symptoms and temperature readings whose calendar
/// day falls within the last `HEALTH_LOG_DAYS` days of the reference day,
/// newest first, capped at `HEALTH_LOG_LIMIT`.
#[must_use]
pub fn health_log(events: &[Event], reference: NaiveDate) -> Vec<HealthEntry> {
    let cutoff = reference - Days::new(HEALTH_LOG_DAYS);
    let mut entries: Vec<HealthEntry> = events
        .iter()
        .filter(|event| is_health_log_entry(event))
        .filter(|event| {
            let day = event.start.date();
            day >= cutoff && day <= reference
        })
        .filter_map(health_entry)
        .collect();
    entries.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
    entries.truncate(HEALTH_LOG_LIMIT);
    entries
}

/// Composes the consolidated daily report for a reference day.
#[must_use]
pub fn compose(events: &[Event], reference: NaiveDate) -> DailyReport {
    let WindowTotals {
        today,
        yesterday,
        trailing_week,
    } = aggregate::aggregate(events, reference);

    DailyReport {
        reference,
        week_average: WeekAverages::from_week(&trailing_week),
        today,
        yesterday,
        health_log: health_log(events, reference),
    }
}

/// Composes the dashboard summary: today's counters plus recency state at
/// `now`.
#[must_use]
pub fn compose_dashboard(
    events: &[Event],
    reference: NaiveDate,
    now: NaiveDateTime,
) -> DashboardSummary {
    DashboardSummary {
        date: reference,
        day: aggregate::day_totals(events, reference),
        recency: recency::recency(events, now),
    }
}
