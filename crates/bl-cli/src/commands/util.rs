//! Shared helpers for the subcommands.

use anyhow::{Context, Result, bail};
use bl_core::event::{self, Event, EventKind, SleepInterval};
use bl_core::format::format_duration;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// The current wall-clock instant in the local clock.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Resolves the reference day: an explicit `--date`, or today.
#[must_use]
pub fn resolve_date(date: Option<NaiveDate>) -> NaiveDate {
    date.unwrap_or_else(|| Local::now().date_naive())
}

/// Parses a `--at` argument: `HH:MM` on the current day, or a full timestamp.
/// `None` means now.
pub fn resolve_at(at: Option<&str>, now: NaiveDateTime) -> Result<NaiveDateTime> {
    let Some(raw) = at else { return Ok(now) };

    if let Ok(time) = NaiveTime::parse_from_str(raw, "%H:%M") {
        return Ok(now.date().and_time(time));
    }
    if let Some(instant) = event::parse_timestamp(raw) {
        return Ok(instant);
    }
    bail!("invalid time: {raw} (expected HH:MM or YYYY-MM-DDTHH:MM:SS)")
}

/// Parses a `--end` argument relative to the sleep start: `HH:MM` on the
/// start's day, or a full timestamp.
pub fn resolve_end(end: &str, start: NaiveDateTime) -> Result<NaiveDateTime> {
    if let Ok(time) = NaiveTime::parse_from_str(end, "%H:%M") {
        return Ok(start.date().and_time(time));
    }
    event::parse_timestamp(end)
        .with_context(|| format!("invalid time: {end} (expected HH:MM or YYYY-MM-DDTHH:MM:SS)"))
}

/// Formats an on-axis timeline offset as `HH:MM`.
#[must_use]
pub fn format_offset(offset_minutes: u32) -> String {
    format!("{:02}:{:02}", offset_minutes / 60, offset_minutes % 60)
}

/// Formats an instant's time of day as `HH:MM`.
#[must_use]
pub fn format_clock(instant: NaiveDateTime) -> String {
    format!("{:02}:{:02}", instant.hour(), instant.minute())
}

/// One-line human label for an event.
#[must_use]
pub fn event_label(event: &Event) -> String {
    match &event.kind {
        EventKind::Feed {
            method,
            amount_ml,
            side,
            item,
        } => {
            use bl_core::event::{FeedMethod, Side};
            match method {
                FeedMethod::Bottle => amount_ml.map_or_else(
                    || "Bottle feed".to_string(),
                    |ml| format!("Bottle feed ({} ml)", trim_float(ml)),
                ),
                FeedMethod::Breast => {
                    let side = match side {
                        Some(Side::Left) => " (left)",
                        Some(Side::Right) => " (right)",
                        Some(Side::Both) => " (both)",
                        None => "",
                    };
                    format!("Breast feed{side}")
                }
                FeedMethod::Solid => item.as_deref().map_or_else(
                    || "Solid food".to_string(),
                    |item| format!("Solid food: {item}"),
                ),
            }
        }
        EventKind::Sleep(SleepInterval::Open) => "Sleep (ongoing)".to_string(),
        EventKind::Sleep(SleepInterval::Closed { .. }) => {
            let minutes = event.sleep_minutes().unwrap_or(0);
            format!("Sleep ({})", format_duration(minutes))
        }
        EventKind::Diaper { status } => {
            use bl_core::event::DiaperStatus;
            match status {
                DiaperStatus::Wet => "Wet diaper".to_string(),
                DiaperStatus::Dirty => "Dirty diaper".to_string(),
                DiaperStatus::Mixed => "Mixed diaper".to_string(),
            }
        }
        EventKind::Symptom { description } => format!("Symptom: {description}"),
        EventKind::Movement { description } => description.as_deref().map_or_else(
            || "Movement".to_string(),
            |description| format!("Movement: {description}"),
        ),
        EventKind::Measurement { kind, value, unit } => {
            use bl_core::event::MeasurementKind;
            let label = match kind {
                MeasurementKind::Weight => "Weight",
                MeasurementKind::Height => "Height",
                MeasurementKind::Temperature => "Temperature",
            };
            format!("{label}: {} {unit}", trim_float(*value))
        }
        EventKind::Note { text } => text.as_deref().map_or_else(
            || "Note".to_string(),
            |text| format!("Note: {text}"),
        ),
    }
}

/// Rounds a millilitre total for display.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn whole_ml(value: f64) -> u64 {
    value.round().max(0.0) as u64
}

/// Renders a float without a trailing `.0` for whole values.
#[must_use]
pub fn trim_float(value: f64) -> String {
    if (value - value.trunc()).abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bl_core::event::{DiaperStatus, FeedMethod, MeasurementKind};
    use bl_core::{EventId, SubjectId};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn event(kind: EventKind) -> Event {
        Event {
            id: EventId::new("evt-1").unwrap(),
            subject: SubjectId::new("baby-1").unwrap(),
            start: at(9, 0),
            kind,
            notes: None,
        }
    }

    #[test]
    fn resolve_at_accepts_bare_time() {
        let now = at(14, 0);
        assert_eq!(resolve_at(Some("09:30"), now).unwrap(), at(9, 30));
        assert_eq!(resolve_at(None, now).unwrap(), now);
        assert!(resolve_at(Some("quarter past"), now).is_err());
    }

    #[test]
    fn resolve_at_accepts_full_timestamp() {
        let now = at(14, 0);
        let parsed = resolve_at(Some("2024-03-09T21:15:00"), now).unwrap();
        assert_eq!(
            parsed,
            NaiveDate::from_ymd_opt(2024, 3, 9)
                .unwrap()
                .and_hms_opt(21, 15, 0)
                .unwrap()
        );
    }

    #[test]
    fn labels_cover_the_common_shapes() {
        let bottle = event(EventKind::Feed {
            method: FeedMethod::Bottle,
            amount_ml: Some(120.0),
            side: None,
            item: None,
        });
        assert_eq!(event_label(&bottle), "Bottle feed (120 ml)");

        let nap = event(EventKind::Sleep(SleepInterval::Closed { end: at(10, 30) }));
        assert_eq!(event_label(&nap), "Sleep (1h 30m)");

        let diaper = event(EventKind::Diaper {
            status: DiaperStatus::Mixed,
        });
        assert_eq!(event_label(&diaper), "Mixed diaper");

        let temp = event(EventKind::Measurement {
            kind: MeasurementKind::Temperature,
            value: 99.1,
            unit: "°F".to_string(),
        });
        assert_eq!(event_label(&temp), "Temperature: 99.1 °F");
    }

    #[test]
    fn offsets_render_zero_padded() {
        assert_eq!(format_offset(9 * 60 + 5), "09:05");
        assert_eq!(format_offset(0), "00:00");
    }
}
