//! Event data model and ingestion-time normalization.
//!
//! Events arrive from the storage collaborator as loosely-typed JSON records
//! ([`RawEvent`]) with an open `details` bag. [`normalize`] resolves each
//! record once into a fully-typed [`Event`] so the aggregation, recency, and
//! layout components stay total functions over a pre-resolved shape. Records
//! that cannot be resolved (unknown category, unparseable start time, missing
//! required fields) are dropped with a warning rather than failing the batch.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{EventId, SubjectId};

/// Canonical event categories. A closed set; the category of an event never
/// changes after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Feed,
    Sleep,
    Diaper,
    Symptom,
    Movement,
    Measurement,
    Note,
}

impl Category {
    pub const ALL: [Self; 7] = [
        Self::Feed,
        Self::Sleep,
        Self::Diaper,
        Self::Symptom,
        Self::Movement,
        Self::Measurement,
        Self::Note,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Sleep => "sleep",
            Self::Diaper => "diaper",
            Self::Symptom => "symptom",
            Self::Movement => "movement",
            Self::Measurement => "measurement",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed" => Ok(Self::Feed),
            "sleep" => Ok(Self::Sleep),
            "diaper" => Ok(Self::Diaper),
            "symptom" => Ok(Self::Symptom),
            "movement" => Ok(Self::Movement),
            "measurement" => Ok(Self::Measurement),
            "note" => Ok(Self::Note),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown category strings.
#[derive(Debug, Clone)]
pub struct UnknownCategory(String);

impl fmt::Display for UnknownCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown event category: {}", self.0)
    }
}

impl std::error::Error for UnknownCategory {}

/// How a feed was given. Records without an explicit method default to bottle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedMethod {
    #[default]
    Bottle,
    Breast,
    Solid,
}

/// Which side a breast feed was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Both,
}

/// Diaper contents. Records without an explicit status default to wet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiaperStatus {
    #[default]
    Wet,
    Dirty,
    Mixed,
}

/// What a measurement records. The unit is paired to the kind by a fixed
/// lookup, not chosen independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    #[default]
    Weight,
    Height,
    Temperature,
}

impl MeasurementKind {
    /// Canonical unit for this kind of measurement.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Self::Weight => "lb",
            Self::Height => "in",
            Self::Temperature => "°F",
        }
    }
}

/// A sleep event's interval state.
///
/// Sleep is the only interval-bearing category. The absence of an end time is
/// meaningful (the subject is currently asleep), so it is a tagged variant
/// rather than a nullable field: every consumer must decide what "still
/// ongoing" means for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepInterval {
    /// Sleep has started but not ended.
    Open,
    /// Sleep ended at the given time (always >= the event's start).
    Closed { end: NaiveDateTime },
}

/// Category-shaped event payload.
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Feed {
        method: FeedMethod,
        amount_ml: Option<f64>,
        side: Option<Side>,
        /// Solid food name (e.g. "banana").
        item: Option<String>,
    },
    Sleep(SleepInterval),
    Diaper {
        status: DiaperStatus,
    },
    Symptom {
        description: String,
    },
    Movement {
        description: Option<String>,
    },
    Measurement {
        kind: MeasurementKind,
        value: f64,
        unit: String,
    },
    Note {
        text: Option<String>,
    },
}

impl EventKind {
    #[must_use]
    pub const fn category(&self) -> Category {
        match self {
            Self::Feed { .. } => Category::Feed,
            Self::Sleep(_) => Category::Sleep,
            Self::Diaper { .. } => Category::Diaper,
            Self::Symptom { .. } => Category::Symptom,
            Self::Movement { .. } => Category::Movement,
            Self::Measurement { .. } => Category::Measurement,
            Self::Note { .. } => Category::Note,
        }
    }
}

/// A fully-resolved caregiving event for one subject.
///
/// Timestamps are zone-less wall-clock instants: the engine performs no
/// time-zone conversion, so callers must supply events and reference times in
/// the same local clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub subject: SubjectId,
    /// The event's anchor time.
    pub start: NaiveDateTime,
    pub kind: EventKind,
    /// Free-text annotation, orthogonal to the typed payload.
    pub notes: Option<String>,
}

impl Event {
    #[must_use]
    pub const fn category(&self) -> Category {
        self.kind.category()
    }

    /// Duration of a closed sleep event in whole minutes, rounded to nearest.
    ///
    /// `None` for open sleep events and for every non-sleep category: open
    /// intervals contribute nothing to duration totals (they surface through
    /// recency instead), and point events carry no meaningful duration.
    #[must_use]
    pub fn sleep_minutes(&self) -> Option<i64> {
        match self.kind {
            EventKind::Sleep(SleepInterval::Closed { end }) => {
                let ms = (end - self.start).num_milliseconds().max(0);
                Some((ms + 30_000).div_euclid(60_000))
            }
            _ => None,
        }
    }
}

/// The wire shape of an event as produced by the storage collaborator and the
/// natural-language parser: camelCase JSON with string timestamps and an open
/// `details` bag keyed by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: EventId,
    pub subject_id: SubjectId,
    #[serde(alias = "type")]
    pub category: String,
    pub start_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default)]
    pub details: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Audit timestamp; never used in analytics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Parses a timestamp string as a wall-clock instant.
///
/// RFC 3339 strings keep their recorded wall-clock reading (the offset is
/// dropped, not converted); bare `YYYY-MM-DDTHH:MM:SS` forms are accepted for
/// legacy records.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

fn detail_str<'a>(details: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    details.get(key).and_then(serde_json::Value::as_str)
}

fn detail_f64(details: &serde_json::Value, key: &str) -> Option<f64> {
    details.get(key).and_then(serde_json::Value::as_f64)
}

/// Resolves one raw record into a typed event.
///
/// Returns `None` when the record cannot participate in any computation:
/// unknown category, unparseable start time, or a measurement without a
/// numeric value. Missing optional detail fields fall back to the documented
/// defaults instead (feed method → bottle, diaper status → wet, measurement
/// kind → weight, missing unit → the kind's canonical unit).
#[must_use]
pub fn normalize(raw: &RawEvent) -> Option<Event> {
    let category = match raw.category.parse::<Category>() {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!(event_id = %raw.id, error = %e, "skipping event with unknown category");
            return None;
        }
    };

    let Some(start) = parse_timestamp(&raw.start_time) else {
        tracing::warn!(
            event_id = %raw.id,
            start_time = %raw.start_time,
            "skipping event with unparseable start time"
        );
        return None;
    };

    let details = &raw.details;
    let kind = match category {
        Category::Feed => EventKind::Feed {
            method: match detail_str(details, "method") {
                Some("breast") => FeedMethod::Breast,
                Some("solid") => FeedMethod::Solid,
                // Absence of an explicit solid/breast marker means bottle.
                _ => FeedMethod::Bottle,
            },
            amount_ml: detail_f64(details, "amountMl").or_else(|| detail_f64(details, "amountml")),
            side: match detail_str(details, "side") {
                Some("left") => Some(Side::Left),
                Some("right") => Some(Side::Right),
                Some("both") => Some(Side::Both),
                _ => None,
            },
            item: detail_str(details, "item").map(String::from),
        },
        Category::Sleep => EventKind::Sleep(match raw.end_time.as_deref().map(parse_timestamp) {
            None => SleepInterval::Open,
            Some(Some(end)) => SleepInterval::Closed { end: end.max(start) },
            Some(None) => {
                // A present-but-unparseable end must not read as "still
                // asleep"; close the interval at zero length instead.
                tracing::warn!(event_id = %raw.id, "sleep event has unparseable end time");
                SleepInterval::Closed { end: start }
            }
        }),
        Category::Diaper => EventKind::Diaper {
            status: match detail_str(details, "status") {
                Some("dirty") => DiaperStatus::Dirty,
                Some("mixed") => DiaperStatus::Mixed,
                // Anything else, including a missing status, counts as wet.
                _ => DiaperStatus::Wet,
            },
        },
        Category::Symptom => EventKind::Symptom {
            description: detail_str(details, "description")
                .map(String::from)
                .unwrap_or_default(),
        },
        Category::Movement => EventKind::Movement {
            description: detail_str(details, "description")
                .or_else(|| detail_str(details, "notes"))
                .map(String::from),
        },
        Category::Measurement => {
            let kind = match detail_str(details, "type") {
                Some("height") => MeasurementKind::Height,
                Some("temperature") => MeasurementKind::Temperature,
                _ => MeasurementKind::Weight,
            };
            let Some(value) = detail_f64(details, "value") else {
                tracing::warn!(event_id = %raw.id, "skipping measurement without numeric value");
                return None;
            };
            EventKind::Measurement {
                kind,
                value,
                unit: detail_str(details, "unit")
                    .map_or_else(|| kind.unit().to_string(), String::from),
            }
        }
        Category::Note => EventKind::Note {
            text: detail_str(details, "notes")
                .or_else(|| detail_str(details, "description"))
                .map(String::from),
        },
    };

    Some(Event {
        id: raw.id.clone(),
        subject: raw.subject_id.clone(),
        start,
        kind,
        notes: raw.notes.clone(),
    })
}

/// Normalizes a batch of raw records, dropping the unresolvable ones.
#[must_use]
pub fn normalize_all(raws: &[RawEvent]) -> Vec<Event> {
    raws.iter().filter_map(normalize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(category: &str, start: &str, details: serde_json::Value) -> RawEvent {
        RawEvent {
            id: EventId::new("evt-1").unwrap(),
            subject_id: SubjectId::new("baby-1").unwrap(),
            category: category.to_string(),
            start_time: start.to_string(),
            end_time: None,
            details,
            notes: None,
            created_at: None,
        }
    }

    #[test]
    fn category_roundtrip_all_variants() {
        for category in Category::ALL {
            let s = category.as_str();
            let parsed: Category = s.parse().expect("should parse");
            assert_eq!(parsed, category, "roundtrip failed for {category:?}");
        }
    }

    #[test]
    fn unknown_category_errors() {
        let result: Result<Category, _> = "bath".parse();
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().to_string(),
            "unknown event category: bath"
        );
    }

    #[test]
    fn parse_timestamp_accepts_rfc3339_and_bare_forms() {
        let wall = parse_timestamp("2024-03-01T14:05:00-05:00").unwrap();
        assert_eq!(wall.format("%H:%M").to_string(), "14:05");

        assert!(parse_timestamp("2024-03-01T14:05:00").is_some());
        assert!(parse_timestamp("2024-03-01 14:05:00").is_some());
        assert!(parse_timestamp("not a time").is_none());
    }

    #[test]
    fn normalize_feed_defaults_to_bottle() {
        let event = normalize(&raw("feed", "2024-03-01T09:00:00", json!({}))).unwrap();
        match event.kind {
            EventKind::Feed { method, amount_ml, .. } => {
                assert_eq!(method, FeedMethod::Bottle);
                assert_eq!(amount_ml, None);
            }
            other => panic!("expected feed, got {other:?}"),
        }
    }

    #[test]
    fn normalize_feed_reads_legacy_amount_key() {
        let event =
            normalize(&raw("feed", "2024-03-01T09:00:00", json!({"amountml": 120}))).unwrap();
        match event.kind {
            EventKind::Feed { amount_ml, .. } => assert_eq!(amount_ml, Some(120.0)),
            other => panic!("expected feed, got {other:?}"),
        }
    }

    #[test]
    fn normalize_drops_unknown_category() {
        assert!(normalize(&raw("bath", "2024-03-01T09:00:00", json!({}))).is_none());
    }

    #[test]
    fn normalize_drops_unparseable_start_time() {
        assert!(normalize(&raw("feed", "yesterday-ish", json!({}))).is_none());
    }

    #[test]
    fn normalize_sleep_without_end_is_open() {
        let event = normalize(&raw("sleep", "2024-03-01T13:00:00", json!({}))).unwrap();
        assert_eq!(event.kind, EventKind::Sleep(SleepInterval::Open));
        assert_eq!(event.sleep_minutes(), None);
    }

    #[test]
    fn normalize_sleep_clamps_end_before_start() {
        let mut r = raw("sleep", "2024-03-01T13:00:00", json!({}));
        r.end_time = Some("2024-03-01T12:00:00".to_string());
        let event = normalize(&r).unwrap();
        assert_eq!(event.sleep_minutes(), Some(0));
    }

    #[test]
    fn normalize_sleep_with_bad_end_is_zero_length() {
        let mut r = raw("sleep", "2024-03-01T13:00:00", json!({}));
        r.end_time = Some("???".to_string());
        let event = normalize(&r).unwrap();
        // Must not read as "currently asleep".
        assert_eq!(event.sleep_minutes(), Some(0));
    }

    #[test]
    fn sleep_minutes_rounds_to_nearest() {
        let mut r = raw("sleep", "2024-03-01T13:00:00", json!({}));
        r.end_time = Some("2024-03-01T14:10:31".to_string());
        let event = normalize(&r).unwrap();
        assert_eq!(event.sleep_minutes(), Some(71));

        r.end_time = Some("2024-03-01T14:10:29".to_string());
        let event = normalize(&r).unwrap();
        assert_eq!(event.sleep_minutes(), Some(70));
    }

    #[test]
    fn normalize_diaper_defaults_to_wet() {
        let event = normalize(&raw("diaper", "2024-03-01T09:00:00", json!({}))).unwrap();
        assert_eq!(event.kind, EventKind::Diaper { status: DiaperStatus::Wet });

        let event = normalize(&raw(
            "diaper",
            "2024-03-01T09:00:00",
            json!({"status": "soaked"}),
        ))
        .unwrap();
        assert_eq!(event.kind, EventKind::Diaper { status: DiaperStatus::Wet });
    }

    #[test]
    fn normalize_measurement_stamps_canonical_unit() {
        let event = normalize(&raw(
            "measurement",
            "2024-03-01T09:00:00",
            json!({"type": "temperature", "value": 100.4}),
        ))
        .unwrap();
        match event.kind {
            EventKind::Measurement { kind, unit, .. } => {
                assert_eq!(kind, MeasurementKind::Temperature);
                assert_eq!(unit, "°F");
            }
            other => panic!("expected measurement, got {other:?}"),
        }
    }

    #[test]
    fn normalize_drops_measurement_without_value() {
        assert!(normalize(&raw(
            "measurement",
            "2024-03-01T09:00:00",
            json!({"type": "weight"}),
        ))
        .is_none());
    }

    #[test]
    fn normalize_all_skips_bad_records() {
        let raws = vec![
            raw("feed", "2024-03-01T09:00:00", json!({"amountMl": 90})),
            raw("bath", "2024-03-01T10:00:00", json!({})),
            raw("diaper", "bogus", json!({})),
        ];
        let events = normalize_all(&raws);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].category(), Category::Feed);
    }

    #[test]
    fn raw_event_accepts_legacy_type_field() {
        let json = r#"{
            "id": "evt-9",
            "subjectId": "baby-1",
            "type": "feed",
            "startTime": "2024-03-01T09:00:00",
            "details": {"method": "breast", "side": "left"}
        }"#;
        let parsed: RawEvent = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.category, "feed");

        let event = normalize(&parsed).unwrap();
        match event.kind {
            EventKind::Feed { method, side, .. } => {
                assert_eq!(method, FeedMethod::Breast);
                assert_eq!(side, Some(Side::Left));
            }
            other => panic!("expected feed, got {other:?}"),
        }
    }
}
