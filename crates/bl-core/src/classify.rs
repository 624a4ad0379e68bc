//! Shared classification predicates.
//!
//! Every downstream component (aggregation, recency, timeline layout, the
//! event list) classifies events through this module, so "is this a dirty
//! diaper" has exactly one definition.

use std::fmt;
use std::str::FromStr;

use crate::event::{Category, DiaperStatus, Event, EventKind, FeedMethod, MeasurementKind};

/// The four top-level filter groups exposed to presentation.
///
/// Wellness is a super-bucket: everything that is not feed, sleep, or diaper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    Feed,
    Sleep,
    Diaper,
    Wellness,
}

impl FilterCategory {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feed => "feed",
            Self::Sleep => "sleep",
            Self::Diaper => "diaper",
            Self::Wellness => "wellness",
        }
    }

    /// The shared category-membership predicate.
    #[must_use]
    pub const fn matches(&self, event: &Event) -> bool {
        match self {
            Self::Feed => matches!(event.category(), Category::Feed),
            Self::Sleep => matches!(event.category(), Category::Sleep),
            Self::Diaper => matches!(event.category(), Category::Diaper),
            Self::Wellness => matches!(
                event.category(),
                Category::Symptom | Category::Movement | Category::Measurement | Category::Note
            ),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "feed" => Ok(Self::Feed),
            "sleep" => Ok(Self::Sleep),
            "diaper" => Ok(Self::Diaper),
            "wellness" => Ok(Self::Wellness),
            _ => Err(format!(
                "invalid filter category: {s} (expected feed, sleep, diaper, or wellness)"
            )),
        }
    }
}

/// How a feed counts toward nutrition totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedClass {
    /// Bottle or breast. Volume is the recorded amount; breast feeds usually
    /// have none and contribute 0 ml while still counting as a feed.
    Milk { volume_ml: f64 },
    Solid,
}

/// Classifies a feed event. `None` for non-feed events.
#[must_use]
pub fn feed_class(event: &Event) -> Option<FeedClass> {
    match &event.kind {
        EventKind::Feed {
            method: FeedMethod::Solid,
            ..
        } => Some(FeedClass::Solid),
        EventKind::Feed { amount_ml, .. } => Some(FeedClass::Milk {
            volume_ml: amount_ml.unwrap_or(0.0),
        }),
        _ => None,
    }
}

/// The two diaper tallies surfaced downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiaperBucket {
    Wet,
    Dirty,
}

/// Folds the three-valued diaper status into the two tracked buckets: dirty
/// and mixed both count as dirty, everything else as wet.
#[must_use]
pub const fn diaper_bucket(status: DiaperStatus) -> DiaperBucket {
    match status {
        DiaperStatus::Dirty | DiaperStatus::Mixed => DiaperBucket::Dirty,
        DiaperStatus::Wet => DiaperBucket::Wet,
    }
}

/// Whether an event qualifies for the rolling 30-day health log: symptoms,
/// and temperature measurements.
#[must_use]
pub const fn is_health_log_entry(event: &Event) -> bool {
    match &event.kind {
        EventKind::Symptom { .. } => true,
        EventKind::Measurement { kind, .. } => matches!(kind, MeasurementKind::Temperature),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SleepInterval;
    use crate::types::{EventId, SubjectId};
    use chrono::NaiveDate;

    fn event(kind: EventKind) -> Event {
        Event {
            id: EventId::new("evt-1").unwrap(),
            subject: SubjectId::new("baby-1").unwrap(),
            start: NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            kind,
            notes: None,
        }
    }

    #[test]
    fn wellness_covers_everything_but_routine_categories() {
        let wellness = [
            EventKind::Symptom {
                description: "rash".to_string(),
            },
            EventKind::Movement { description: None },
            EventKind::Measurement {
                kind: MeasurementKind::Weight,
                value: 8.2,
                unit: "lb".to_string(),
            },
            EventKind::Note { text: None },
        ];
        for kind in wellness {
            assert!(FilterCategory::Wellness.matches(&event(kind)));
        }

        assert!(!FilterCategory::Wellness.matches(&event(EventKind::Sleep(SleepInterval::Open))));
        assert!(!FilterCategory::Wellness.matches(&event(EventKind::Diaper {
            status: DiaperStatus::Wet,
        })));
    }

    #[test]
    fn filter_category_parses() {
        assert_eq!("wellness".parse::<FilterCategory>().unwrap(), FilterCategory::Wellness);
        assert!("bath".parse::<FilterCategory>().is_err());
    }

    #[test]
    fn breast_feed_is_milk_with_zero_volume() {
        let e = event(EventKind::Feed {
            method: FeedMethod::Breast,
            amount_ml: None,
            side: None,
            item: None,
        });
        assert_eq!(feed_class(&e), Some(FeedClass::Milk { volume_ml: 0.0 }));
    }

    #[test]
    fn solid_feed_is_solid_even_with_amount() {
        let e = event(EventKind::Feed {
            method: FeedMethod::Solid,
            amount_ml: Some(50.0),
            side: None,
            item: Some("banana".to_string()),
        });
        assert_eq!(feed_class(&e), Some(FeedClass::Solid));
    }

    #[test]
    fn mixed_diaper_counts_as_dirty() {
        assert_eq!(diaper_bucket(DiaperStatus::Mixed), DiaperBucket::Dirty);
        assert_eq!(diaper_bucket(DiaperStatus::Dirty), DiaperBucket::Dirty);
        assert_eq!(diaper_bucket(DiaperStatus::Wet), DiaperBucket::Wet);
    }

    #[test]
    fn health_log_takes_symptoms_and_temperatures_only() {
        assert!(is_health_log_entry(&event(EventKind::Symptom {
            description: "cough".to_string(),
        })));
        assert!(is_health_log_entry(&event(EventKind::Measurement {
            kind: MeasurementKind::Temperature,
            value: 100.4,
            unit: "°F".to_string(),
        })));
        assert!(!is_health_log_entry(&event(EventKind::Measurement {
            kind: MeasurementKind::Weight,
            value: 8.2,
            unit: "lb".to_string(),
        })));
        assert!(!is_health_log_entry(&event(EventKind::Note { text: None })));
    }
}
