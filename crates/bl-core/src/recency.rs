//! "Time since last ..." tracking for the dashboard.
//!
//! Works over the full event list, not a single day: the most recent feed may
//! have happened yesterday. Elapsed minutes are measured against a caller
//! supplied `now` so the snapshot is reproducible in tests.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::classify::{DiaperBucket, diaper_bucket};
use crate::event::{Event, EventKind, SleepInterval};

/// When something last happened and how long ago that was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LastSeen {
    pub at: NaiveDateTime,
    /// Whole minutes elapsed, floored. Negative when `at` is in the future.
    pub elapsed_minutes: i64,
}

impl LastSeen {
    fn since(at: NaiveDateTime, now: NaiveDateTime) -> Self {
        Self {
            at,
            elapsed_minutes: (now - at).num_minutes(),
        }
    }
}

/// Sleep is a two-state machine rather than a plain "last seen" entry.
///
/// An open interval means the subject is asleep right now and we report time
/// since falling asleep; otherwise we report time awake since the most recent
/// closed interval ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SleepStatus {
    Asleep {
        since: NaiveDateTime,
        elapsed_minutes: i64,
    },
    Awake {
        /// `None` when no closed sleep has ever been recorded.
        since_wake: Option<LastSeen>,
    },
}

/// Per-tracker recency state at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecencySnapshot {
    pub last_feed: Option<LastSeen>,
    pub sleep: SleepStatus,
    pub last_wet: Option<LastSeen>,
    pub last_dirty: Option<LastSeen>,
}

/// Derives the recency snapshot from the event history.
///
/// Ordering is by start time; the scan keeps the first hit per tracker. Wet
/// and dirty diapers are tracked independently, and a mixed diaper updates
/// the dirty tracker only.
#[must_use]
pub fn recency(events: &[Event], now: NaiveDateTime) -> RecencySnapshot {
    let mut ordered: Vec<&Event> = events.iter().collect();
    ordered.sort_by(|a, b| b.start.cmp(&a.start));

    let mut last_feed = None;
    let mut sleep = None;
    let mut last_wet = None;
    let mut last_dirty = None;

    for event in ordered {
        match &event.kind {
            EventKind::Feed { .. } => {
                if last_feed.is_none() {
                    last_feed = Some(LastSeen::since(event.start, now));
                }
            }
            EventKind::Sleep(interval) => {
                if sleep.is_none() {
                    sleep = Some(match interval {
                        SleepInterval::Open => SleepStatus::Asleep {
                            since: event.start,
                            elapsed_minutes: (now - event.start).num_minutes(),
                        },
                        SleepInterval::Closed { end } => SleepStatus::Awake {
                            since_wake: Some(LastSeen::since(*end, now)),
                        },
                    });
                }
            }
            EventKind::Diaper { status } => match diaper_bucket(*status) {
                DiaperBucket::Wet => {
                    if last_wet.is_none() {
                        last_wet = Some(LastSeen::since(event.start, now));
                    }
                }
                DiaperBucket::Dirty => {
                    if last_dirty.is_none() {
                        last_dirty = Some(LastSeen::since(event.start, now));
                    }
                }
            },
            EventKind::Symptom { .. }
            | EventKind::Movement { .. }
            | EventKind::Measurement { .. }
            | EventKind::Note { .. } => {}
        }
    }

    RecencySnapshot {
        last_feed,
        sleep: sleep.unwrap_or(SleepStatus::Awake { since_wake: None }),
        last_wet,
        last_dirty,
    }
}
