//! Day-timeline placement on a 1440-minute axis.
//!
//! The layout is purely positional: each event of the reference day becomes a
//! placement with an offset and an extent. Concurrent events keep their true
//! offsets and may overlap; resolving that visually is the renderer's job.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::classify::FilterCategory;
use crate::event::{Category, Event, EventKind, SleepInterval};
use crate::types::EventId;

/// Length of the timeline axis.
pub const MINUTES_PER_DAY: u32 = 1440;

/// Extent cap for instantaneous events so a diaper does not dwarf a nap.
pub const POINT_EVENT_MAX_MINUTES: u32 = 30;

/// Floor for closed sleep extents; shorter naps still get a visible block.
pub const SLEEP_MIN_DISPLAY_MINUTES: i64 = 15;

/// Rendering hint: blocks narrower than this are hard to hit-test.
pub const MIN_EXTENT_MINUTES: u32 = 20;

/// How long a placed block runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayDuration {
    Minutes(i64),
    /// Open sleep interval, still running at render time.
    Ongoing,
}

/// One event placed on the axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub event_id: EventId,
    pub category: Category,
    /// Minutes from midnight of the reference day.
    pub offset_minutes: u32,
    pub duration: DisplayDuration,
}

/// The full layout for one reference day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineLayout {
    /// Sorted by offset, then by event id for a stable order.
    pub placements: Vec<Placement>,
    /// Offset of the current time, present only when `now` falls on the
    /// reference day.
    pub now_marker: Option<u32>,
}

fn offset_of(instant: NaiveDateTime) -> u32 {
    instant.hour() * 60 + instant.minute()
}

fn extent_of(event: &Event) -> DisplayDuration {
    match &event.kind {
        EventKind::Sleep(SleepInterval::Open) => DisplayDuration::Ongoing,
        EventKind::Sleep(SleepInterval::Closed { .. }) => {
            let minutes = event.sleep_minutes().unwrap_or(0);
            DisplayDuration::Minutes(minutes.max(SLEEP_MIN_DISPLAY_MINUTES))
        }
        _ => DisplayDuration::Minutes(i64::from(POINT_EVENT_MAX_MINUTES)),
    }
}

/// Lays out the reference day's events, optionally restricted to one filter
/// category.
#[must_use]
pub fn layout(
    events: &[Event],
    reference: NaiveDate,
    now: NaiveDateTime,
    filter: Option<FilterCategory>,
) -> TimelineLayout {
    let mut placements: Vec<Placement> = events
        .iter()
        .filter(|event| event.start.date() == reference)
        .filter(|event| filter.is_none_or(|f| f.matches(event)))
        .map(|event| Placement {
            event_id: event.id.clone(),
            category: event.category(),
            offset_minutes: offset_of(event.start),
            duration: extent_of(event),
        })
        .collect();

    placements.sort_by(|a, b| {
        a.offset_minutes
            .cmp(&b.offset_minutes)
            .then_with(|| a.event_id.as_str().cmp(b.event_id.as_str()))
    });

    let now_marker = (now.date() == reference).then(|| offset_of(now));

    TimelineLayout {
        placements,
        now_marker,
    }
}
