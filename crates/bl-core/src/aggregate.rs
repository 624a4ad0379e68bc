//! Windowed aggregation of event counters.
//!
//! Windows compare calendar days, never instants: an event at 23:58 and one
//! at 00:02 the next day are never in the same bucket. The engine performs no
//! time-zone conversion; events and the reference date must share a clock.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::classify::{DiaperBucket, FeedClass, diaper_bucket, feed_class};
use crate::event::{Event, EventKind, FeedMethod};

/// Number of calendar days in the trailing-average window.
pub const TRAILING_WEEK_DAYS: u32 = 7;

/// The three named windows, anchored to a reference calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Windows {
    pub today: NaiveDate,
    pub yesterday: NaiveDate,
    /// First day of the trailing week (7 days ending on and including today).
    pub week_start: NaiveDate,
}

impl Windows {
    /// Builds the windows around a reference day.
    #[must_use]
    pub fn around(reference: NaiveDate) -> Self {
        Self {
            today: reference,
            yesterday: reference - Days::new(1),
            week_start: reference - Days::new(u64::from(TRAILING_WEEK_DAYS - 1)),
        }
    }

    #[must_use]
    pub fn in_trailing_week(&self, day: NaiveDate) -> bool {
        day >= self.week_start && day <= self.today
    }
}

/// Per-category counters for a set of events sharing a window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DayTotals {
    pub bottle_count: u32,
    pub breast_count: u32,
    pub solid_count: u32,
    /// Recorded milk volume in ml (breast feeds without an amount add 0).
    pub milk_volume_ml: f64,
    pub nap_count: u32,
    /// Minutes of closed sleep; open intervals contribute nothing here.
    pub sleep_minutes: i64,
    pub wet_count: u32,
    pub dirty_count: u32,
    pub wellness_count: u32,
    pub has_symptom: bool,
}

impl DayTotals {
    /// Total milk feeds, bottle and breast combined.
    #[must_use]
    pub const fn milk_count(&self) -> u32 {
        self.bottle_count + self.breast_count
    }

    fn absorb(&mut self, event: &Event) {
        match &event.kind {
            EventKind::Feed { method, .. } => match feed_class(event) {
                Some(FeedClass::Solid) => self.solid_count += 1,
                Some(FeedClass::Milk { volume_ml }) => {
                    if matches!(method, FeedMethod::Breast) {
                        self.breast_count += 1;
                    } else {
                        self.bottle_count += 1;
                    }
                    self.milk_volume_ml += volume_ml;
                }
                None => {}
            },
            EventKind::Sleep(_) => {
                self.nap_count += 1;
                if let Some(minutes) = event.sleep_minutes() {
                    self.sleep_minutes += minutes;
                }
            }
            EventKind::Diaper { status } => match diaper_bucket(*status) {
                DiaperBucket::Wet => self.wet_count += 1,
                DiaperBucket::Dirty => self.dirty_count += 1,
            },
            EventKind::Symptom { .. } => {
                self.wellness_count += 1;
                self.has_symptom = true;
            }
            EventKind::Movement { .. }
            | EventKind::Measurement { .. }
            | EventKind::Note { .. } => {
                self.wellness_count += 1;
            }
        }
    }
}

/// Daily averages over the trailing week.
///
/// Sums are always divided by 7, not by the number of days with data: days
/// with zero events still count toward the denominator, and an empty week
/// averages to zero rather than dividing by zero. Counts and volume round to
/// the nearest integer; solids keep one decimal (they are rarer, and whole
/// rounding would hide them); sleep minutes stay fractional for `Hh Mm`
/// rendering downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekAverages {
    pub bottle_count: u32,
    pub breast_count: u32,
    pub solid_count: f64,
    pub milk_volume_ml: u32,
    pub nap_count: u32,
    pub sleep_minutes: f64,
    pub wet_count: u32,
    pub dirty_count: u32,
}

impl WeekAverages {
    /// Derives daily averages from a trailing-week total.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn from_week(week: &DayTotals) -> Self {
        let days = f64::from(TRAILING_WEEK_DAYS);
        let round_count = |count: u32| (f64::from(count) / days).round() as u32;
        Self {
            bottle_count: round_count(week.bottle_count),
            breast_count: round_count(week.breast_count),
            solid_count: (f64::from(week.solid_count) / days * 10.0).round() / 10.0,
            milk_volume_ml: (week.milk_volume_ml / days).round().max(0.0) as u32,
            nap_count: round_count(week.nap_count),
            sleep_minutes: week.sleep_minutes as f64 / days,
            wet_count: round_count(week.wet_count),
            dirty_count: round_count(week.dirty_count),
        }
    }
}

/// Counters for the three comparison windows.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WindowTotals {
    pub today: DayTotals,
    pub yesterday: DayTotals,
    pub trailing_week: DayTotals,
}

/// Buckets every event into the windows its calendar day belongs to.
///
/// An event can land in more than one bucket (today is also part of the
/// trailing week); one outside all three windows is ignored.
#[must_use]
pub fn aggregate(events: &[Event], reference: NaiveDate) -> WindowTotals {
    let windows = Windows::around(reference);
    let mut totals = WindowTotals::default();

    for event in events {
        let day = event.start.date();
        if day == windows.today {
            totals.today.absorb(event);
        }
        if day == windows.yesterday {
            totals.yesterday.absorb(event);
        }
        if windows.in_trailing_week(day) {
            totals.trailing_week.absorb(event);
        }
    }

    totals
}

/// Counters for a single calendar day.
#[must_use]
pub fn day_totals(events: &[Event], day: NaiveDate) -> DayTotals {
    let mut totals = DayTotals::default();
    for event in events.iter().filter(|e| e.start.date() == day) {
        totals.absorb(event);
    }
    totals
}
