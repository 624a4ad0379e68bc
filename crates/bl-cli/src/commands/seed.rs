//! Sample data generation: `bl seed`.
//!
//! Writes a realistic caregiving pattern for the trailing days so the report,
//! dashboard and timeline have something to show. Deterministic for a given
//! reference day: a small LCG drives the minute jitter, seeded per day.

use anyhow::{Context, Result};
use bl_core::{EventId, RawEvent, SubjectId};
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde_json::json;
use uuid::Uuid;

use crate::store::Store;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

struct Jitter(u64);

impl Jitter {
    fn new(seed: u64) -> Self {
        Self(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15).max(1))
    }

    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// Minute offset in -15..=15.
    #[allow(clippy::cast_possible_wrap)]
    fn minutes(&mut self) -> i64 {
        (self.next() % 31) as i64 - 15
    }

    /// Millilitre amount in 110..=170, stepped by 10.
    #[allow(clippy::cast_possible_wrap)]
    fn amount(&mut self) -> i64 {
        110 + (self.next() % 7) as i64 * 10
    }
}

struct SeedDay<'a> {
    subject: &'a SubjectId,
    records: Vec<RawEvent>,
}

impl<'a> SeedDay<'a> {
    fn new(subject: &'a SubjectId) -> Self {
        Self {
            subject,
            records: Vec::new(),
        }
    }

    fn push(
        &mut self,
        start: NaiveDateTime,
        end: Option<NaiveDateTime>,
        category: &str,
        details: serde_json::Value,
    ) {
        self.records.push(RawEvent {
            id: EventId::new(Uuid::new_v4().to_string()).expect("uuid is never empty"),
            subject_id: self.subject.clone(),
            category: category.to_string(),
            start_time: start.format(TIMESTAMP_FORMAT).to_string(),
            end_time: end.map(|end| end.format(TIMESTAMP_FORMAT).to_string()),
            details,
            notes: None,
            created_at: None,
        });
    }
}

fn at(day: NaiveDate, hour: u32, minute: u32, jitter: i64) -> NaiveDateTime {
    day.and_hms_opt(hour, minute, 0).unwrap_or_default() + chrono::Duration::minutes(jitter)
}

fn seed_day(day: NaiveDate, index: u64, subject: &SubjectId) -> Vec<RawEvent> {
    let mut rng = Jitter::new(index + 1);
    let mut out = SeedDay::new(subject);

    // Bottle feeds through the day.
    for (hour, minute) in [(7, 0), (10, 30), (14, 0), (17, 30), (20, 0)] {
        out.push(
            at(day, hour, minute, rng.minutes()),
            None,
            "feed",
            json!({ "method": "bottle", "amountMl": rng.amount() }),
        );
    }

    // One solid meal once eating age is assumed.
    let items = ["banana", "oatmeal", "sweet potato", "pear"];
    #[allow(clippy::cast_possible_truncation)]
    let item = items[(index % items.len() as u64) as usize];
    out.push(
        at(day, 12, 0, rng.minutes()),
        None,
        "feed",
        json!({ "method": "solid", "item": item }),
    );

    // Morning and afternoon naps plus a short evening one.
    for (hour, minute, length) in [(9, 0, 90), (13, 0, 90), (17, 0, 45)] {
        let start = at(day, hour, minute, rng.minutes());
        out.push(
            start,
            Some(start + chrono::Duration::minutes(length + rng.minutes())),
            "sleep",
            json!({}),
        );
    }

    // Diapers: wet through the day, one dirty, a mixed one every third day.
    for (hour, minute) in [(7, 15), (12, 15), (17, 15), (20, 15)] {
        out.push(
            at(day, hour, minute, rng.minutes()),
            None,
            "diaper",
            json!({ "status": "wet" }),
        );
    }
    let dirty_status = if index % 3 == 0 { "mixed" } else { "dirty" };
    out.push(
        at(day, 10, 0, rng.minutes()),
        None,
        "diaper",
        json!({ "status": dirty_status }),
    );

    // Occasional wellness entries.
    if index % 5 == 0 {
        out.push(
            at(day, 16, 0, rng.minutes()),
            None,
            "symptom",
            json!({ "description": "runny nose" }),
        );
        out.push(
            at(day, 16, 10, rng.minutes()),
            None,
            "measurement",
            json!({ "type": "temperature", "value": 98.6, "unit": "°F" }),
        );
    }
    if index % 7 == 0 {
        out.push(
            at(day, 8, 30, rng.minutes()),
            None,
            "measurement",
            json!({ "type": "weight", "value": 15.2, "unit": "lb" }),
        );
    }

    out.records
}

/// Generates records for the `days` trailing days ending on `reference`.
pub fn generate(reference: NaiveDate, days: u32, subject: &str) -> Result<Vec<RawEvent>> {
    let subject =
        SubjectId::new(subject).with_context(|| format!("invalid subject: {subject:?}"))?;

    let mut records = Vec::new();
    for index in 0..u64::from(days) {
        let day = reference - Days::new(u64::from(days) - 1 - index);
        records.extend(seed_day(day, index, &subject));
    }
    Ok(records)
}

/// Runs the seed command.
pub fn run(store: &Store, reference: NaiveDate, days: u32, subject: &str) -> Result<()> {
    let records = generate(reference, days, subject)?;
    store.append_all(&records)?;
    println!("Seeded {} events across {days} days.", records.len());
    Ok(())
}
