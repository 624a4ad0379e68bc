//! Core analytics for a baby caregiving log.
//!
//! This crate contains the pure engine behind the CLI:
//! - Normalization: turning raw log records into typed events
//! - Aggregation: windowed counters and trailing-week averages
//! - Recency: "time since last feed/sleep/diaper" tracking
//! - Timeline: day-view placement on a 1440-minute axis
//! - Reports: the consolidated daily report and dashboard summary

pub mod aggregate;
pub mod classify;
pub mod event;
pub mod format;
pub mod recency;
pub mod report;
pub mod timeline;
mod types;

pub use event::{Category, Event, EventKind, RawEvent, normalize, normalize_all};
pub use report::{DailyReport, DashboardSummary, compose, compose_dashboard};
pub use types::{EventId, SubjectId, ValidationError};
