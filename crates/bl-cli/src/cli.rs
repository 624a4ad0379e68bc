//! Command-line argument definitions.

use std::path::PathBuf;

use bl_core::classify::FilterCategory;
use bl_core::event::{DiaperStatus, FeedMethod, MeasurementKind, Side};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};

/// Baby caregiving log.
///
/// Records feeds, sleep, diapers and wellness events to a local log and turns
/// them into daily reports, a recency dashboard and a day timeline.
#[derive(Debug, Parser)]
#[command(name = "bl", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subject to operate on (defaults to the configured subject).
    #[arg(short, long, global = true)]
    pub subject: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Consolidated daily report: today, yesterday, weekly averages and the
    /// recent health log.
    Report {
        /// Reference day (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Live summary: today's counters plus time since last feed, sleep state
    /// and last diapers.
    Dashboard {
        /// Reference day (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Day timeline: events of one day placed on a midnight-to-midnight axis.
    Timeline {
        /// Reference day (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Only show one category group.
        #[arg(long)]
        category: Option<FilterCategory>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List events for a day, newest first.
    Events {
        /// Reference day (YYYY-MM-DD, defaults to today).
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Only show one category group.
        #[arg(long)]
        category: Option<FilterCategory>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Record a new event.
    Log {
        #[command(subcommand)]
        entry: LogEntry,
    },

    /// Populate the log with realistic sample data.
    Seed {
        /// Number of trailing days to generate.
        #[arg(long, default_value_t = 14)]
        days: u32,
    },
}

/// Event shapes that can be logged.
#[derive(Debug, Subcommand)]
pub enum LogEntry {
    /// Record a feed.
    Feed {
        #[arg(long, value_enum, default_value = "bottle")]
        method: FeedMethodArg,

        /// Amount in ml (bottle feeds).
        #[arg(long)]
        amount_ml: Option<f64>,

        /// Side for breast feeds.
        #[arg(long, value_enum)]
        side: Option<SideArg>,

        /// Food name for solid feeds.
        #[arg(long)]
        item: Option<String>,

        /// Event time (defaults to now).
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record sleep. Omitting --end logs an ongoing sleep.
    Sleep {
        /// Sleep start (defaults to now).
        #[arg(long)]
        at: Option<String>,

        /// Wake time; omit while still asleep.
        #[arg(long)]
        end: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a diaper change.
    Diaper {
        #[arg(long, value_enum, default_value = "wet")]
        status: DiaperStatusArg,

        /// Event time (defaults to now).
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a symptom.
    Symptom {
        /// What was observed (e.g. "runny nose").
        description: String,

        /// Event time (defaults to now).
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a movement or activity milestone.
    Movement {
        /// What happened (e.g. "rolled over").
        description: Option<String>,

        /// Event time (defaults to now).
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a measurement. The unit follows the kind.
    Measurement {
        #[arg(long, value_enum, default_value = "weight")]
        kind: MeasurementKindArg,

        /// Measured value.
        value: f64,

        /// Event time (defaults to now).
        #[arg(long)]
        at: Option<String>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Record a free-text note.
    Note {
        /// Note text.
        text: Option<String>,

        /// Event time (defaults to now).
        #[arg(long)]
        at: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FeedMethodArg {
    Bottle,
    Breast,
    Solid,
}

impl From<FeedMethodArg> for FeedMethod {
    fn from(arg: FeedMethodArg) -> Self {
        match arg {
            FeedMethodArg::Bottle => Self::Bottle,
            FeedMethodArg::Breast => Self::Breast,
            FeedMethodArg::Solid => Self::Solid,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SideArg {
    Left,
    Right,
    Both,
}

impl From<SideArg> for Side {
    fn from(arg: SideArg) -> Self {
        match arg {
            SideArg::Left => Self::Left,
            SideArg::Right => Self::Right,
            SideArg::Both => Self::Both,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DiaperStatusArg {
    Wet,
    Dirty,
    Mixed,
}

impl From<DiaperStatusArg> for DiaperStatus {
    fn from(arg: DiaperStatusArg) -> Self {
        match arg {
            DiaperStatusArg::Wet => Self::Wet,
            DiaperStatusArg::Dirty => Self::Dirty,
            DiaperStatusArg::Mixed => Self::Mixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MeasurementKindArg {
    Weight,
    Height,
    Temperature,
}

impl From<MeasurementKindArg> for MeasurementKind {
    fn from(arg: MeasurementKindArg) -> Self {
        match arg {
            MeasurementKindArg::Weight => Self::Weight,
            MeasurementKindArg::Height => Self::Height,
            MeasurementKindArg::Temperature => Self::Temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_report_with_date() {
        let cli = Cli::try_parse_from(["bl", "report", "--date", "2024-03-10", "--json"]).unwrap();
        match cli.command {
            Some(Commands::Report { date, json }) => {
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 10));
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_parses_log_feed() {
        let cli = Cli::try_parse_from([
            "bl", "log", "feed", "--method", "bottle", "--amount-ml", "120",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Log {
                entry: LogEntry::Feed {
                    method, amount_ml, ..
                },
            }) => {
                assert!(matches!(method, FeedMethodArg::Bottle));
                assert_eq!(amount_ml, Some(120.0));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn cli_rejects_bad_category() {
        assert!(Cli::try_parse_from(["bl", "timeline", "--category", "bath"]).is_err());
    }
}
