//! CLI subcommand implementations.

pub mod dashboard;
pub mod events;
pub mod log;
pub mod report;
pub mod seed;
pub mod timeline;
pub mod util;
