//! Baby caregiving log CLI library.
//!
//! This crate provides the `bl` command-line interface over the analytics
//! engine in `bl-core`.

mod cli;
pub mod commands;
mod config;
mod store;

pub use cli::{Cli, Commands, LogEntry};
pub use config::Config;
pub use store::Store;
