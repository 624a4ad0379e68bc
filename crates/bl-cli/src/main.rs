use anyhow::{Context, Result};
use bl_cli::commands::{dashboard, events, log, report, seed, timeline, util};
use bl_cli::{Cli, Commands, Config, Store};
use bl_core::Event;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Load config and open the event store.
fn open_store(cli: &Cli) -> Result<(Store, Config)> {
    let config = Config::load_from(cli.config.as_deref()).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let store = Store::new(config.data_path.clone());
    Ok((store, config))
}

/// Load and normalize one subject's events. Every computation is scoped to a
/// single subject; records for other subjects are dropped here.
fn load_events(store: &Store, subject: &str) -> Result<Vec<Event>> {
    let records = store.load()?;
    let mut events = bl_core::normalize_all(&records);
    events.retain(|event| event.subject.as_str() == subject);
    Ok(events)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();

    match &cli.command {
        Some(Commands::Report { date, json }) => {
            let (store, config) = open_store(&cli)?;
            let subject = cli.subject.as_deref().unwrap_or(&config.default_subject);
            let events = load_events(&store, subject)?;
            let reference = util::resolve_date(*date);
            report::run(&bl_core::compose(&events, reference), *json)?;
        }
        Some(Commands::Dashboard { date, json }) => {
            let (store, config) = open_store(&cli)?;
            let subject = cli.subject.as_deref().unwrap_or(&config.default_subject);
            let events = load_events(&store, subject)?;
            let reference = util::resolve_date(*date);
            let summary = bl_core::compose_dashboard(&events, reference, util::now_local());
            dashboard::run(&summary, *json)?;
        }
        Some(Commands::Timeline {
            date,
            category,
            json,
        }) => {
            let (store, config) = open_store(&cli)?;
            let subject = cli.subject.as_deref().unwrap_or(&config.default_subject);
            let events = load_events(&store, subject)?;
            let reference = util::resolve_date(*date);
            let layout =
                bl_core::timeline::layout(&events, reference, util::now_local(), *category);
            timeline::run(&layout, reference, *json)?;
        }
        Some(Commands::Events {
            date,
            category,
            json,
        }) => {
            let (store, config) = open_store(&cli)?;
            let subject = cli.subject.as_deref().unwrap_or(&config.default_subject);
            let all = load_events(&store, subject)?;
            let reference = util::resolve_date(*date);
            let selected = events::day_events(&all, reference, *category);
            events::run(&selected, reference, *json)?;
        }
        Some(Commands::Log { entry }) => {
            let (store, config) = open_store(&cli)?;
            let subject = cli.subject.as_deref().unwrap_or(&config.default_subject);
            log::run(&store, entry, subject, util::now_local())?;
        }
        Some(Commands::Seed { days }) => {
            let (store, config) = open_store(&cli)?;
            let subject = cli.subject.as_deref().unwrap_or(&config.default_subject);
            seed::run(&store, util::resolve_date(None), *days, subject)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
