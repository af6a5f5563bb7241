mod commands;
mod presenter;
mod render;
mod seed;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use daygrid_core::DEFAULT_COLOR;
use daygrid_core::config::DaygridConfig;
use daygrid_core::storage::LocalStore;
use daygrid_core::store::EventStore;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "daygrid")]
#[command(about = "Month calendar with reminders in your terminal")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add an event to a date
    Add {
        /// Date of the event (YYYY-MM-DD)
        date: NaiveDate,

        /// Event title
        title: String,

        /// Start time (HH:MM)
        #[arg(short, long)]
        start: String,

        /// End time (HH:MM), after the start
        #[arg(short, long)]
        end: Option<String>,

        /// Display color
        #[arg(short, long, default_value = DEFAULT_COLOR)]
        color: String,

        /// Add without asking, even when the event overlaps an existing one
        #[arg(short, long)]
        yes: bool,
    },
    /// Remove an event by the index `events` prints
    Remove {
        /// Date of the event (YYYY-MM-DD)
        date: NaiveDate,

        /// Index within that day's list
        index: usize,
    },
    /// Show events for a day, or a month grid
    Events {
        /// Day to list (YYYY-MM-DD); omitted shows the month grid
        date: Option<NaiveDate>,

        /// Month to show (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Stay resident and fire reminders when event start times arrive
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("daygrid=warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = DaygridConfig::load()?;
    let storage = LocalStore::open(config.data_path()?);

    match cli.command {
        Commands::Add {
            date,
            title,
            start,
            end,
            color,
            yes,
        } => {
            let mut store = EventStore::open(storage);
            commands::add::run(&mut store, date, title, start, end, color, yes)
        }
        Commands::Remove { date, index } => {
            let mut store = EventStore::open(storage);
            commands::remove::run(&mut store, date, index)
        }
        Commands::Events { date, month } => {
            render::maybe_welcome(&storage);
            let store = EventStore::open(storage);
            commands::events::run(&store, date, month.as_deref())
        }
        Commands::Watch => {
            render::maybe_welcome(&storage);
            let store = EventStore::open(storage);
            commands::watch::run(&config, store).await
        }
    }
}
