//! hrn-scraper
//!
//! Downloads horse racing entries, results and payouts from
//! horseracingnation.com and writes them to CSV.

mod cli;
mod config;
mod error;
mod export;
mod pipeline;
mod retry;
mod scraper;
mod types;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands, PageSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hrn_scraper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let source = PageSource {
        html: cli.html,
        refresh: cli.refresh,
    };

    match cli.command {
        Commands::Results { track, date } => cli::run_results(track, date, source).await,
        Commands::Upcoming { track } => cli::run_upcoming(track, source).await,
        Commands::Check {
            track,
            date,
            upcoming,
        } => cli::run_check(track, date, upcoming, source).await,
    }
}
