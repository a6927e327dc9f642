//! CLI commands for hrn-scraper.
//!
//! Three page workflows: finished results, today's upcoming card, and a
//! dry run that parses and previews without writing anything.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::export::{OutputPaths, PageKind};
use crate::pipeline::{extract_results, extract_upcoming, favourite, save_page};
use crate::scraper::{CacheCategory, PageCache, PageClient};
use crate::types::PageTables;

/// Rows shown in the stdout preview
const PREVIEW_ROWS: usize = 5;

#[derive(Parser)]
#[command(name = "hrn-scraper")]
#[command(version, about = "Download horse racing entries, results and payouts to CSV", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Parse a saved HTML page instead of fetching it
    #[arg(long, global = true, value_name = "FILE")]
    pub html: Option<PathBuf>,

    /// Ignore cached pages and fetch again
    #[arg(long, global = true)]
    pub refresh: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download results, payouts and morning lines for a track and date
    Results {
        /// Track slug as used in the site's URLs, e.g. "saratoga"
        #[arg(long)]
        track: String,

        /// Race date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },

    /// Download today's entries for a track
    Upcoming {
        /// Track slug as used in the site's URLs
        #[arg(long)]
        track: String,
    },

    /// Parse a page and print a preview without writing files
    Check {
        /// Track slug as used in the site's URLs
        #[arg(long)]
        track: String,

        /// Race date (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,

        /// Parse as an upcoming card (entries and conditions only)
        #[arg(long)]
        upcoming: bool,
    },
}

fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got {:?}: {}", s, e))
}

/// Where the page HTML comes from.
pub struct PageSource {
    pub html: Option<PathBuf>,
    pub refresh: bool,
}

impl PageSource {
    async fn load(
        &self,
        config: &AppConfig,
        track: &str,
        date: &str,
        category: CacheCategory,
    ) -> Result<String> {
        if let Some(path) = &self.html {
            tracing::info!("Reading page from {}", path.display());
            return std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()));
        }

        let cache = config
            .cache
            .enabled
            .then(|| PageCache::new(PathBuf::from(&config.cache.dir)));
        let client = PageClient::new(&config.http, cache)?;
        let html = client
            .fetch(track, date, category, self.refresh)
            .await
            .with_context(|| format!("Failed to fetch {}", client.page_url(track, date)))?;
        Ok(html)
    }
}

/// Download and save results for a finished card.
pub async fn run_results(track: String, date: NaiveDate, source: PageSource) -> Result<()> {
    let config = AppConfig::load()?;
    let date = date.format("%Y-%m-%d").to_string();
    tracing::info!("Track: {}", track);
    tracing::info!("Date: {}", date);

    let html = source
        .load(&config, &track, &date, CacheCategory::Results)
        .await?;
    let paths = OutputPaths::results(&config.output, &track, &date);
    let tables = save_page(&html, &track, &date, PageKind::Results, &paths)?;
    report_written(&paths, &tables);

    println!("Entries:");
    print_preview(&tables, PageKind::Results);
    Ok(())
}

/// Download and save today's entries for a track.
pub async fn run_upcoming(track: String, source: PageSource) -> Result<()> {
    let config = AppConfig::load()?;
    let date = today();
    tracing::info!("Track: {}", track);

    let html = source
        .load(&config, &track, &date, CacheCategory::Entries)
        .await?;
    let paths = OutputPaths::upcoming(&config.output, &track);
    let tables = save_page(&html, &track, &date, PageKind::Upcoming, &paths)?;
    report_written(&paths, &tables);

    println!("Today's Entries:");
    print_preview(&tables, PageKind::Upcoming);
    Ok(())
}

/// Parse a page and show what would be written.
pub async fn run_check(
    track: String,
    date: Option<NaiveDate>,
    upcoming: bool,
    source: PageSource,
) -> Result<()> {
    let config = AppConfig::load()?;
    let date = date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(today);

    let (category, kind) = if upcoming {
        (CacheCategory::Entries, PageKind::Upcoming)
    } else {
        (CacheCategory::Results, PageKind::Results)
    };

    let html = source.load(&config, &track, &date, category).await?;
    let tables = match kind {
        PageKind::Results => extract_results(&html, &track, &date)?,
        PageKind::Upcoming => extract_upcoming(&html, &track, &date)?,
    };

    tracing::info!(
        "Parsed {} races, {} entry rows for {} on {}",
        tables.meta.len(),
        tables.entries.len(),
        track,
        date
    );
    for meta in &tables.meta {
        match favourite(&tables, meta.race.race) {
            Some((entry, odds)) => tracing::info!(
                "Race {}: {} {} {}, favourite #{} {} ({} = {:.2})",
                meta.race.race,
                meta.info.distance,
                meta.info.surface,
                meta.info.race_type,
                entry.program_number,
                entry.horse_name,
                entry.ml_odds,
                odds
            ),
            None => tracing::info!("Race {}: no morning line", meta.race.race),
        }
    }

    println!("Entries:");
    print_preview(&tables, kind);
    Ok(())
}

fn today() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}

fn report_written(paths: &OutputPaths, tables: &PageTables) {
    for (path, rows) in [
        (paths.entries.as_path(), tables.entries.len()),
        (paths.meta.as_path(), tables.meta.len()),
    ] {
        tracing::info!("Wrote {} rows to {}", rows, path.display());
    }
}

/// Print the first rows of both tables.
fn print_preview(tables: &PageTables, kind: PageKind) {
    for row in tables.entries.iter().take(PREVIEW_ROWS) {
        let e = &row.entry;
        let result = match (&row.payout, kind) {
            (Some(p), _) => format!(
                "finish {:>2}  {:>7.2} {:>7.2} {:>7.2}",
                p.finish, p.win_paid, p.place_paid, p.show_paid
            ),
            (None, PageKind::Results) => "finish  -".to_string(),
            (None, PageKind::Upcoming) => String::new(),
        };
        println!(
            "  R{:<2} #{:<3} {:<24} {:<6} {}{}",
            row.race.race,
            e.program_number,
            e.horse_name,
            e.ml_odds,
            if e.running { "" } else { "(scratched) " },
            result
        );
    }

    println!();
    println!("Meta:");
    for meta in tables.meta.iter().take(PREVIEW_ROWS) {
        let info = &meta.info;
        let exotics = meta
            .exotics
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| format!("{}={}", k, v)))
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "  R{:<2} {} | {} | {} | {} | {} {}",
            meta.race.race,
            info.distance,
            info.surface,
            info.race_type,
            info.restriction,
            info.purse,
            exotics
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-04").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 4).unwrap()
        );
        assert!(parse_date("05/04/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_cli_requires_date_for_results() {
        assert!(Cli::try_parse_from(["hrn-scraper", "results", "--track", "parx"]).is_err());

        let cli = Cli::try_parse_from([
            "hrn-scraper",
            "results",
            "--track",
            "parx",
            "--date",
            "2024-05-04",
            "--refresh",
        ])
        .unwrap();
        assert!(cli.refresh);
        assert!(matches!(cli.command, Commands::Results { ref track, .. } if track == "parx"));
    }

    #[test]
    fn test_cli_upcoming_has_no_date() {
        assert!(
            Cli::try_parse_from(["hrn-scraper", "upcoming", "--track", "parx", "--date", "2024-05-04"])
                .is_err()
        );
        let cli = Cli::try_parse_from(["hrn-scraper", "--html", "page.html", "upcoming", "--track", "parx"])
            .unwrap();
        assert_eq!(cli.html, Some(PathBuf::from("page.html")));
    }

    #[test]
    fn test_cli_verify_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
