//! Page-level extraction: runs the per-race parsers and stitches rows together.

use anyhow::{bail, Context};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, warn};

use crate::error::ExtractError;
use crate::export::{write_tables, OutputPaths, PageKind};
use crate::scraper::parsers::{
    EntriesParser, ExoticsParser, MetaParser, OddsParser, PayoutTableParser, RacePage,
};
use crate::types::{EntryRow, MergedEntryRow, MetaRow, PageTables, PayoutRow, RaceId};

/// Extract entries, payouts and meta for every race on a results page.
///
/// Nothing is returned unless every race parses.
pub fn extract_results(html: &str, track: &str, date: &str) -> Result<PageTables, ExtractError> {
    let page = RacePage::parse(html);
    let blocks = page.result_blocks()?;
    let mut tables = PageTables::default();
    let pb = race_progress(blocks.len());

    for (i, block) in blocks.iter().enumerate() {
        let race = race_id(track, date, i);
        pb.set_message(format!("R{}", race.race));

        let entries = EntriesParser::parse(&block.entries)?;
        let payouts = PayoutTableParser::build(&block.payouts, &block.also_rans)?;
        let info = MetaParser::parse(&block.distance, &block.restrictions, &block.purse)?;
        let exotics = ExoticsParser::reshape(&block.exotics)?;

        debug!(
            race = race.race,
            entries = entries.len(),
            payouts = payouts.len(),
            exotic_columns = exotics.len(),
            "Parsed race"
        );

        tables.entries.extend(merge_payouts(entries, &payouts, &race));
        tables.meta.push(MetaRow { info, race, exotics });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(tables)
}

/// Extract entries and meta for a card whose races have not been run.
pub fn extract_upcoming(html: &str, track: &str, date: &str) -> Result<PageTables, ExtractError> {
    let page = RacePage::parse(html);
    let blocks = page.upcoming_blocks()?;
    let mut tables = PageTables::default();
    let pb = race_progress(blocks.len());

    for (i, block) in blocks.iter().enumerate() {
        let race = race_id(track, date, i);
        pb.set_message(format!("R{}", race.race));

        let entries = EntriesParser::parse(&block.entries)?;
        let info = MetaParser::parse(&block.distance, &block.restrictions, &block.purse)?;
        debug!(race = race.race, entries = entries.len(), "Parsed race");

        tables.entries.extend(entries.into_iter().map(|entry| MergedEntryRow {
            entry,
            payout: None,
            race: race.clone(),
        }));
        tables.meta.push(MetaRow {
            info,
            race,
            exotics: Vec::new(),
        });
        pb.inc(1);
    }

    pb.finish_and_clear();
    Ok(tables)
}

/// Extract a whole page, then write both CSV files.
///
/// Output files are only opened once every race on the page has parsed.
pub fn save_page(
    html: &str,
    track: &str,
    date: &str,
    kind: PageKind,
    paths: &OutputPaths,
) -> anyhow::Result<PageTables> {
    let tables = match kind {
        PageKind::Results => extract_results(html, track, date),
        PageKind::Upcoming => extract_upcoming(html, track, date),
    }
    .with_context(|| format!("Failed to extract races for {} on {}", track, date))?;

    if tables.meta.is_empty() {
        bail!("No races found for {} on {}", track, date);
    }

    write_tables(paths, &tables, kind)?;
    Ok(tables)
}

/// Per-race progress bar; hidden when stderr is not a terminal.
fn race_progress(races: usize) -> ProgressBar {
    let pb = ProgressBar::new(races as u64);
    if let Ok(style) =
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

fn race_id(track: &str, date: &str, index: usize) -> RaceId {
    RaceId {
        track: track.to_string(),
        date: date.to_string(),
        race: index as u32 + 1,
    }
}

/// Left join of entries with payouts on exact horse name.
///
/// A name matching several payout rows yields one row per match; no match
/// leaves the payout empty.
pub fn merge_payouts(entries: Vec<EntryRow>, payouts: &[PayoutRow], race: &RaceId) -> Vec<MergedEntryRow> {
    let mut merged = Vec::with_capacity(entries.len());

    for entry in entries {
        let matches: Vec<&PayoutRow> = payouts
            .iter()
            .filter(|p| p.horse_name == entry.horse_name)
            .collect();

        if matches.is_empty() {
            if entry.running && !payouts.is_empty() {
                warn!(
                    race = race.race,
                    horse = %entry.horse_name,
                    "Running horse has no payout row"
                );
            }
            merged.push(MergedEntryRow {
                entry,
                payout: None,
                race: race.clone(),
            });
            continue;
        }

        for payout in matches {
            merged.push(MergedEntryRow {
                entry: entry.clone(),
                payout: Some(payout.clone()),
                race: race.clone(),
            });
        }
    }

    merged
}

/// Running horse with the shortest morning line in the given race.
pub fn favourite(tables: &PageTables, race: u32) -> Option<(&EntryRow, f64)> {
    tables
        .entries
        .iter()
        .filter(|row| row.race.race == race && row.entry.running)
        .filter_map(|row| {
            OddsParser::to_decimal(&row.entry.ml_odds)
                .ok()
                .map(|odds| (&row.entry, odds))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
