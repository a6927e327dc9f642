//! CSV output for extracted page tables.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use crate::config::OutputConfig;
use crate::types::{MergedEntryRow, MetaRow, PageTables};

/// Which flavour of entries file to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Results,
    Upcoming,
}

/// Destination files for one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub entries: PathBuf,
    pub meta: PathBuf,
}

impl OutputPaths {
    /// `{entries_dir}/{track}_{date}.csv` and `{meta_dir}/{track}_{date}.csv`
    pub fn results(config: &OutputConfig, track: &str, date: &str) -> Self {
        let name = format!("{}_{}.csv", track, date);
        Self {
            entries: Path::new(&config.entries_dir).join(&name),
            meta: Path::new(&config.meta_dir).join(&name),
        }
    }

    /// Upcoming cards are keyed by track only and overwritten daily.
    pub fn upcoming(config: &OutputConfig, track: &str) -> Self {
        let name = format!("{}.csv", track);
        Self {
            entries: Path::new(&config.upc_entries_dir).join(&name),
            meta: Path::new(&config.upc_meta_dir).join(&name),
        }
    }
}

/// Write both tables, replacing any existing files.
pub fn write_tables(paths: &OutputPaths, tables: &PageTables, kind: PageKind) -> Result<()> {
    for path in [&paths.entries, &paths.meta] {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create {}", dir.display()))?;
        }
    }

    write_entries(&paths.entries, &tables.entries, kind)?;
    write_meta(&paths.meta, &tables.meta)?;
    Ok(())
}

pub fn write_entries(path: &Path, rows: &[MergedEntryRow], kind: PageKind) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    for row in rows {
        match kind {
            PageKind::Results => writer.serialize(row.to_record())?,
            PageKind::Upcoming => writer.serialize(row.to_upcoming_record())?,
        }
    }

    writer.flush()?;
    Ok(())
}

/// Races can carry different exotic pools, so the header is the union of
/// every race's columns in first-seen order and absent cells stay empty.
pub fn write_meta(path: &Path, rows: &[MetaRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let table: Vec<Vec<(String, Option<String>)>> = rows.iter().map(MetaRow::columns).collect();
    let header = union_header(&table);
    writer.write_record(&header)?;

    for cols in &table {
        let by_name: HashMap<&str, Option<&str>> = cols
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
            .collect();
        let record: Vec<&str> = header
            .iter()
            .map(|name| by_name.get(name.as_str()).copied().flatten().unwrap_or(""))
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

fn union_header(table: &[Vec<(String, Option<String>)>]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut header = Vec::new();
    for cols in table {
        for (name, _) in cols {
            if seen.insert(name.as_str()) {
                header.push(name.clone());
            }
        }
    }
    header
}
