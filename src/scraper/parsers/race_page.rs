//! Splits an entries-results page into per-race block groups.

use scraper::{ElementRef, Html};

use super::selector;
use crate::error::ExtractError;

const ENTRIES: &str = "table.table-entries";
const PAYOUTS: &str = "table.table-payouts";
const ALSO_RANS: &str = "div.race-also-rans";
const EXOTICS: &str = "table.table-exotic-payouts";
const DISTANCE: &str = "div.race-distance";
const RESTRICTIONS: &str = "div.race-restrictions";
const PURSE: &str = "div.race-purse";

/// The co-indexed fragments of one finished race.
#[derive(Debug, Clone, Copy)]
pub struct RaceBlockSet<'a> {
    pub entries: ElementRef<'a>,
    pub payouts: ElementRef<'a>,
    pub also_rans: ElementRef<'a>,
    pub exotics: ElementRef<'a>,
    pub distance: ElementRef<'a>,
    pub restrictions: ElementRef<'a>,
    pub purse: ElementRef<'a>,
}

/// The fragments available before a race is run.
#[derive(Debug, Clone, Copy)]
pub struct UpcomingBlockSet<'a> {
    pub entries: ElementRef<'a>,
    pub distance: ElementRef<'a>,
    pub restrictions: ElementRef<'a>,
    pub purse: ElementRef<'a>,
}

/// A parsed entries-results page.
pub struct RacePage {
    document: Html,
}

impl RacePage {
    pub fn parse(html: &str) -> Self {
        Self {
            document: Html::parse_document(html),
        }
    }

    /// Block groups for every race, in page order.
    ///
    /// Fails if any group count differs from the number of entries tables.
    pub fn result_blocks(&self) -> Result<Vec<RaceBlockSet<'_>>, ExtractError> {
        let entries = self.select_all(ENTRIES)?;
        let payouts = self.select_all(PAYOUTS)?;
        let also_rans = self.select_all(ALSO_RANS)?;
        let exotics = self.select_all(EXOTICS)?;
        let distance = self.select_all(DISTANCE)?;
        let restrictions = self.select_all(RESTRICTIONS)?;
        let purse = self.select_all(PURSE)?;

        check_counts(
            entries.len(),
            &[
                ("payouts", payouts.len()),
                ("also-rans", also_rans.len()),
                ("exotic payouts", exotics.len()),
                ("distance", distance.len()),
                ("restrictions", restrictions.len()),
                ("purse", purse.len()),
            ],
        )?;

        Ok((0..entries.len())
            .map(|i| RaceBlockSet {
                entries: entries[i],
                payouts: payouts[i],
                also_rans: also_rans[i],
                exotics: exotics[i],
                distance: distance[i],
                restrictions: restrictions[i],
                purse: purse[i],
            })
            .collect())
    }

    /// Block groups for a card that has not been run yet.
    pub fn upcoming_blocks(&self) -> Result<Vec<UpcomingBlockSet<'_>>, ExtractError> {
        let entries = self.select_all(ENTRIES)?;
        let distance = self.select_all(DISTANCE)?;
        let restrictions = self.select_all(RESTRICTIONS)?;
        let purse = self.select_all(PURSE)?;

        check_counts(
            entries.len(),
            &[
                ("distance", distance.len()),
                ("restrictions", restrictions.len()),
                ("purse", purse.len()),
            ],
        )?;

        Ok((0..entries.len())
            .map(|i| UpcomingBlockSet {
                entries: entries[i],
                distance: distance[i],
                restrictions: restrictions[i],
                purse: purse[i],
            })
            .collect())
    }

    fn select_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>, ExtractError> {
        let sel = selector(css)?;
        Ok(self.document.select(&sel).collect())
    }
}

fn check_counts(expected: usize, groups: &[(&'static str, usize)]) -> Result<(), ExtractError> {
    for &(group, actual) in groups {
        if actual != expected {
            return Err(ExtractError::GroupCountMismatch {
                group,
                expected,
                actual,
            });
        }
    }
    Ok(())
}
