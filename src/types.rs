//! Row types produced by the race page extractor.

use serde::Serialize;

/// Identifiers stamped on every output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RaceId {
    pub track: String,
    pub date: String,
    pub race: u32,
}

/// One horse from an entries table.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryRow {
    pub running: bool,
    pub program_number: u32,
    pub horse_name: String,
    pub sire: String,
    pub trainer: String,
    pub jockey: String,
    /// Fractional notation as shown on the page, e.g. "5/2"
    pub ml_odds: String,
}

/// One finisher from the payout table or the also-rans block.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutRow {
    pub finish: u32,
    pub horse_name: String,
    pub win_paid: f64,
    pub place_paid: f64,
    pub show_paid: f64,
}

/// Race conditions from the distance, restriction and purse blocks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MetaInfo {
    pub distance: String,
    pub surface: String,
    pub race_type: String,
    pub restriction: String,
    pub purse: String,
}

/// Wide exotic payout columns for one race, in output order.
pub type ExoticColumns = Vec<(String, Option<String>)>;

/// Entry left-joined with its payout row.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEntryRow {
    pub entry: EntryRow,
    pub payout: Option<PayoutRow>,
    pub race: RaceId,
}

impl MergedEntryRow {
    pub fn to_record(&self) -> EntryRecord {
        let p = self.payout.as_ref();
        EntryRecord {
            running: self.entry.running as u8,
            horse: self.entry.program_number,
            horse_name: self.entry.horse_name.clone(),
            sire: self.entry.sire.clone(),
            trainer: self.entry.trainer.clone(),
            jockey: self.entry.jockey.clone(),
            ml_odds: self.entry.ml_odds.clone(),
            finish: p.map(|p| p.finish),
            win_paid: p.map(|p| p.win_paid),
            place_paid: p.map(|p| p.place_paid),
            show_paid: p.map(|p| p.show_paid),
            track: self.race.track.clone(),
            date: self.race.date.clone(),
            race: self.race.race,
        }
    }

    pub fn to_upcoming_record(&self) -> UpcomingEntryRecord {
        UpcomingEntryRecord {
            running: self.entry.running as u8,
            horse: self.entry.program_number,
            horse_name: self.entry.horse_name.clone(),
            sire: self.entry.sire.clone(),
            trainer: self.entry.trainer.clone(),
            jockey: self.entry.jockey.clone(),
            ml_odds: self.entry.ml_odds.clone(),
            track: self.race.track.clone(),
            date: self.race.date.clone(),
            race: self.race.race,
        }
    }
}

/// CSV row of the results entries file.
#[derive(Debug, Clone, Serialize)]
pub struct EntryRecord {
    pub running: u8,
    pub horse: u32,
    pub horse_name: String,
    pub sire: String,
    pub trainer: String,
    pub jockey: String,
    pub ml_odds: String,
    pub finish: Option<u32>,
    pub win_paid: Option<f64>,
    pub place_paid: Option<f64>,
    pub show_paid: Option<f64>,
    pub track: String,
    pub date: String,
    pub race: u32,
}

/// CSV row of the upcoming entries file.
#[derive(Debug, Clone, Serialize)]
pub struct UpcomingEntryRecord {
    pub running: u8,
    pub horse: u32,
    pub horse_name: String,
    pub sire: String,
    pub trainer: String,
    pub jockey: String,
    pub ml_odds: String,
    pub track: String,
    pub date: String,
    pub race: u32,
}

/// One race of the meta table.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaRow {
    pub info: MetaInfo,
    pub race: RaceId,
    pub exotics: ExoticColumns,
}

impl MetaRow {
    /// Named cells in output order; `None` is written as an empty cell.
    pub fn columns(&self) -> Vec<(String, Option<String>)> {
        let mut cols = vec![
            ("Distance".to_string(), Some(self.info.distance.clone())),
            ("Surface".to_string(), Some(self.info.surface.clone())),
            ("Type".to_string(), Some(self.info.race_type.clone())),
            ("Restriction".to_string(), Some(self.info.restriction.clone())),
            ("Purse".to_string(), Some(self.info.purse.clone())),
            ("track".to_string(), Some(self.race.track.clone())),
            ("date".to_string(), Some(self.race.date.clone())),
            ("race".to_string(), Some(self.race.race.to_string())),
        ];
        cols.extend(self.exotics.iter().cloned());
        cols
    }
}

/// Everything extracted from one page.
#[derive(Debug, Clone, Default)]
pub struct PageTables {
    pub entries: Vec<MergedEntryRow>,
    pub meta: Vec<MetaRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn race() -> RaceId {
        RaceId {
            track: "saratoga".to_string(),
            date: "2024-08-03".to_string(),
            race: 4,
        }
    }

    fn entry() -> EntryRow {
        EntryRow {
            running: false,
            program_number: 7,
            horse_name: "Night Owl".to_string(),
            sire: "Into Mischief".to_string(),
            trainer: "T. Pletcher".to_string(),
            jockey: "I. Ortiz, Jr.".to_string(),
            ml_odds: "8/1".to_string(),
        }
    }

    #[test]
    fn test_record_without_payout() {
        let row = MergedEntryRow {
            entry: entry(),
            payout: None,
            race: race(),
        };
        let rec = row.to_record();
        assert_eq!(rec.running, 0);
        assert_eq!(rec.horse, 7);
        assert!(rec.finish.is_none());
        assert!(rec.win_paid.is_none());
        assert_eq!(rec.race, 4);
    }

    #[test]
    fn test_meta_columns_order() {
        let row = MetaRow {
            info: MetaInfo {
                distance: "6 f".to_string(),
                ..Default::default()
            },
            race: race(),
            exotics: vec![("exacta_finish".to_string(), Some("3-1".to_string()))],
        };
        let names: Vec<_> = row.columns().into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            names,
            vec![
                "Distance",
                "Surface",
                "Type",
                "Restriction",
                "Purse",
                "track",
                "date",
                "race",
                "exacta_finish"
            ]
        );
    }
}
