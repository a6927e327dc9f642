//! Race conditions parser (distance, surface, type, restriction, purse).

use scraper::ElementRef;

use crate::error::ExtractError;
use crate::types::MetaInfo;

const PURSE_PREFIX: &str = "Purse: ";

/// Parser for the `race-distance`, `race-restrictions` and `race-purse` blocks.
pub struct MetaParser;

impl MetaParser {
    pub fn parse(
        info: &ElementRef,
        restriction: &ElementRef,
        purse: &ElementRef,
    ) -> Result<MetaInfo, ExtractError> {
        Self::parse_text(
            &info.text().collect::<String>(),
            &restriction.text().collect::<String>(),
            &purse.text().collect::<String>(),
        )
    }

    /// The distance block reads "6 Furlongs,\nDirt,\nMaiden Claiming".
    pub fn parse_text(info: &str, restriction: &str, purse: &str) -> Result<MetaInfo, ExtractError> {
        let parts: Vec<&str> = info.split(",\n").map(str::trim).collect();
        let [distance, surface, race_type] = parts.as_slice() else {
            return Err(ExtractError::MalformedMeta {
                segments: parts.len(),
            });
        };

        Ok(MetaInfo {
            distance: distance.to_string(),
            surface: surface.to_string(),
            race_type: race_type.to_string(),
            restriction: restriction.trim().to_string(),
            purse: purse.replace(PURSE_PREFIX, "").trim().to_string(),
        })
    }
}
