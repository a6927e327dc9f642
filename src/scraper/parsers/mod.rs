//! HTML parsers for horseracingnation.com entries-results pages.

pub mod entries;
pub mod exotics;
pub mod meta;
pub mod odds;
pub mod payouts;
pub mod race_page;

pub use entries::EntriesParser;
pub use exotics::ExoticsParser;
pub use meta::MetaParser;
pub use odds::OddsParser;
pub use payouts::PayoutTableParser;
pub use race_page::RacePage;

use scraper::{ElementRef, Selector};

use crate::error::ExtractError;

/// Compile a CSS selector, mapping the parse failure into `ExtractError`.
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|_| ExtractError::Selector(css.to_string()))
}

/// Collected, trimmed text content of an element.
pub(crate) fn text_of(elem: &ElementRef) -> String {
    elem.text().collect::<String>().trim().to_string()
}

/// Child `<td>` cells of a table row.
pub(crate) fn cells<'a>(row: &ElementRef<'a>) -> Result<Vec<ElementRef<'a>>, ExtractError> {
    let td = selector("td")?;
    Ok(row.select(&td).collect())
}
