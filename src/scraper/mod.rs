//! Web scraper module for horseracingnation.com
//!
//! Provides page fetching, caching, and HTML parsing.

pub mod cache;
pub mod client;
pub mod parsers;

pub use cache::{CacheCategory, PageCache};
pub use client::PageClient;

/// Build entries-results page URL
pub fn entries_results_url(base_url: &str, track: &str, date: &str) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), track, date)
}
