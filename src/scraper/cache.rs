//! File-based page cache with TTL support.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Cache entry with timestamp
#[derive(Serialize, Deserialize)]
struct CacheEntry {
    html: String,
    cached_at: DateTime<Utc>,
}

/// Cache categories with different TTLs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheCategory {
    Results, // 30 days, results are final
    Entries, // 15 minutes, scratches keep coming
}

impl CacheCategory {
    /// Get TTL duration
    pub fn ttl(&self) -> Duration {
        match self {
            CacheCategory::Results => Duration::days(30),
            CacheCategory::Entries => Duration::minutes(15),
        }
    }

    /// Get directory name for this category
    pub fn dir_name(&self) -> &str {
        match self {
            CacheCategory::Results => "results",
            CacheCategory::Entries => "entries",
        }
    }
}

/// File-based cache of raw page HTML
pub struct PageCache {
    base_dir: PathBuf,
}

impl PageCache {
    /// Create a new cache with the given base directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    fn category_dir(&self, category: CacheCategory) -> PathBuf {
        self.base_dir.join(category.dir_name())
    }

    fn cache_path(&self, category: CacheCategory, key: &str) -> PathBuf {
        self.category_dir(category).join(format!("{}.json", key))
    }

    /// Get cached page if still fresh
    pub fn get(&self, category: CacheCategory, key: &str) -> Option<String> {
        let path = self.cache_path(category, key);

        if !path.exists() {
            return None;
        }

        let content = std::fs::read_to_string(&path).ok()?;
        let entry: CacheEntry = serde_json::from_str(&content).ok()?;

        let elapsed = Utc::now() - entry.cached_at;
        if elapsed > category.ttl() {
            let _ = std::fs::remove_file(&path);
            return None;
        }

        Some(entry.html)
    }

    /// Store a page
    pub fn set(&self, category: CacheCategory, key: &str, html: &str) -> Result<()> {
        self.write_entry(
            category,
            key,
            &CacheEntry {
                html: html.to_string(),
                cached_at: Utc::now(),
            },
        )
    }

    fn write_entry(&self, category: CacheCategory, key: &str, entry: &CacheEntry) -> Result<()> {
        let dir = self.category_dir(category);
        std::fs::create_dir_all(&dir)?;

        let path = self.cache_path(category, key);
        std::fs::write(&path, serde_json::to_string(entry)?)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_within_ttl() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path().to_path_buf());

        assert!(cache.get(CacheCategory::Results, "parx_2024-05-04").is_none());
        cache
            .set(CacheCategory::Results, "parx_2024-05-04", "<html></html>")
            .unwrap();
        assert_eq!(
            cache.get(CacheCategory::Results, "parx_2024-05-04").as_deref(),
            Some("<html></html>")
        );
        // Categories do not share entries
        assert!(cache.get(CacheCategory::Entries, "parx_2024-05-04").is_none());
    }

    #[test]
    fn test_expired_entry_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let cache = PageCache::new(dir.path().to_path_buf());
        let stale = CacheEntry {
            html: "<html>old</html>".to_string(),
            cached_at: Utc::now() - Duration::hours(1),
        };
        cache
            .write_entry(CacheCategory::Entries, "parx_2024-05-04", &stale)
            .unwrap();

        assert!(cache.get(CacheCategory::Entries, "parx_2024-05-04").is_none());
        assert!(!cache
            .cache_path(CacheCategory::Entries, "parx_2024-05-04")
            .exists());
    }

    #[test]
    fn test_ttls() {
        assert_eq!(CacheCategory::Results.ttl(), Duration::days(30));
        assert_eq!(CacheCategory::Entries.ttl(), Duration::minutes(15));
    }
}
