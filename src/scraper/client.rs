//! HTTP client for entries-results pages.

use std::time::Duration;

use super::cache::{CacheCategory, PageCache};
use super::entries_results_url;
use crate::config::HttpConfig;
use crate::error::FetchError;
use crate::retry::{retry, RetryConfig};

/// Fetches pages with retry and an optional on-disk cache
pub struct PageClient {
    client: reqwest::Client,
    base_url: String,
    retry: RetryConfig,
    cache: Option<PageCache>,
}

impl PageClient {
    pub fn new(config: &HttpConfig, cache: Option<PageCache>) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            retry: config.retry(),
            cache,
        })
    }

    pub fn page_url(&self, track: &str, date: &str) -> String {
        entries_results_url(&self.base_url, track, date)
    }

    /// Get the page for a track and date.
    ///
    /// `refresh` skips the cache read but still stores the new copy.
    pub async fn fetch(
        &self,
        track: &str,
        date: &str,
        category: CacheCategory,
        refresh: bool,
    ) -> Result<String, FetchError> {
        let key = format!("{}_{}", track, date);

        if let (Some(cache), false) = (&self.cache, refresh) {
            if let Some(html) = cache.get(category, &key) {
                tracing::info!("Cache hit for {}", key);
                return Ok(html);
            }
            tracing::debug!("Cache miss for {}", key);
        }

        let url = self.page_url(track, date);
        tracing::info!("Fetching {}", url);
        let html = retry(&self.retry, "page fetch", || self.get(&url)).await?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(category, &key, &html) {
                tracing::warn!("Failed to cache {}: {}", key, e);
            }
        }

        Ok(html)
    }

    async fn get(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status,
                url: url.to_string(),
            });
        }
        Ok(response.text().await?)
    }
}
