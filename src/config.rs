//! Configuration for the scraper.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::retry::RetryConfig;

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Extra attempts after the first failed fetch
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_base_url() -> String {
    "https://entries.horseracingnation.com/entries-results".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("hrn-scraper/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_max_retries() -> u32 {
    0
}

fn default_initial_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    30_000
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

impl HttpConfig {
    pub fn retry(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_delay: Duration::from_millis(self.initial_delay_ms),
            max_delay: Duration::from_millis(self.max_delay_ms),
            multiplier: 2.0,
        }
    }
}

/// Output directories for the CSV files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_entries_dir")]
    pub entries_dir: String,
    #[serde(default = "default_meta_dir")]
    pub meta_dir: String,
    #[serde(default = "default_upc_entries_dir")]
    pub upc_entries_dir: String,
    #[serde(default = "default_upc_meta_dir")]
    pub upc_meta_dir: String,
}

fn default_entries_dir() -> String {
    "data/entries".to_string()
}

fn default_meta_dir() -> String {
    "data/meta".to_string()
}

fn default_upc_entries_dir() -> String {
    "data/upc_entries".to_string()
}

fn default_upc_meta_dir() -> String {
    "data/upc_meta".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            entries_dir: default_entries_dir(),
            meta_dir: default_meta_dir(),
            upc_entries_dir: default_upc_entries_dir(),
            upc_meta_dir: default_upc_meta_dir(),
        }
    }
}

/// Page cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default = "default_cache_dir")]
    pub dir: String,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_cache_dir() -> String {
    "data/cache/pages".to_string()
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            dir: default_cache_dir(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

impl AppConfig {
    /// Load configuration from environment and config file
    pub fn load() -> anyhow::Result<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&AppConfig::default())?)
            // Add config file if exists
            .add_source(config::File::with_name("hrn_scraper").required(false))
            // Override with environment variables (HRN_HTTP__TIMEOUT_SECS, etc.)
            .add_source(
                config::Environment::with_prefix("HRN")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}
