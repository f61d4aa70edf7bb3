use serde::Deserialize;
use std::path::PathBuf;

use crate::policy::PolicyConfig;

/// Main configuration structure for newswire
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration pointed at a local article store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub policy: PolicyConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// Instance name, recorded in the X-Crawler header of stored articles
    #[serde(default = "default_name")]
    pub name: String,

    /// Number of crawl workers
    #[serde(default = "default_threads")]
    pub threads: usize,

    /// Capacity of the crawl queue
    #[serde(rename = "queue-size", default = "default_queue_size")]
    pub queue_size: usize,

    /// HTTP fetch timeout in seconds
    #[serde(rename = "fetch-timeout-secs", default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Consecutive fetch errors before a site is ignored; 0 disables the
    /// ceiling
    #[serde(rename = "max-errors-per-site", default = "default_max_errors_per_site")]
    pub max_errors_per_site: u32,

    /// Largest article body accepted, in bytes
    #[serde(rename = "max-article-size", default = "default_max_article_size")]
    pub max_article_size: usize,

    /// Path to the news site list; no allowlist filtering when absent
    #[serde(rename = "sites-file", default)]
    pub sites_file: Option<PathBuf>,
}

/// Article store connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the article store
    #[serde(default = "default_store_url")]
    pub url: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            threads: default_threads(),
            queue_size: default_queue_size(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            max_errors_per_site: default_max_errors_per_site(),
            max_article_size: default_max_article_size(),
            sites_file: None,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_store_url(),
        }
    }
}

fn default_name() -> String {
    "newswire".to_string()
}

fn default_threads() -> usize {
    10
}

fn default_queue_size() -> usize {
    1024
}

fn default_fetch_timeout_secs() -> u64 {
    60
}

fn default_max_errors_per_site() -> u32 {
    10
}

fn default_max_article_size() -> usize {
    8 * 1024 * 1024
}

fn default_store_url() -> String {
    "http://localhost:7070/crawl".to_string()
}
