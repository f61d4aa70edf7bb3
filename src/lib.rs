//! Newswire: a concurrent news article crawler
//!
//! This crate implements the fetch side of a news archive: URLs are admitted
//! into a bounded queue, a fixed pool of workers fetches them, resolves each
//! page to its canonical article URL, and commits new articles to a remote
//! content-addressed store while tracking per-site failure counters and
//! aggregate statistics.

pub mod config;
pub mod crawler;
pub mod policy;
pub mod store;
pub mod url;

use thiserror::Error;

/// Main error type for newswire operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Article store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid URL pattern: {0}")]
    InvalidPattern(String),

    #[error("Invalid HTTP header in config: {0}")]
    InvalidHeader(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to compile URL pattern set: {0}")]
    Pattern(String),
}

/// Result type alias for newswire operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{CrawlStats, Crawler};
pub use policy::{PolicyConfig, SiteDirectory, SitePolicy, SiteRecord};
pub use store::{ArticleStore, PutResult};
pub use url::{extract_canonical, site_name, Blocklist, Normalizer};
