use serde::Deserialize;
use std::collections::{HashMap, HashSet};

use super::defaults;
use super::headers::HeaderTable;
use crate::url::{Blocklist, Normalizer};
use crate::{ConfigError, ConfigResult, UrlError};

/// Crawl policy tables, as read from configuration
///
/// Every table carries a built-in default tuned for news crawling, so a
/// config file only names the tables it wants to replace.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyConfig {
    /// URL patterns that are never fetched or stored, matched as prefixes
    /// behind `https?://`
    #[serde(rename = "blocked-urls", default = "defaults::blocked_urls")]
    pub blocked_urls: Vec<String>,

    /// File extensions for media content, matched as URL suffixes
    #[serde(rename = "media-extensions", default = "defaults::media_extensions")]
    pub media_extensions: Vec<String>,

    /// Patterns for video listing pages
    #[serde(rename = "video-urls", default = "defaults::video_urls")]
    pub video_urls: Vec<String>,

    /// Patterns for URLs whose query string is part of the article identity
    #[serde(rename = "query-significant", default = "defaults::query_significant")]
    pub query_significant: Vec<String>,

    /// Sites exempt from the per-site error ceiling
    #[serde(rename = "no-ignore-sites", default = "defaults::no_ignore_sites")]
    pub no_ignore_sites: Vec<String>,

    /// Headers sent with every fetch unless a site override applies
    #[serde(rename = "default-headers", default = "defaults::default_headers")]
    pub default_headers: HashMap<String, String>,

    /// Per-site header overrides, each replacing the default set
    #[serde(rename = "site-headers", default = "defaults::site_headers")]
    pub site_headers: HashMap<String, HashMap<String, String>>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            blocked_urls: defaults::blocked_urls(),
            media_extensions: defaults::media_extensions(),
            video_urls: defaults::video_urls(),
            query_significant: defaults::query_significant(),
            no_ignore_sites: defaults::no_ignore_sites(),
            default_headers: defaults::default_headers(),
            site_headers: defaults::site_headers(),
        }
    }
}

/// Compiled crawl policy
///
/// The pattern tables compiled into matchers, plus resolved header sets.
/// Built once at startup and shared read-only by all workers.
#[derive(Debug)]
pub struct SitePolicy {
    pub(crate) blocklist: Blocklist,
    pub(crate) normalizer: Normalizer,
    pub(crate) headers: HeaderTable,
    pub(crate) no_ignore: HashSet<String>,
}

impl SitePolicy {
    /// Compiles policy tables into matchers
    ///
    /// # Returns
    ///
    /// * `Ok(SitePolicy)` - all patterns and headers compiled
    /// * `Err(ConfigError)` - a pattern or header was malformed
    pub fn compile(config: &PolicyConfig) -> ConfigResult<Self> {
        let blocklist = Blocklist::new(
            &config.blocked_urls,
            &config.media_extensions,
            &config.video_urls,
        )
        .map_err(pattern_error)?;
        let normalizer = Normalizer::new(&config.query_significant).map_err(pattern_error)?;
        let headers = HeaderTable::build(&config.default_headers, &config.site_headers)?;
        let no_ignore = config.no_ignore_sites.iter().cloned().collect();
        Ok(Self {
            blocklist,
            normalizer,
            headers,
            no_ignore,
        })
    }
}

fn pattern_error(err: UrlError) -> ConfigError {
    match err {
        UrlError::Pattern(message) => ConfigError::InvalidPattern(message),
    }
}
