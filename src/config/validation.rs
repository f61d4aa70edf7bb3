use crate::config::types::{Config, CrawlerConfig, StoreConfig};
use crate::policy::{PolicyConfig, SitePolicy};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_store_config(&config.store)?;
    validate_policy_config(&config.policy)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler name cannot be empty".to_string(),
        ));
    }

    // The name is embedded in the X-Crawler header of every stored record.
    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.threads < 1 {
        return Err(ConfigError::Validation(format!(
            "threads must be >= 1, got {}",
            config.threads
        )));
    }

    if config.queue_size < 1 {
        return Err(ConfigError::Validation(format!(
            "queue-size must be >= 1, got {}",
            config.queue_size
        )));
    }

    if config.fetch_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch-timeout-secs must be >= 1, got {}",
            config.fetch_timeout_secs
        )));
    }

    // max-errors-per-site may be 0, which disables the per-site ceiling.

    if config.max_article_size < 1 {
        return Err(ConfigError::Validation(format!(
            "max-article-size must be >= 1, got {}",
            config.max_article_size
        )));
    }

    Ok(())
}

/// Validates store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid store url '{}': {}", config.url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "store url must use http or https, got '{}'",
            config.url
        )));
    }

    Ok(())
}

/// Validates policy tables by compiling them
fn validate_policy_config(config: &PolicyConfig) -> Result<(), ConfigError> {
    SitePolicy::compile(config)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let mut config = Config::default();
        config.crawler.threads = 0;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_queue_size_rejected() {
        let mut config = Config::default();
        config.crawler.queue_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.crawler.fetch_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_article_size_rejected() {
        let mut config = Config::default();
        config.crawler.max_article_size = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_zero_max_errors_accepted() {
        let mut config = Config::default();
        config.crawler.max_errors_per_site = 0;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut config = Config::default();
        config.crawler.name = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_name_with_spaces_rejected() {
        let mut config = Config::default();
        config.crawler.name = "news crawler".to_string();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_unparseable_store_url_rejected() {
        let mut config = Config::default();
        config.store.url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_store_url_rejected() {
        let mut config = Config::default();
        config.store.url = "ftp://localhost/crawl".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_bad_policy_pattern_rejected() {
        let mut config = Config::default();
        config.policy.blocked_urls.push("(unclosed".to_string());
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidPattern(_))
        ));
    }
}
