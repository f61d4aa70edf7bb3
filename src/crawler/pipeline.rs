//! Per-URL fetch pipeline
//!
//! This module turns one submitted URL into one terminal outcome:
//! - Admission checks: blocklist, per-site error ceiling, store lookup
//! - HTTP fetch with per-site headers and redirect following
//! - Size guard and canonical URL resolution
//! - Post-canonicalization blocklist and allowlist checks
//! - Conditional store write plus an optional redirect record
//!
//! Nothing here unwinds into the worker loop; every failure mode is an
//! outcome value.

use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;
use tracing::warn;

use crate::config::CrawlerConfig;
use crate::crawler::coordinator::CrawlContext;
use crate::store::{header_block, PutResult};
use crate::url::{extract_canonical, site_name};

/// Terminal outcome of processing one URL
///
/// Each variant maps to exactly one primary statistics counter. Variants
/// carry whatever the bookkeeping step needs: the site to charge an error
/// to, or the canonical URL that was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FetchOutcome {
    /// Article stored as new
    Retrieved {
        /// Canonical URL the article was stored under
        canonical: String,
        /// Site whose error counter is reset
        site: String,
        /// Whether a new redirect record was written alongside
        redirected: bool,
    },

    /// The store already had this article
    Known,

    /// URL or canonical URL is on the blocklist
    Blocked,

    /// Site is at the error ceiling, URL skipped without traffic
    Ignored,

    /// Fetch or store failure; `site` is charged an error when set
    Failed { site: Option<String> },

    /// Fetch answered with HTTP 451
    Banned { site: String },

    /// Response body exceeded the size ceiling
    Oversized,

    /// Canonical URL's site is not in the site directory
    Filtered,
}

/// Builds the HTTP client used for article fetches
///
/// Redirects are followed up to 10 hops; the final URL is read back off
/// the response. Headers are supplied per request from the policy's header
/// table, so the client sets none of its own.
pub(crate) fn build_fetch_client(config: &CrawlerConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.fetch_timeout_secs))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one URL and drives it to a terminal outcome
///
/// # Pipeline
///
/// 1. Reject blocklisted URLs before any traffic
/// 2. Skip URLs whose site sits at the error ceiling
/// 3. Skip articles the store already has under the normalized URL
/// 4. Fetch with the site's header set, following redirects
/// 5. Classify HTTP 451 as banned, other non-success as failed
/// 6. Discard bodies over the size ceiling
/// 7. Resolve the canonical URL from the page, falling back to the fetch
///    target
/// 8. Re-check the blocklist and the site allowlist on the canonical URL
/// 9. Conditionally store the record; an existing entry counts as known
/// 10. If the normalized URL differs from the canonical one, write a
///     best-effort redirect record
pub(crate) async fn fetch_article(ctx: &CrawlContext, url: &str) -> FetchOutcome {
    if ctx.policy.blocklist.is_blocked(url) {
        warn!("Blocked: {}", url);
        return FetchOutcome::Blocked;
    }

    // The site charged for fetch errors; reassigned after redirects.
    let mut site = site_name(url).to_string();
    if ctx.site_suspended(&site) {
        warn!("Ignored: {}", url);
        return FetchOutcome::Ignored;
    }

    let trimmed = ctx.policy.normalizer.trim(url);
    match ctx.store.exists(trimmed).await {
        Ok(true) => return FetchOutcome::Known,
        Ok(false) => {}
        Err(e) => {
            warn!("Store lookup failed for {}: {}", trimmed, e);
            return FetchOutcome::Failed { site: None };
        }
    }

    let headers = ctx.policy.headers.for_site(&site).clone();
    let response = match ctx.http.get(url).headers(headers).send().await {
        Ok(response) => response,
        Err(e) => {
            warn!("Article error for {}: {}", url, e);
            return FetchOutcome::Failed { site: Some(site) };
        }
    };

    if response.status() == StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS {
        warn!("Banned: {}", url);
        return FetchOutcome::Banned { site };
    }
    if !response.status().is_success() {
        warn!("Article error for {}: status {}", url, response.status());
        return FetchOutcome::Failed { site: Some(site) };
    }

    // The fetch may have been redirected; the target URL and the site the
    // article is attributed to come from where the response actually
    // originated.
    let final_url = response.url().to_string();
    let target = ctx.policy.normalizer.trim(&final_url).to_string();
    if final_url != url {
        site = site_name(&final_url).to_string();
    }

    let block = header_block(response.headers(), &site, &ctx.config.name);
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(e) => {
            warn!("Article error for {}: {}", url, e);
            return FetchOutcome::Failed { site: Some(site) };
        }
    };

    if body.len() > ctx.config.max_article_size {
        warn!("Article too big: {}, {} bytes", url, body.len());
        return FetchOutcome::Oversized;
    }

    let canonical =
        extract_canonical(&ctx.policy.normalizer, trimmed, &body).unwrap_or(target);

    if ctx.policy.blocklist.is_blocked(&canonical) {
        warn!("Blocked: {} from {}", canonical, url);
        return FetchOutcome::Blocked;
    }

    if !ctx.sites.is_empty() && !ctx.sites.contains(site_name(&canonical)) {
        warn!(
            "Filtered: {} from {}, site: {}",
            canonical,
            url,
            site_name(&canonical)
        );
        return FetchOutcome::Filtered;
    }

    let mut record = block;
    record.extend_from_slice(&body);
    let version = chrono::Utc::now().timestamp();
    match ctx.store.put(&canonical, version, record).await {
        Ok(PutResult::New) => {}
        Ok(PutResult::Existing) => return FetchOutcome::Known,
        Err(e) => {
            warn!("Store write failed for {}: {}", canonical, e);
            return FetchOutcome::Failed { site: None };
        }
    }

    // The redirect record is best effort; the article itself is already
    // stored.
    let mut redirected = false;
    if trimmed != canonical {
        match ctx.store.put_redirect(trimmed, &canonical).await {
            Ok(PutResult::New) => redirected = true,
            Ok(PutResult::Existing) => {}
            Err(e) => warn!("Redirect record failed for {}: {}", trimmed, e),
        }
    }

    FetchOutcome::Retrieved {
        canonical,
        site,
        redirected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_fetch_client() {
        let client = build_fetch_client(&CrawlerConfig::default());
        assert!(client.is_ok());
    }
}
