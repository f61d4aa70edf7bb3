//! Crawl orchestration
//!
//! The coordinator owns all crawl state: the queue, the worker pool, the
//! compiled policy, the store client, the statistics, and the per-site
//! error counters. Workers only ever touch that state through the shared
//! context, so a crawl can be driven from any number of submitting tasks.

use reqwest::Client;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::config::{Config, CrawlerConfig};
use crate::crawler::pipeline::{build_fetch_client, fetch_article, FetchOutcome};
use crate::crawler::queue::CrawlQueue;
use crate::crawler::stats::CrawlStats;
use crate::policy::{SiteDirectory, SitePolicy};
use crate::store::ArticleStore;

/// Shared crawl state handed to every worker
pub(crate) struct CrawlContext {
    pub(crate) config: CrawlerConfig,
    pub(crate) policy: SitePolicy,
    pub(crate) sites: SiteDirectory,
    pub(crate) store: ArticleStore,
    pub(crate) http: Client,
    pub(crate) stats: Mutex<CrawlStats>,
    pub(crate) site_errors: Mutex<HashMap<String, u32>>,
}

impl CrawlContext {
    /// Whether a site currently sits at the consecutive-error ceiling
    ///
    /// A ceiling of 0 disables suspension, and sites in the no-ignore set
    /// are never suspended.
    pub(crate) fn site_suspended(&self, site: &str) -> bool {
        let ceiling = self.config.max_errors_per_site;
        if ceiling == 0 {
            return false;
        }
        if self.policy.no_ignore.contains(site) {
            return false;
        }
        let errors = self.site_errors.lock().unwrap();
        errors.get(site).map_or(false, |count| *count >= ceiling)
    }

    /// Applies one terminal outcome to the counters
    ///
    /// Each outcome increments exactly one primary counter. Failed and
    /// banned outcomes charge an error to their site; a retrieved outcome
    /// resets its site's counter to zero.
    pub(crate) fn record(&self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Retrieved {
                canonical,
                site,
                redirected,
            } => {
                let retrieved = {
                    let mut stats = self.stats.lock().unwrap();
                    stats.retrieved += 1;
                    if redirected {
                        stats.redirected += 1;
                    }
                    stats.retrieved
                };
                self.site_errors.lock().unwrap().insert(site, 0);
                info!("{} {}", retrieved, canonical);
            }
            FetchOutcome::Known => self.stats.lock().unwrap().known += 1,
            FetchOutcome::Blocked => self.stats.lock().unwrap().blocked += 1,
            FetchOutcome::Ignored => self.stats.lock().unwrap().ignored += 1,
            FetchOutcome::Oversized => self.stats.lock().unwrap().oversized += 1,
            FetchOutcome::Filtered => self.stats.lock().unwrap().filtered += 1,
            FetchOutcome::Failed { site } => {
                self.stats.lock().unwrap().failed += 1;
                if let Some(site) = site {
                    self.charge_site(&site);
                }
            }
            FetchOutcome::Banned { site } => {
                self.stats.lock().unwrap().banned += 1;
                self.charge_site(&site);
            }
        }
    }

    fn charge_site(&self, site: &str) {
        let mut errors = self.site_errors.lock().unwrap();
        *errors.entry(site.to_string()).or_insert(0) += 1;
    }
}

/// News crawler with a fixed worker pool
///
/// URLs enter through `crawl`, workers drive each one through the fetch
/// pipeline, and `wait` returns once every admitted URL has reached a
/// terminal outcome. Dropping the crawler stops the workers.
pub struct Crawler {
    ctx: Arc<CrawlContext>,
    queue: Arc<CrawlQueue>,
    workers: Vec<JoinHandle<()>>,
}

impl Crawler {
    /// Creates a crawler and starts its worker pool
    ///
    /// Workers are spawned immediately, so this must be called from within
    /// a tokio runtime.
    ///
    /// # Arguments
    ///
    /// * `config` - validated configuration
    /// * `sites` - site directory; when non-empty it also acts as the
    ///   canonical-URL allowlist
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - worker pool started
    /// * `Err(CrawlError)` - policy compilation or HTTP client construction
    ///   failed
    pub fn new(config: Config, sites: SiteDirectory) -> crate::Result<Self> {
        let policy = SitePolicy::compile(&config.policy)?;
        let store = ArticleStore::new(&config.store.url)?;
        let http = build_fetch_client(&config.crawler)?;

        let threads = config.crawler.threads;
        let queue = Arc::new(CrawlQueue::new(config.crawler.queue_size));
        let ctx = Arc::new(CrawlContext {
            config: config.crawler,
            policy,
            sites,
            store,
            http,
            stats: Mutex::new(CrawlStats::default()),
            site_errors: Mutex::new(HashMap::new()),
        });

        info!("Starting {} crawl workers", threads);
        let workers = (0..threads)
            .map(|id| {
                let ctx = Arc::clone(&ctx);
                let queue = Arc::clone(&queue);
                tokio::spawn(worker_loop(id, ctx, queue))
            })
            .collect();

        Ok(Self { ctx, queue, workers })
    }

    /// Admits a URL to the crawl queue, waiting while the queue is full
    pub async fn crawl(&self, url: String) {
        {
            let mut stats = self.ctx.stats.lock().unwrap();
            stats.crawled += 1;
        }
        self.queue.put(url).await;
    }

    /// Waits until every admitted URL has reached a terminal outcome
    pub async fn wait(&self) {
        self.queue.join().await;
    }

    /// Returns a snapshot of the aggregate counters
    pub fn stats(&self) -> CrawlStats {
        self.ctx.stats.lock().unwrap().clone()
    }

    /// Returns the consecutive-error count currently charged to a site
    pub fn site_error_count(&self, site: &str) -> u32 {
        self.ctx
            .site_errors
            .lock()
            .unwrap()
            .get(site)
            .copied()
            .unwrap_or(0)
    }
}

impl Drop for Crawler {
    fn drop(&mut self) {
        // Workers park on the queue forever; they are stopped, not joined.
        for worker in &self.workers {
            worker.abort();
        }
    }
}

async fn worker_loop(id: usize, ctx: Arc<CrawlContext>, queue: Arc<CrawlQueue>) {
    debug!("Worker {} started", id);
    loop {
        let Some(url) = queue.take().await else {
            break;
        };
        debug!("Worker {} fetching {}", id, url);
        let outcome = fetch_article(&ctx, &url).await;
        ctx.record(outcome);
        queue.task_done();
    }
    debug!("Worker {} stopped", id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyConfig;

    fn create_test_context() -> CrawlContext {
        let config = CrawlerConfig::default();
        let http = build_fetch_client(&config).unwrap();
        CrawlContext {
            config,
            policy: SitePolicy::compile(&PolicyConfig::default()).unwrap(),
            sites: SiteDirectory::empty(),
            store: ArticleStore::new("http://localhost:7070/crawl").unwrap(),
            http,
            stats: Mutex::new(CrawlStats::default()),
            site_errors: Mutex::new(HashMap::new()),
        }
    }

    fn retrieved(site: &str, redirected: bool) -> FetchOutcome {
        FetchOutcome::Retrieved {
            canonical: "https://example.com/a/1".to_string(),
            site: site.to_string(),
            redirected,
        }
    }

    #[test]
    fn test_record_primary_counters() {
        let ctx = create_test_context();
        ctx.record(FetchOutcome::Known);
        ctx.record(FetchOutcome::Blocked);
        ctx.record(FetchOutcome::Ignored);
        ctx.record(FetchOutcome::Oversized);
        ctx.record(FetchOutcome::Filtered);
        ctx.record(FetchOutcome::Failed { site: None });
        ctx.record(FetchOutcome::Banned {
            site: "example.com".to_string(),
        });
        ctx.record(retrieved("example.com", false));

        let stats = ctx.stats.lock().unwrap();
        assert_eq!(stats.known, 1);
        assert_eq!(stats.blocked, 1);
        assert_eq!(stats.ignored, 1);
        assert_eq!(stats.oversized, 1);
        assert_eq!(stats.filtered, 1);
        assert_eq!(stats.failed, 1);
        assert_eq!(stats.banned, 1);
        assert_eq!(stats.retrieved, 1);
        assert_eq!(stats.redirected, 0);
    }

    #[test]
    fn test_record_redirected_is_secondary() {
        let ctx = create_test_context();
        ctx.record(retrieved("example.com", true));

        let stats = ctx.stats.lock().unwrap();
        assert_eq!(stats.retrieved, 1);
        assert_eq!(stats.redirected, 1);
    }

    #[test]
    fn test_record_failed_charges_site() {
        let ctx = create_test_context();
        ctx.record(FetchOutcome::Failed {
            site: Some("example.com".to_string()),
        });
        ctx.record(FetchOutcome::Failed {
            site: Some("example.com".to_string()),
        });

        assert_eq!(ctx.site_errors.lock().unwrap()["example.com"], 2);
    }

    #[test]
    fn test_record_store_failure_charges_no_site() {
        let ctx = create_test_context();
        ctx.record(FetchOutcome::Failed { site: None });

        assert!(ctx.site_errors.lock().unwrap().is_empty());
    }

    #[test]
    fn test_record_banned_charges_site() {
        let ctx = create_test_context();
        ctx.record(FetchOutcome::Banned {
            site: "example.com".to_string(),
        });

        assert_eq!(ctx.site_errors.lock().unwrap()["example.com"], 1);
    }

    #[test]
    fn test_record_retrieved_resets_site_errors() {
        let ctx = create_test_context();
        ctx.site_errors
            .lock()
            .unwrap()
            .insert("example.com".to_string(), 7);

        ctx.record(retrieved("example.com", false));

        assert_eq!(ctx.site_errors.lock().unwrap()["example.com"], 0);
    }

    #[test]
    fn test_site_suspended_at_ceiling() {
        let ctx = create_test_context();
        ctx.site_errors
            .lock()
            .unwrap()
            .insert("example.com".to_string(), 9);
        assert!(!ctx.site_suspended("example.com"));

        ctx.site_errors
            .lock()
            .unwrap()
            .insert("example.com".to_string(), 10);
        assert!(ctx.site_suspended("example.com"));
    }

    #[test]
    fn test_site_suspended_disabled_when_ceiling_zero() {
        let mut ctx = create_test_context();
        ctx.config.max_errors_per_site = 0;
        ctx.site_errors
            .lock()
            .unwrap()
            .insert("example.com".to_string(), 100);

        assert!(!ctx.site_suspended("example.com"));
    }

    #[test]
    fn test_site_suspended_exempts_no_ignore_sites() {
        let ctx = create_test_context();
        ctx.site_errors
            .lock()
            .unwrap()
            .insert("bit.ly".to_string(), 100);

        assert!(!ctx.site_suspended("bit.ly"));
    }

    #[tokio::test]
    async fn test_wait_with_no_urls() {
        let crawler = Crawler::new(Config::default(), SiteDirectory::empty()).unwrap();
        crawler.wait().await;
        assert_eq!(crawler.stats(), CrawlStats::default());
    }

    #[tokio::test]
    async fn test_blocked_url_needs_no_network() {
        let crawler = Crawler::new(Config::default(), SiteDirectory::empty()).unwrap();
        crawler
            .crawl("https://youtube.com/watch?v=dQw4w9WgXcQ".to_string())
            .await;
        crawler.wait().await;

        let stats = crawler.stats();
        assert_eq!(stats.crawled, 1);
        assert_eq!(stats.blocked, 1);
    }
}
