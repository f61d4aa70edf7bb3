use std::fmt;

/// Aggregate crawl counters
///
/// Every processed URL lands in exactly one primary outcome, and `crawled`
/// counts admissions, so once the queue is drained:
///
/// `crawled == known + retrieved + failed + ignored + blocked + filtered +
/// banned + oversized`
///
/// `redirected` sits outside that identity; it marks retrieved articles
/// that also wrote a new redirect record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// URLs admitted to the crawl queue
    pub crawled: u64,

    /// Articles the store already had, either up front or at write time
    pub known: u64,

    /// Articles newly written to the store
    pub retrieved: u64,

    /// Fetch or store failures
    pub failed: u64,

    /// URLs skipped because their site sits at the error ceiling
    pub ignored: u64,

    /// URLs, or canonical URLs, on the blocklist
    pub blocked: u64,

    /// Articles whose canonical site is outside the site directory
    pub filtered: u64,

    /// Fetches answered with HTTP 451
    pub banned: u64,

    /// New redirect records written alongside retrieved articles
    pub redirected: u64,

    /// Articles discarded for exceeding the size ceiling
    pub oversized: u64,
}

impl fmt::Display for CrawlStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SUMMARY: {} crawled, {} known, {} retrieved, {} failed, {} ignored, \
             {} blocked, {} filtered, {} banned, {} redirected, {} oversized",
            self.crawled,
            self.known,
            self.retrieved,
            self.failed,
            self.ignored,
            self.blocked,
            self.filtered,
            self.banned,
            self.redirected,
            self.oversized
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_zero() {
        let stats = CrawlStats::default();
        assert_eq!(stats.crawled, 0);
        assert_eq!(stats.retrieved, 0);
        assert_eq!(stats.redirected, 0);
    }

    #[test]
    fn test_summary_format() {
        let stats = CrawlStats {
            crawled: 10,
            known: 2,
            retrieved: 4,
            failed: 1,
            ignored: 0,
            blocked: 1,
            filtered: 1,
            banned: 0,
            redirected: 3,
            oversized: 1,
        };
        assert_eq!(
            stats.to_string(),
            "SUMMARY: 10 crawled, 2 known, 4 retrieved, 1 failed, 0 ignored, \
             1 blocked, 1 filtered, 0 banned, 3 redirected, 1 oversized"
        );
    }
}
