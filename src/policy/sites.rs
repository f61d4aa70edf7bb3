use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::warn;

use crate::ConfigResult;

/// One entry from the news site list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteRecord {
    /// Primary domain, as produced by `site_name`
    pub domain: String,
    /// Knowledge base item id for the publisher
    pub item_id: String,
    /// Publisher name
    pub name: String,
    /// Twitter handle, including the leading `@`
    pub twitter: Option<String>,
    /// Alternate domain serving the same publisher
    pub alt_domain: Option<String>,
}

/// Directory of known news sites keyed by domain
///
/// A non-empty directory doubles as an allowlist: articles whose canonical
/// URL resolves to a domain outside the directory are filtered out of the
/// store. An empty directory admits every site.
#[derive(Debug, Clone, Default)]
pub struct SiteDirectory {
    sites: HashMap<String, Arc<SiteRecord>>,
}

impl SiteDirectory {
    /// Creates a directory with no entries, disabling allowlist filtering
    pub fn empty() -> Self {
        Self::default()
    }

    /// Loads the site list from a text file
    ///
    /// Each line holds `domain,item-id,name[,twitter[,alt-domain]]`. Blank
    /// lines and lines starting with `#` are skipped. Malformed lines are
    /// reported and skipped; they never fail the load. An alternate domain
    /// registers the same record under a second key.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = fs::read_to_string(path)?;
        Ok(Self::parse(&text))
    }

    fn parse(text: &str) -> Self {
        let mut sites: HashMap<String, Arc<SiteRecord>> = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < 3 {
                warn!("Too few fields for news site: {}", line);
                continue;
            }
            let domain = fields[0];
            let item_id = fields[1];
            let name = fields[2];
            if !item_id.starts_with('Q') {
                warn!("Suspicious item id for {}: {}", domain, item_id);
            }
            if name.contains('@') {
                warn!("Suspicious name for {}: {}", domain, name);
            }

            let twitter = match fields.get(3) {
                None => None,
                Some(handle) if handle.is_empty() => None,
                Some(handle) if !handle.starts_with('@') => {
                    warn!("Illegal twitter id for news site: {}", line);
                    continue;
                }
                Some(handle) => Some(handle.to_string()),
            };

            let alt_domain = fields
                .get(4)
                .filter(|alt| !alt.is_empty())
                .map(|alt| alt.to_string());

            if sites.contains_key(domain) {
                warn!("Multiple news sites for domain {}", domain);
                continue;
            }
            let record = Arc::new(SiteRecord {
                domain: domain.to_string(),
                item_id: item_id.to_string(),
                name: name.to_string(),
                twitter,
                alt_domain: alt_domain.clone(),
            });
            sites.insert(domain.to_string(), Arc::clone(&record));
            if let Some(alt) = alt_domain {
                if sites.contains_key(&alt) {
                    warn!("Multiple news sites for domain {}", alt);
                } else {
                    sites.insert(alt, record);
                }
            }
        }
        Self { sites }
    }

    /// Looks up the record registered for a domain
    pub fn get(&self, domain: &str) -> Option<&SiteRecord> {
        self.sites.get(domain).map(|record| record.as_ref())
    }

    /// Checks whether a domain is in the directory
    pub fn contains(&self, domain: &str) -> bool {
        self.sites.contains_key(domain)
    }

    /// Number of registered domains, counting alternates
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_minimal_line() {
        let directory = SiteDirectory::parse("example.com,Q1,Example News");
        let record = directory.get("example.com").unwrap();
        assert_eq!(record.item_id, "Q1");
        assert_eq!(record.name, "Example News");
        assert_eq!(record.twitter, None);
        assert_eq!(record.alt_domain, None);
    }

    #[test]
    fn test_parse_full_line() {
        let directory = SiteDirectory::parse("example.com,Q1,Example News,@example,example.org");
        let record = directory.get("example.com").unwrap();
        assert_eq!(record.twitter.as_deref(), Some("@example"));
        assert_eq!(record.alt_domain.as_deref(), Some("example.org"));
    }

    #[test]
    fn test_alternate_domain_shares_record() {
        let directory = SiteDirectory::parse("example.com,Q1,Example News,,example.org");
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get("example.org").unwrap().domain, "example.com");
    }

    #[test]
    fn test_comments_and_blank_lines_skipped() {
        let directory = SiteDirectory::parse("# sites\n\nexample.com,Q1,Example News\n");
        assert_eq!(directory.len(), 1);
    }

    #[test]
    fn test_too_few_fields_skipped() {
        let directory = SiteDirectory::parse("example.com,Q1");
        assert!(directory.is_empty());
    }

    #[test]
    fn test_illegal_twitter_id_skips_line() {
        let directory = SiteDirectory::parse("example.com,Q1,Example News,example");
        assert!(!directory.contains("example.com"));
    }

    #[test]
    fn test_empty_twitter_field_loads() {
        let directory = SiteDirectory::parse("example.com,Q1,Example News,");
        assert_eq!(directory.get("example.com").unwrap().twitter, None);
    }

    #[test]
    fn test_duplicate_domain_keeps_first() {
        let directory = SiteDirectory::parse(
            "example.com,Q1,Example News\nexample.com,Q2,Other News",
        );
        assert_eq!(directory.len(), 1);
        assert_eq!(directory.get("example.com").unwrap().item_id, "Q1");
    }

    #[test]
    fn test_duplicate_alternate_does_not_override() {
        let directory = SiteDirectory::parse(
            "example.org,Q1,First News\nexample.com,Q2,Second News,,example.org",
        );
        assert_eq!(directory.get("example.org").unwrap().item_id, "Q1");
        assert!(directory.contains("example.com"));
    }

    #[test]
    fn test_suspicious_item_id_still_loads() {
        let directory = SiteDirectory::parse("example.com,12,Example News");
        assert!(directory.contains("example.com"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# news sites").unwrap();
        writeln!(file, "example.com,Q1,Example News,@example").unwrap();
        file.flush().unwrap();

        let directory = SiteDirectory::load(file.path()).unwrap();
        assert!(directory.contains("example.com"));
    }

    #[test]
    fn test_load_missing_file() {
        let result = SiteDirectory::load(Path::new("/nonexistent/sites.txt"));
        assert!(result.is_err());
    }
}
