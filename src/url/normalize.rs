use crate::UrlError;
use regex::RegexSet;

/// URL normalizer with a configurable set of query-significant sites
///
/// Normalization reduces a news URL to the form used as its identity for
/// duplicate detection: tracking fragments and query strings are dropped,
/// as are trailing slashes and AMP suffixes. For a handful of sites the
/// query string is the article identifier and must be kept; those sites are
/// supplied as regex patterns when the normalizer is built.
#[derive(Debug)]
pub struct Normalizer {
    query_significant: RegexSet,
}

impl Normalizer {
    /// Creates a normalizer from query-significant URL patterns
    ///
    /// Each pattern is matched unanchored against the full URL, so patterns
    /// should carry their own `https?://` prefix when they are meant to
    /// match from the start.
    ///
    /// # Arguments
    ///
    /// * `query_significant` - regex patterns for URLs whose query string is
    ///   part of the article identity
    pub fn new(query_significant: &[String]) -> Result<Self, UrlError> {
        let query_significant =
            RegexSet::new(query_significant).map_err(|e| UrlError::Pattern(e.to_string()))?;
        Ok(Self { query_significant })
    }

    /// Trims the parts of a news URL that are not needed for uniqueness
    ///
    /// # Normalization Steps
    ///
    /// 1. Remove the URL fragment
    /// 2. Remove the query string, unless a query-significant pattern
    ///    matches the URL
    /// 3. Repeatedly remove one trailing `/` or one trailing `/amp`, slash
    ///    first, until neither remains
    ///
    /// Every step removes a suffix, so the result is always a prefix of the
    /// input and the operation is idempotent.
    ///
    /// # Examples
    ///
    /// ```
    /// use newswire::url::Normalizer;
    ///
    /// let normalizer = Normalizer::new(&[]).unwrap();
    /// assert_eq!(
    ///     normalizer.trim("https://example.com/story/amp?utm=1#top"),
    ///     "https://example.com/story"
    /// );
    /// ```
    pub fn trim<'a>(&self, url: &'a str) -> &'a str {
        let mut url = url;

        // Remove URL fragment.
        if let Some(h) = url.find('#') {
            url = &url[..h];
        }

        // Remove query parameters unless there is an exception.
        if let Some(q) = url.find('?') {
            if !self.query_significant.is_match(url) {
                url = &url[..q];
            }
        }

        // Remove trailing / and /amp down to a fixed point.
        loop {
            if let Some(s) = url.strip_suffix('/') {
                url = s;
                continue;
            }
            if let Some(s) = url.strip_suffix("/amp") {
                url = s;
                continue;
            }
            break;
        }

        url
    }
}
