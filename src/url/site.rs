/// Subdomain prefixes that do not distinguish one news site from another
const STRIPPED_PREFIXES: &[&str] = &["www.", "eu.", "uk.", "rss.", "rssfeeds.", "m."];

/// Returns the trimmed site name for a URL
///
/// The site name is the host with the scheme and common mirror prefixes
/// removed. It is the key used for the site allowlist, the per-site header
/// overrides, and the circuit-breaker error counters. Prefixes are checked
/// in a fixed order and each is stripped at most once, so
/// `www.eu.example.com` and `example.com` resolve to the same site.
///
/// # Examples
///
/// ```
/// use newswire::url::site_name;
///
/// assert_eq!(site_name("https://www.example.com/a/b"), "example.com");
/// assert_eq!(site_name("http://m.example.com"), "example.com");
/// ```
pub fn site_name(url: &str) -> &str {
    let mut site = url;
    if let Some(i) = site.find("://") {
        site = &site[i + 3..];
    }
    if let Some(i) = site.find(":/") {
        site = &site[i + 2..];
    }
    for prefix in STRIPPED_PREFIXES {
        if let Some(stripped) = site.strip_prefix(prefix) {
            site = stripped;
        }
    }
    if let Some(i) = site.find('/') {
        site = &site[..i];
    }
    site
}
