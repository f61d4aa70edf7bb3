use super::Normalizer;
use html_escape::decode_html_entities;
use once_cell::sync::Lazy;
use regex::bytes;
use regex::Regex;
use url::Url;

static CANONICAL_TAG: Lazy<bytes::Regex> = Lazy::new(|| {
    bytes::Regex::new(r#"<link\s+[^>]*rel="canonical"[^>]*>"#).expect("canonical tag pattern")
});

static HREF_ATTR: Lazy<bytes::Regex> =
    Lazy::new(|| bytes::Regex::new(r#"\shref="([^"]*)""#).expect("href attribute pattern"));

static FRONT_PAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^/]+/?$").expect("front page pattern"));

/// Extracts the canonical article URL from raw page bytes
///
/// Scans the body for a `<link rel="canonical">` tag and pulls out its
/// `href`. The scan runs over bytes so pages with broken encodings still
/// work; only the href itself must be valid UTF-8. Hrefs starting with `/`
/// are resolved against `base` (the page's normalized URL). Candidates that
/// are empty or just a site front page yield `None`, as does a missing or
/// malformed tag, and the caller falls back to the fetch target URL.
///
/// The surviving candidate is normalized with `normalizer` and HTML
/// entities in it are unescaped.
pub fn extract_canonical(normalizer: &Normalizer, base: &str, page: &[u8]) -> Option<String> {
    let tag = CANONICAL_TAG.find(page)?;
    let href = HREF_ATTR.captures(tag.as_bytes())?;
    let href = std::str::from_utf8(href.get(1)?.as_bytes()).ok()?;

    // Resolve site-relative hrefs against the page URL.
    let url = if href.starts_with('/') {
        Url::parse(base).ok()?.join(href).ok()?.to_string()
    } else {
        href.to_string()
    };

    // Remove a trailing ? and a trailing /.
    let mut candidate = url.as_str();
    if let Some(s) = candidate.strip_suffix('?') {
        candidate = s;
    }
    if let Some(s) = candidate.strip_suffix('/') {
        candidate = s;
    }

    // Discard canonical URLs that are just the front page.
    if FRONT_PAGE.is_match(candidate) {
        return None;
    }
    if candidate.trim().is_empty() {
        return None;
    }

    Some(decode_html_entities(normalizer.trim(candidate)).into_owned())
}
