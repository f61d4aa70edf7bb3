use crate::UrlError;
use regex::RegexSet;

/// Matcher for URLs the crawler must never fetch or store
///
/// Three pattern classes are combined, mirroring the policy configuration:
/// consent/tracking page patterns (anchored behind `https?://`), media file
/// extensions matched as suffixes, and video listing patterns. The same
/// matcher is applied twice in the pipeline: to the submitted URL before any
/// network traffic, and to the canonical URL before storing.
#[derive(Debug)]
pub struct Blocklist {
    urls: RegexSet,
    media_extensions: Vec<String>,
    videos: RegexSet,
}

impl Blocklist {
    /// Compiles a blocklist from policy pattern tables
    ///
    /// # Arguments
    ///
    /// * `blocked_urls` - regex fragments matched against the URL after its
    ///   `https?://` prefix. An unescaped `.` matches any character, which
    ///   is harmless in host names and keeps `\w+` wildcards available.
    /// * `media_extensions` - literal suffixes such as `.jpg`
    /// * `video_urls` - full-URL patterns for video listing pages
    pub fn new(
        blocked_urls: &[String],
        media_extensions: &[String],
        video_urls: &[String],
    ) -> Result<Self, UrlError> {
        let anchored: Vec<String> = blocked_urls
            .iter()
            .map(|pat| format!("^https?://{}", pat))
            .collect();
        let urls = RegexSet::new(&anchored).map_err(|e| UrlError::Pattern(e.to_string()))?;

        let anchored_videos: Vec<String> =
            video_urls.iter().map(|pat| format!("^{}", pat)).collect();
        let videos =
            RegexSet::new(&anchored_videos).map_err(|e| UrlError::Pattern(e.to_string()))?;

        Ok(Self {
            urls,
            media_extensions: media_extensions.to_vec(),
            videos,
        })
    }

    /// Checks whether a URL is blocked
    pub fn is_blocked(&self, url: &str) -> bool {
        if self.urls.is_match(url) {
            return true;
        }
        if self
            .media_extensions
            .iter()
            .any(|ext| url.ends_with(ext.as_str()))
        {
            return true;
        }
        self.videos.is_match(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocklist() -> Blocklist {
        Blocklist::new(
            &[
                "www.youtube.com/".to_string(),
                "news.google.com/".to_string(),
                r"www.\w+.com.au/nocookies".to_string(),
            ],
            &[".jpg".to_string(), ".mp4".to_string()],
            &[r"https?://.*/videos?/.*".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_exact_host_entry() {
        let b = blocklist();
        assert!(b.is_blocked("https://www.youtube.com/watch?v=abc"));
        assert!(b.is_blocked("http://news.google.com/rss"));
    }

    #[test]
    fn test_wildcard_entry() {
        let b = blocklist();
        assert!(b.is_blocked("https://www.theage.com.au/nocookies"));
        assert!(b.is_blocked("http://www.smh.com.au/nocookies?from=x"));
    }

    #[test]
    fn test_match_is_anchored() {
        let b = blocklist();
        // The entry only matches from the start of the URL.
        assert!(!b.is_blocked("https://example.com/?to=www.youtube.com/"));
    }

    #[test]
    fn test_media_extension() {
        let b = blocklist();
        assert!(b.is_blocked("https://example.com/photo.jpg"));
        assert!(b.is_blocked("https://example.com/clip.mp4"));
        assert!(!b.is_blocked("https://example.com/story.html"));
    }

    #[test]
    fn test_video_listing() {
        let b = blocklist();
        assert!(b.is_blocked("https://example.com/videos/clip-1"));
        assert!(b.is_blocked("http://example.com/news/video/live"));
        assert!(!b.is_blocked("https://example.com/news/story-1"));
    }

    #[test]
    fn test_unblocked_url() {
        let b = blocklist();
        assert!(!b.is_blocked("https://example.com/news/story-1"));
    }

    #[test]
    fn test_empty_tables_block_nothing() {
        let b = Blocklist::new(&[], &[], &[]).unwrap();
        assert!(!b.is_blocked("https://www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_bad_pattern_rejected() {
        let result = Blocklist::new(&["(".to_string()], &[], &[]);
        assert!(result.is_err());
    }
}
