use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::store::record::redirect_record;

/// Errors from the article store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid store base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Store rejected record: {0}")]
    Rejected(String),

    #[error("Unexpected store status: {0}")]
    UnexpectedStatus(StatusCode),

    #[error("Store response missing Result header")]
    MissingResult,
}

/// Outcome of a conditional store write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutResult {
    /// The store added the record under this key
    New,
    /// The store already held a record under this key
    Existing,
}

/// HTTP client for the article store
///
/// Keys are article URLs, percent-encoded into the request path. All writes
/// use `Mode: add`, so the store keeps the first record written for a key
/// and reports later writes as existing. The client keeps its own
/// connection pool so slow article fetches never starve store lookups, and
/// sets no request timeout; the store is assumed to be a fast local
/// service.
#[derive(Debug, Clone)]
pub struct ArticleStore {
    http: Client,
    base: String,
}

impl ArticleStore {
    /// Creates a store client for the given base URL
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Url::parse(base_url)
            .map_err(|e| StoreError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Checks whether the store already has a record for `url`
    pub async fn exists(&self, url: &str) -> Result<bool, StoreError> {
        let response = self.http.head(self.entry_url(url)).send().await?;
        match response.status() {
            StatusCode::OK | StatusCode::NO_CONTENT => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(StoreError::UnexpectedStatus(status)),
        }
    }

    /// Conditionally writes a record
    ///
    /// # Arguments
    ///
    /// * `url` - key for the record
    /// * `version` - record version, seconds since the epoch
    /// * `content` - record body
    ///
    /// # Returns
    ///
    /// * `Ok(PutResult)` - whether the store added the record or already
    ///   had one under this key
    /// * `Err(StoreError)` - transport failure or store rejection
    pub async fn put(
        &self,
        url: &str,
        version: i64,
        content: Vec<u8>,
    ) -> Result<PutResult, StoreError> {
        debug!("Store put {} ({} bytes)", url, content.len());
        let response = self
            .http
            .put(self.entry_url(url))
            .header("Version", version.to_string())
            .header("Mode", "add")
            .body(content)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let reason = response.text().await.unwrap_or_default();
            return Err(StoreError::Rejected(reason));
        }
        if !status.is_success() {
            return Err(StoreError::UnexpectedStatus(status));
        }

        match response
            .headers()
            .get("Result")
            .and_then(|value| value.to_str().ok())
        {
            Some("new") => Ok(PutResult::New),
            Some(_) => Ok(PutResult::Existing),
            None => Err(StoreError::MissingResult),
        }
    }

    /// Writes a redirect record pointing `url` at `target`
    ///
    /// The record is written at version 0 so that an article stored later
    /// under the same key always wins over the marker.
    pub async fn put_redirect(&self, url: &str, target: &str) -> Result<PutResult, StoreError> {
        self.put(url, 0, redirect_record(target)).await
    }

    fn entry_url(&self, url: &str) -> String {
        format!("{}/{}", self.base, urlencoding::encode(url))
    }
}
