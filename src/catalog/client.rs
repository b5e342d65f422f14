use crate::catalog::models::{ApiEnvelope, BrowsePage, SearchResult, TorrentDetails, TorrentLookup};
use crate::catalog::query::SearchQuery;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use thiserror::Error;
use tracing::{debug, info, warn};

const USER_AGENT: &str = "release-matcher/0.1";

/// Browse pages fetched per search unless configured otherwise
pub const DEFAULT_MAX_PAGES: u32 = 10;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] ReqwestError),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Search status: {status} ({})", .message.as_deref().unwrap_or("no message"))]
    SearchStatus {
        status: String,
        message: Option<String>,
    },
    #[error("Torrent not found")]
    NotFound,
}

/// Remote catalog operations the matcher needs (allows mocking for tests)
#[async_trait::async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Run one browse search, all pages flattened
    async fn browse(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, CatalogError>;
    /// Look up one torrent, including its file listing
    async fn torrent(&self, torrent_id: u64) -> Result<TorrentDetails, CatalogError>;
}

/// Unwrap the catalog envelope, turning a non-success status into an error
pub(crate) fn unwrap_envelope(body: serde_json::Value) -> Result<serde_json::Value, CatalogError> {
    let envelope: ApiEnvelope = serde_json::from_value(body)?;
    match envelope.status.as_deref() {
        Some("success") => Ok(envelope.response.unwrap_or(serde_json::Value::Null)),
        other => Err(CatalogError::SearchStatus {
            status: other.unwrap_or("missing").to_string(),
            message: envelope.error,
        }),
    }
}

/// An authenticated catalog session.
///
/// Holds its own HTTP client and credentials; pass it to whatever needs to
/// search instead of sharing process-wide state.
#[derive(Clone)]
pub struct CatalogSession {
    client: Client,
    api_key: String,
    base_url: String,
    max_pages: u32,
}

impl CatalogSession {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Cap the number of browse pages fetched for one search (at least 1)
    pub fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    async fn request(&self, params: &[(&str, String)]) -> Result<serde_json::Value, CatalogError> {
        let url = format!("{}/ajax.php", self.base_url);
        debug!("Catalog request: {} {:?}", url, params);

        let response = self
            .client
            .get(&url)
            .query(params)
            .header("Authorization", &self.api_key)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound);
        }

        let body: serde_json::Value = response.error_for_status()?.json().await?;
        unwrap_envelope(body)
    }

    async fn browse_page(
        &self,
        query: &SearchQuery,
        page: u32,
    ) -> Result<BrowsePage, CatalogError> {
        let mut params = vec![("action", "browse".to_string())];
        params.extend(query.params());
        if page > 1 {
            params.push(("page", page.to_string()));
        }

        let response = self.request(&params).await?;
        Ok(serde_json::from_value(response)?)
    }
}

#[async_trait::async_trait]
impl CatalogSearch for CatalogSession {
    async fn browse(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, CatalogError> {
        let first = self.browse_page(query, 1).await?;
        let total_pages = first.pages.unwrap_or(1);
        let pages = total_pages.min(self.max_pages);
        if pages < total_pages {
            info!("Fetching {} of {} result pages", pages, total_pages);
        }
        let mut results = first.results;

        for page in 2..=pages {
            debug!("Fetching results page {}/{}", page, pages);
            match self.browse_page(query, page).await {
                Ok(next) => results.extend(next.results),
                Err(e) => {
                    warn!(
                        "Results page {}/{} failed, keeping {} result(s) so far: {}",
                        page,
                        pages,
                        results.len(),
                        e
                    );
                    break;
                }
            }
        }

        Ok(results)
    }

    async fn torrent(&self, torrent_id: u64) -> Result<TorrentDetails, CatalogError> {
        info!("Getting torrent by id: {}", torrent_id);
        let params = [
            ("action", "torrent".to_string()),
            ("id", torrent_id.to_string()),
        ];
        let response = self.request(&params).await?;
        let lookup: TorrentLookup = serde_json::from_value(response)?;
        Ok(lookup.torrent)
    }
}
