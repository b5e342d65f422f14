use release_matcher::catalog::{
    CatalogError, CatalogSearch, SearchQuery, SearchResult, TorrentDetails, TorrentSummary,
};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Mock catalog for testing
///
/// Answers browse calls from a queue (empty queue = no results) and torrent
/// lookups from a map. Records every browse query it receives.
#[derive(Default)]
pub struct MockCatalog {
    browse_responses: Mutex<VecDeque<Result<Vec<SearchResult>, String>>>,
    torrents: HashMap<u64, TorrentDetails>,
    queries: Mutex<Vec<SearchQuery>>,
}

impl MockCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the results of the next browse call
    pub fn with_results(self, results: Vec<SearchResult>) -> Self {
        self.browse_responses.lock().unwrap().push_back(Ok(results));
        self
    }

    /// Queue a non-success status for the next browse call
    pub fn with_failed_search(self, status: &str) -> Self {
        self.browse_responses
            .lock()
            .unwrap()
            .push_back(Err(status.to_string()));
        self
    }

    pub fn with_torrent(mut self, id: u64, file_list: &str) -> Self {
        self.torrents.insert(
            id,
            TorrentDetails {
                id,
                file_list: file_list.to_string(),
                file_path: format!("torrent-{id}"),
            },
        );
        self
    }

    /// Browse queries received so far, in order
    pub fn queries(&self) -> Vec<SearchQuery> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CatalogSearch for MockCatalog {
    async fn browse(&self, query: &SearchQuery) -> Result<Vec<SearchResult>, CatalogError> {
        self.queries.lock().unwrap().push(query.clone());
        match self.browse_responses.lock().unwrap().pop_front() {
            Some(Ok(results)) => Ok(results),
            Some(Err(status)) => Err(CatalogError::SearchStatus {
                status,
                message: None,
            }),
            None => Ok(Vec::new()),
        }
    }

    async fn torrent(&self, torrent_id: u64) -> Result<TorrentDetails, CatalogError> {
        self.torrents
            .get(&torrent_id)
            .cloned()
            .ok_or(CatalogError::NotFound)
    }
}

/// A release group with one torrent per id
pub fn group(group_id: u64, name: &str, torrent_ids: &[u64]) -> SearchResult {
    SearchResult {
        group_id,
        group_name: name.to_string(),
        artist: None,
        group_year: None,
        torrents: torrent_ids
            .iter()
            .map(|&torrent_id| TorrentSummary {
                torrent_id,
                format: Some("FLAC".to_string()),
                encoding: Some("Lossless".to_string()),
                size: None,
            })
            .collect(),
    }
}
