use serde::Deserialize;

/// Envelope every catalog endpoint answers with
#[derive(Debug, Deserialize)]
pub(crate) struct ApiEnvelope {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub response: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<String>,
}

/// One page of a browse search
#[derive(Debug, Deserialize)]
pub(crate) struct BrowsePage {
    #[serde(default)]
    pub results: Vec<SearchResult>,
    #[serde(default)]
    pub pages: Option<u32>,
}

/// Torrent lookup response body
#[derive(Debug, Deserialize)]
pub(crate) struct TorrentLookup {
    pub torrent: TorrentDetails,
}

/// A release group returned by a browse search
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub group_id: u64,
    #[serde(default)]
    pub group_name: String,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub group_year: Option<u32>,
    #[serde(default)]
    pub torrents: Vec<TorrentSummary>,
}

/// One torrent (edition/encoding) inside a release group
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TorrentSummary {
    pub torrent_id: u64,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Full torrent description, including its delimited file listing
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TorrentDetails {
    pub id: u64,
    #[serde(default)]
    pub file_list: String,
    #[serde(default)]
    pub file_path: String,
}
