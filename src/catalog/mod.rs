// # Catalog Module
//
// Remote side of release matching:
//
// - **Query**: Builds the progressively looser search plan and runs it
// - **Client**: Explicit catalog session (HTTP) behind the `CatalogSearch` trait
// - **FileList**: Parses a candidate torrent's delimited file listing

mod client;
mod file_list;
mod models;
mod query;

pub use client::{CatalogError, CatalogSearch, CatalogSession, DEFAULT_MAX_PAGES};
pub use file_list::{parse_file_list, CandidateFileEntry, FileListParseError};
pub use models::{SearchResult, TorrentDetails, TorrentSummary};
pub use query::{build_queries, run_cascade, QueryKind, QueryStep, RunPolicy, SearchQuery};
