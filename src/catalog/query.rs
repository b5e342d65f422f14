use crate::catalog::client::{CatalogError, CatalogSearch};
use crate::catalog::models::SearchResult;
use crate::scan::ReleaseMetadata;
use std::fmt;
use tracing::{debug, info, warn};

/// Browse search fields. Unset fields are left out of the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub artist_name: Option<String>,
    pub group_name: Option<String>,
    pub search_str: Option<String>,
    pub year: Option<u32>,
    pub format: Option<String>,
}

impl SearchQuery {
    /// Check if at least one field is filled
    pub fn has_any_field(&self) -> bool {
        self.artist_name.is_some()
            || self.group_name.is_some()
            || self.search_str.is_some()
            || self.year.is_some()
            || self.format.is_some()
    }

    /// Request parameters for the filled fields
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(ref artist) = self.artist_name {
            params.push(("artistname", artist.clone()));
        }
        if let Some(ref album) = self.group_name {
            params.push(("groupname", album.clone()));
        }
        if let Some(ref search) = self.search_str {
            params.push(("searchstr", search.clone()));
        }
        if let Some(year) = self.year {
            params.push(("year", year.to_string()));
        }
        if let Some(ref format) = self.format {
            params.push(("format", format.clone()));
        }
        params
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    ArtistAlbum,
    Album,
    ArtistYear,
    FolderName,
}

impl fmt::Display for QueryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QueryKind::ArtistAlbum => "artist and album",
            QueryKind::Album => "album",
            QueryKind::ArtistYear => "artist and year",
            QueryKind::FolderName => "folder name",
        };
        f.write_str(label)
    }
}

/// When a step of the cascade runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPolicy {
    /// Runs regardless of earlier results
    Always,
    /// Runs only while no earlier step has produced results
    WhenNoResults,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryStep {
    pub kind: QueryKind,
    pub policy: RunPolicy,
    pub query: SearchQuery,
}

/// Build the ordered, progressively looser search plan for a release.
///
/// 1. artist + album + year + format (album known)
/// 2. album + year + format (album known), runs even if step 1 found results
/// 3. artist + year + format (artist and year known), only if nothing found yet
/// 4. simplified folder name + year + format, only if nothing found yet
pub fn build_queries(metadata: &ReleaseMetadata, simplified_name: &str) -> Vec<QueryStep> {
    let year = metadata.year;
    let format = metadata.audio_format.search_value().map(str::to_string);
    let mut steps = Vec::new();

    if let Some(ref album) = metadata.album {
        steps.push(QueryStep {
            kind: QueryKind::ArtistAlbum,
            policy: RunPolicy::Always,
            query: SearchQuery {
                artist_name: metadata.artist.clone(),
                group_name: Some(album.clone()),
                year,
                format: format.clone(),
                ..Default::default()
            },
        });
        steps.push(QueryStep {
            kind: QueryKind::Album,
            policy: RunPolicy::Always,
            query: SearchQuery {
                group_name: Some(album.clone()),
                year,
                format: format.clone(),
                ..Default::default()
            },
        });
    }

    if let (Some(artist), Some(_)) = (&metadata.artist, year) {
        steps.push(QueryStep {
            kind: QueryKind::ArtistYear,
            policy: RunPolicy::WhenNoResults,
            query: SearchQuery {
                artist_name: Some(artist.clone()),
                year,
                format: format.clone(),
                ..Default::default()
            },
        });
    }

    steps.push(QueryStep {
        kind: QueryKind::FolderName,
        policy: RunPolicy::WhenNoResults,
        query: SearchQuery {
            search_str: (!simplified_name.is_empty()).then(|| simplified_name.to_string()),
            year,
            format,
            ..Default::default()
        },
    });

    steps
}

/// Execute a search plan. Each executed step replaces the current results.
///
/// A failed search (non-success status or transport error) counts as zero
/// results and the cascade moves on.
pub async fn run_cascade<S>(searcher: &S, steps: &[QueryStep]) -> Vec<SearchResult>
where
    S: CatalogSearch + ?Sized,
{
    let mut results = Vec::new();

    for step in steps {
        if step.policy == RunPolicy::WhenNoResults && !results.is_empty() {
            debug!("Skipping search by {}: already have results", step.kind);
            continue;
        }
        if !step.query.has_any_field() {
            debug!("Skipping search by {}: no fields to search on", step.kind);
            continue;
        }

        info!("🔎 Searching by {}: {:?}", step.kind, step.query.params());
        results = match searcher.browse(&step.query).await {
            Ok(found) => found,
            Err(CatalogError::SearchStatus { status, message }) => {
                warn!("Search status: {} {:?}", status, message);
                Vec::new()
            }
            Err(e) => {
                warn!("Search by {} failed: {}", step.kind, e);
                Vec::new()
            }
        };
        info!("Search results: {}", results.len());
    }

    results
}
