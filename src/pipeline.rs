//! Per-release flow: tags → search plan → catalog search → per-candidate verdict.

use crate::catalog::{
    build_queries, parse_file_list, run_cascade, CatalogSearch, FileListParseError,
};
use crate::matching::{evaluate, match_candidate, MatchScore, MatchVerdict};
use crate::scan::{detect_metadata, Release};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum CandidateError {
    #[error("Torrent lookup failed: {0}")]
    Lookup(#[from] crate::catalog::CatalogError),
    #[error(transparent)]
    FileList(#[from] FileListParseError),
}

/// Verdict for one candidate torrent of a release
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateVerdict {
    pub torrent_id: u64,
    pub group_name: String,
    pub score: MatchScore,
    pub verdict: MatchVerdict,
}

/// Fetch, parse, score and evaluate one candidate torrent
pub async fn evaluate_candidate<S>(
    searcher: &S,
    release: &Release,
    torrent_id: u64,
    group_name: &str,
    music_threshold: f64,
) -> Result<CandidateVerdict, CandidateError>
where
    S: CatalogSearch + ?Sized,
{
    let details = searcher.torrent(torrent_id).await?;
    let files = parse_file_list(&details.file_list)?;
    let score = match_candidate(&files, release);
    let verdict = evaluate(&score, music_threshold);

    Ok(CandidateVerdict {
        torrent_id,
        group_name: group_name.to_string(),
        score,
        verdict,
    })
}

/// Search the catalog for a release and evaluate every candidate torrent.
///
/// A candidate that cannot be looked up or parsed is logged and skipped; the
/// rest of the release's candidates are still evaluated.
pub async fn evaluate_release<S>(
    searcher: &S,
    release: &Release,
    music_threshold: f64,
) -> Vec<CandidateVerdict>
where
    S: CatalogSearch + ?Sized,
{
    info!("***** Processing {:?} *****", release.directory_path);

    let metadata = detect_metadata(release);
    let steps = build_queries(&metadata, &release.simplified_name);
    let results = run_cascade(searcher, &steps).await;

    let mut verdicts = Vec::new();
    for group in &results {
        for torrent in &group.torrents {
            match evaluate_candidate(
                searcher,
                release,
                torrent.torrent_id,
                &group.group_name,
                music_threshold,
            )
            .await
            {
                Ok(verdict) => verdicts.push(verdict),
                Err(e) => warn!("Skipping torrent {}: {}", torrent.torrent_id, e),
            }
        }
    }

    verdicts
}
