use crate::catalog::CandidateFileEntry;
use crate::scan::{is_audio_file, Release};
use std::collections::HashSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

/// Overlap between a candidate torrent and a local release, in percent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchScore {
    /// Candidate audio sizes found among local audio sizes
    pub audio_size_overlap_pct: f64,
    /// Candidate file sizes found among all local file sizes
    pub all_size_overlap_pct: f64,
    /// Candidate file names found among local file names
    pub name_overlap_pct: f64,
}

#[derive(Debug, Error)]
#[error("Cannot access {path:?}: {source}")]
pub struct FilesystemAccessError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Size of a local file, requiring it to be readable
pub fn local_file_size(path: &Path) -> Result<u64, FilesystemAccessError> {
    let to_error = |source| FilesystemAccessError {
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(to_error)?;
    Ok(file.metadata().map_err(to_error)?.len())
}

/// Sizes of the readable files among `paths`; the rest are left out
fn local_file_sizes(paths: &[PathBuf]) -> HashSet<u64> {
    paths
        .iter()
        .filter_map(|path| match local_file_size(path) {
            Ok(size) => Some(size),
            Err(e) => {
                debug!("Excluding from size set: {}", e);
                None
            }
        })
        .collect()
}

fn base_name(name: &str) -> &str {
    name.rsplit(['/', '\\']).next().unwrap_or(name)
}

fn local_file_names(paths: &[PathBuf]) -> HashSet<String> {
    paths
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect()
}

/// `100 * matches / total`, rounded to two decimals; 0 when `total` is 0
pub fn overlap_pct(matches: usize, total: usize) -> f64 {
    if total == 0 {
        error!("Failed calculating percentage: no candidate files to compare");
        return 0.0;
    }
    let pct = 100.0 * matches as f64 / total as f64;
    (pct * 100.0).round() / 100.0
}

/// Score a candidate's files against a release's local files.
///
/// Sizes and names are compared as sets: duplicates count once.
pub fn match_candidate(candidate: &[CandidateFileEntry], release: &Release) -> MatchScore {
    info!("⚖️ Matching {} candidate file(s) against {:?}", candidate.len(), release.directory_path);

    let candidate_audio_sizes: HashSet<u64> = candidate
        .iter()
        .filter(|f| is_audio_file(Path::new(&f.name)))
        .map(|f| f.size)
        .collect();
    let candidate_audio_count = candidate
        .iter()
        .filter(|f| is_audio_file(Path::new(&f.name)))
        .count();
    let candidate_sizes: HashSet<u64> = candidate.iter().map(|f| f.size).collect();
    let candidate_names: HashSet<&str> = candidate.iter().map(|f| base_name(&f.name)).collect();

    let local_audio_sizes = local_file_sizes(&release.audio_files);
    let local_sizes = local_file_sizes(&release.all_files);
    let local_names = local_file_names(&release.all_files);

    debug!("candidate_audio_sizes = {:?}", candidate_audio_sizes);
    debug!("local_audio_sizes = {:?}", local_audio_sizes);
    debug!("candidate_names = {:?}", candidate_names);
    debug!("local_names = {:?}", local_names);

    let audio_size_matches = candidate_audio_sizes.intersection(&local_audio_sizes).count();
    let size_matches = candidate_sizes.intersection(&local_sizes).count();
    let name_matches = candidate_names
        .iter()
        .filter(|name| local_names.contains(**name))
        .count();

    let score = MatchScore {
        audio_size_overlap_pct: overlap_pct(audio_size_matches, candidate_audio_count),
        all_size_overlap_pct: overlap_pct(size_matches, candidate.len()),
        name_overlap_pct: overlap_pct(name_matches, candidate.len()),
    };
    debug!("{:?}", score);
    score
}
