//! Lazy folder scanner that groups a directory tree into releases.
//!
//! A directory is a release boundary when:
//! 1. It is not itself a disc subfolder (`CD1`, `Disc 2`, ...), and
//! 2. It has no subdirectories (flat release), or at least one of its
//!    subdirectories is a disc subfolder (multi-disc release, pooled).
//!
//! Directories with only non-disc subdirectories are containers: they are
//! skipped and the walk continues into them.

use crate::scan::name_cleaner::simplify_album;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub const AUDIO_EXTENSIONS: &[&str] = &["flac", "mp3", "aac", "ac3", "dts"];

/// `cd`/`disc`/`disk`, optional separator, 1-2 digits, with no alphanumeric
/// character directly before or after.
static DISC_SUBFOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:^|[^A-Za-z0-9])(?:cd|disc|disk)[-_ ]?\d{1,2}(?:$|[^A-Za-z0-9])").unwrap()
});

/// A local directory judged to hold one musical work
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    /// Release root, identity key
    pub directory_path: PathBuf,
    /// Folder name run through [`simplify_album`], used as a search fallback
    pub simplified_name: String,
    /// Audio tracks under the release root (recursive), never empty
    pub audio_files: Vec<PathBuf>,
    /// Every file under the release root (recursive)
    pub all_files: Vec<PathBuf>,
}

/// Check if a file is an audio file based on extension
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Check if a folder name denotes one disc of a multi-disc release
pub fn is_disc_subfolder(name: &str) -> bool {
    DISC_SUBFOLDER.is_match(name)
}

fn leaf_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Names of the immediate subdirectories of `dir`
fn subdirectory_names(dir: &Path) -> Result<Vec<String>, std::io::Error> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)?.flatten() {
        if entry.path().is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Every file under `dir`, recursively, in file-name order
pub fn collect_all_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable entry under {:?}: {}", dir, e);
                None
            }
        })
        .filter(|entry| {
            entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
        })
        .map(|entry| entry.into_path())
        .collect()
}

/// Build a release for `dir` if it is a release boundary with audio in it
fn release_at(dir: &Path) -> Option<Release> {
    let name = leaf_name(dir);
    if is_disc_subfolder(&name) {
        debug!("{:?} is a disc subfolder, skipping individual processing", dir);
        return None;
    }

    let subdirs = match subdirectory_names(dir) {
        Ok(subdirs) => subdirs,
        Err(e) => {
            warn!("Failed to read dir {:?}: {}", dir, e);
            return None;
        }
    };

    let disc_subfolders: Vec<&String> = subdirs.iter().filter(|s| is_disc_subfolder(s)).collect();
    if !subdirs.is_empty() && disc_subfolders.is_empty() {
        debug!(
            "{:?} has subfolders that aren't disc subfolders, skipping individual processing",
            dir
        );
        return None;
    }
    debug!(
        "{:?} is a leaf or has disc subfolders: {:?}",
        dir, disc_subfolders
    );

    let all_files = collect_all_files(dir);
    let audio_files: Vec<PathBuf> = all_files
        .iter()
        .filter(|p| is_audio_file(p))
        .cloned()
        .collect();

    if audio_files.is_empty() {
        debug!("No audio files in {:?}", dir);
        return None;
    }

    info!("🎵 Found release {:?} ({} audio file(s))", dir, audio_files.len());

    Some(Release {
        directory_path: dir.to_path_buf(),
        simplified_name: simplify_album(&name),
        audio_files,
        all_files,
    })
}

/// Lazy, forward-only sequence of releases under a root directory.
///
/// Pre-order walk; each call to [`discover_releases`] starts a fresh walk.
pub struct ReleaseIter {
    walker: walkdir::IntoIter,
}

impl Iterator for ReleaseIter {
    type Item = Release;

    fn next(&mut self) -> Option<Release> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to walk entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_dir() {
                continue;
            }

            if let Some(release) = release_at(entry.path()) {
                return Some(release);
            }
        }
    }
}

/// Walk `root` and yield every release found beneath it (root included)
pub fn discover_releases(root: impl AsRef<Path>) -> ReleaseIter {
    let root = root.as_ref();
    info!("📁 Scanning for releases in: {:?}", root);

    ReleaseIter {
        walker: WalkDir::new(root).sort_by_file_name().into_iter(),
    }
}
