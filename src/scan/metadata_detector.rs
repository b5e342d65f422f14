use crate::scan::folder_scanner::Release;
use crate::scan::name_cleaner::{search_term, simplify_album};
use crate::scan::tag_reader::{is_mp3, read_tags, TagReader};
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, error, info, warn};

static YEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{4}").unwrap());

/// Only this many leading characters of a date tag are considered
const DATE_PREFIX_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AudioFormat {
    Mp3,
    Flac,
    #[default]
    Unknown,
}

impl AudioFormat {
    /// Value for the catalog's `format` search field
    pub fn search_value(&self) -> Option<&'static str> {
        match self {
            AudioFormat::Mp3 => Some("MP3"),
            AudioFormat::Flac => Some("FLAC"),
            AudioFormat::Unknown => None,
        }
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.search_value().unwrap_or("unknown"))
    }
}

/// Best-effort summary of a release, derived from its tracks' tags
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ReleaseMetadata {
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<u32>,
    pub audio_format: AudioFormat,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("No year found in date tag '{0}'")]
pub struct DateParseError(pub String);

/// Parse the year out of a date tag (`2001`, `2001-05`, `2001-05-12`, `05/2001`)
pub fn parse_year(date: &str) -> Result<u32, DateParseError> {
    let prefix: String = date.chars().take(DATE_PREFIX_LEN).collect();
    YEAR.find(&prefix)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .ok_or_else(|| DateParseError(date.to_string()))
}

/// Folds per-track observations into a [`ReleaseMetadata`].
///
/// - artist: most frequent value, ties go to the first seen
/// - album: first track carrying one, simplified
/// - year: first track whose date parses
/// - format: last track whose format could be determined
#[derive(Debug, Default)]
pub struct MetadataAccumulator {
    artists: Vec<(String, usize)>,
    album: Option<String>,
    year: Option<u32>,
    audio_format: AudioFormat,
}

impl MetadataAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one track. `tags` is `None` when the track's tags could not be read.
    pub fn observe_track(&mut self, path: &Path, tags: Option<&dyn TagReader>) {
        if is_mp3(path) {
            self.audio_format = AudioFormat::Mp3;
        } else if tags
            .and_then(|t| t.mime())
            .is_some_and(|mime| mime.contains("audio/flac"))
        {
            debug!("audio/flac found in mime type");
            self.audio_format = AudioFormat::Flac;
        }

        let Some(tags) = tags else {
            return;
        };

        if let Some(artist) = tags.album_artist().or_else(|| tags.artist()) {
            self.add_artist(artist);
        }

        if self.album.is_none() {
            if let Some(album) = tags.album() {
                let simplified = simplify_album(album);
                if !simplified.is_empty() {
                    debug!("Found album title: {}", simplified);
                    self.album = Some(simplified);
                }
            }
        }

        if self.year.is_none() {
            if let Some(date) = tags.date() {
                match parse_year(date) {
                    Ok(year) => {
                        debug!("Found year: {}", year);
                        self.year = Some(year);
                    }
                    Err(e) => error!("Error parsing year from {:?}: {}", path, e),
                }
            }
        }
    }

    fn add_artist(&mut self, artist: &str) {
        let artist = artist.trim();
        if artist.is_empty() {
            return;
        }
        match self.artists.iter_mut().find(|(name, _)| name == artist) {
            Some((_, count)) => *count += 1,
            None => self.artists.push((artist.to_string(), 1)),
        }
    }

    fn most_common_artist(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for candidate in &self.artists {
            if best.map_or(true, |b| candidate.1 > b.1) {
                best = Some(candidate);
            }
        }
        best.map(|(name, count)| {
            debug!("{} with a count of {}", name, count);
            name.as_str()
        })
    }

    /// Finalize, making artist and album search-safe
    pub fn finish(self) -> ReleaseMetadata {
        ReleaseMetadata {
            artist: self.most_common_artist().map(search_term),
            album: self.album.as_deref().map(search_term),
            year: self.year,
            audio_format: self.audio_format,
        }
    }
}

/// Derive release metadata by reading the tags of every audio track.
///
/// Unreadable tracks are logged and skipped.
pub fn detect_metadata(release: &Release) -> ReleaseMetadata {
    info!("🏷️ Reading tags for release {:?}", release.directory_path);

    let mut accumulator = MetadataAccumulator::new();
    for audio_path in &release.audio_files {
        debug!("Checking {:?}", audio_path.file_name());
        match read_tags(audio_path) {
            Ok(tags) => accumulator.observe_track(audio_path, Some(tags.as_ref())),
            Err(e) => {
                warn!("Failed to get tags for {:?}: {}", audio_path, e);
                accumulator.observe_track(audio_path, None);
            }
        }
    }

    let metadata = accumulator.finish();
    info!("   → Artist: {:?}", metadata.artist);
    info!("   → Album: {:?}", metadata.album);
    info!("   → Year: {:?}", metadata.year);
    info!("   → Format: {}", metadata.audio_format);
    metadata
}
