//! Per-track tag access behind one interface.
//!
//! MP3 files are read with `id3`; everything else goes through symphonia's
//! probe, which also reports the codec so FLAC can be recognised by MIME type.

use id3::TagLike;
use std::fs::File;
use std::path::Path;
use symphonia::core::codecs::{CodecType, CODEC_TYPE_AAC, CODEC_TYPE_FLAC, CODEC_TYPE_MP3};
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::{MetadataOptions, MetadataRevision, StandardTagKey};
use symphonia::core::probe::Hint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TagReadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("ID3 error: {0}")]
    Id3(#[from] id3::Error),
    #[error("Failed to probe audio file: {0}")]
    Probe(#[from] symphonia::core::errors::Error),
}

/// The tag fields release detection cares about
pub trait TagReader {
    fn artist(&self) -> Option<&str>;
    fn album_artist(&self) -> Option<&str>;
    fn album(&self) -> Option<&str>;
    fn date(&self) -> Option<&str>;
    /// MIME type of the audio stream, when the reader can tell
    fn mime(&self) -> Option<&str>;
}

/// Tags read from an MP3's ID3 header
#[derive(Debug, Clone)]
pub struct Id3Tags {
    tag: id3::Tag,
}

/// First value of a possibly multi-valued (NUL separated) ID3 text frame
fn first_value(text: &str) -> Option<&str> {
    text.split('\0').next().filter(|s| !s.trim().is_empty())
}

impl Id3Tags {
    pub fn read(path: &Path) -> Result<Self, TagReadError> {
        match id3::Tag::read_from_path(path) {
            Ok(tag) => Ok(Self { tag }),
            Err(id3::Error {
                kind: id3::ErrorKind::NoTag,
                ..
            }) => Ok(Self {
                tag: id3::Tag::new(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

impl From<id3::Tag> for Id3Tags {
    fn from(tag: id3::Tag) -> Self {
        Self { tag }
    }
}

impl TagReader for Id3Tags {
    fn artist(&self) -> Option<&str> {
        self.tag.artist().and_then(first_value)
    }

    fn album_artist(&self) -> Option<&str> {
        self.tag.album_artist().and_then(first_value)
    }

    fn album(&self) -> Option<&str> {
        self.tag.album().and_then(first_value)
    }

    fn date(&self) -> Option<&str> {
        // TDRC (v2.4 recording time) falls back to TYER (v2.3 year)
        ["TDRC", "TYER"]
            .iter()
            .filter_map(|id| self.tag.get(*id))
            .find_map(|frame| frame.content().text())
            .and_then(first_value)
    }

    fn mime(&self) -> Option<&str> {
        None
    }
}

/// Tags read through symphonia's container probe
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenericTags {
    pub artist: Option<String>,
    pub album_artist: Option<String>,
    pub album: Option<String>,
    pub date: Option<String>,
    pub mime: Option<String>,
}

fn set_if_empty(target: &mut Option<String>, value: &str) {
    let trimmed = value.trim();
    if target.is_none() && !trimmed.is_empty() {
        *target = Some(trimmed.to_string());
    }
}

fn mime_for_codec(codec: CodecType) -> Option<&'static str> {
    match codec {
        CODEC_TYPE_FLAC => Some("audio/flac"),
        CODEC_TYPE_MP3 => Some("audio/mpeg"),
        CODEC_TYPE_AAC => Some("audio/aac"),
        _ => None,
    }
}

impl GenericTags {
    pub fn read(path: &Path) -> Result<Self, TagReadError> {
        let file = File::open(path)?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());
        let mut hint = Hint::new();
        if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
            hint.with_extension(extension);
        }

        let mut probed = symphonia::default::get_probe().format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )?;

        let mut tags = GenericTags {
            mime: probed
                .format
                .default_track()
                .and_then(|track| mime_for_codec(track.codec_params.codec))
                .map(str::to_string),
            ..Default::default()
        };

        if let Some(probe_meta) = probed.metadata.get() {
            if let Some(revision) = probe_meta.current() {
                tags.apply_revision(revision);
            }
        }

        while !probed.format.metadata().is_latest() {
            let _ = probed.format.metadata().pop();
        }
        if let Some(revision) = probed.format.metadata().current() {
            tags.apply_revision(revision);
        }

        Ok(tags)
    }

    fn apply_revision(&mut self, revision: &MetadataRevision) {
        for tag in revision.tags() {
            let value = tag.value.to_string();
            match tag.std_key {
                Some(StandardTagKey::Artist) => set_if_empty(&mut self.artist, &value),
                Some(StandardTagKey::AlbumArtist) => set_if_empty(&mut self.album_artist, &value),
                Some(StandardTagKey::Album) => set_if_empty(&mut self.album, &value),
                Some(StandardTagKey::Date)
                | Some(StandardTagKey::ReleaseDate)
                | Some(StandardTagKey::OriginalDate) => set_if_empty(&mut self.date, &value),
                _ => match tag.key.trim().to_ascii_uppercase().as_str() {
                    "ALBUMARTIST" | "ALBUM_ARTIST" | "ALBUM ARTIST" => {
                        set_if_empty(&mut self.album_artist, &value)
                    }
                    "DATE" | "YEAR" => set_if_empty(&mut self.date, &value),
                    _ => {}
                },
            }
        }
    }
}

impl TagReader for GenericTags {
    fn artist(&self) -> Option<&str> {
        self.artist.as_deref()
    }

    fn album_artist(&self) -> Option<&str> {
        self.album_artist.as_deref()
    }

    fn album(&self) -> Option<&str> {
        self.album.as_deref()
    }

    fn date(&self) -> Option<&str> {
        self.date.as_deref()
    }

    fn mime(&self) -> Option<&str> {
        self.mime.as_deref()
    }
}

/// Check if a track should be read with the MP3 reader
pub fn is_mp3(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("mp3"))
        .unwrap_or(false)
}

/// Read a track's tags with the reader matching its extension
pub fn read_tags(path: &Path) -> Result<Box<dyn TagReader>, TagReadError> {
    if is_mp3(path) {
        Ok(Box::new(Id3Tags::read(path)?))
    } else {
        Ok(Box::new(GenericTags::read(path)?))
    }
}
