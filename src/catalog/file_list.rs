//! Parser for the catalog's delimited torrent file listing.
//!
//! Wire format: `NAME{{{SIZE}}}` entries joined by `|||`. Names are
//! HTML-escaped, and some listings carry a broken ` &Atilde{{{` artifact in
//! place of the opening delimiter.

use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

const ENTRY_SEPARATOR: &str = "|||";
const SIZE_OPEN: &str = "{{{";
const SIZE_CLOSE: &str = "}}}";

static ATILDE_ARTIFACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *&Atilde\{\{\{").unwrap());

// Entities browsers accept without the closing semicolon
static BARE_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(amp|lt|gt|quot|AMP|LT|GT|QUOT|#[0-9]+|#[xX][0-9a-fA-F]+)(;?)").unwrap()
});

/// HTML-unescape a file name, including semicolon-less entities such as `&amp`
fn unescape_name(name: &str) -> String {
    let terminated = BARE_ENTITY.replace_all(name, |caps: &regex::Captures| {
        format!("&{};", &caps[1])
    });
    html_escape::decode_html_entities(&terminated).into_owned()
}

/// One file of a candidate torrent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFileEntry {
    pub name: String,
    pub size: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FileListParseError {
    #[error("Malformed file list entry: '{0}'")]
    MalformedEntry(String),
    #[error("Invalid file size in file list entry: '{0}'")]
    InvalidSize(String),
}

fn parse_entry(raw: &str) -> Result<CandidateFileEntry, FileListParseError> {
    let entry = ATILDE_ARTIFACT.replace_all(raw, SIZE_OPEN);

    let (name, sized) = entry
        .split_once(SIZE_OPEN)
        .ok_or_else(|| FileListParseError::MalformedEntry(raw.to_string()))?;
    if sized.contains(SIZE_OPEN) {
        return Err(FileListParseError::MalformedEntry(raw.to_string()));
    }

    let size = sized
        .strip_suffix(SIZE_CLOSE)
        .ok_or_else(|| FileListParseError::MalformedEntry(raw.to_string()))?;
    let size = size
        .parse::<u64>()
        .map_err(|_| FileListParseError::InvalidSize(raw.to_string()))?;

    Ok(CandidateFileEntry {
        name: unescape_name(name),
        size,
    })
}

/// Parse a whole file listing. An empty listing has no entries.
pub fn parse_file_list(file_list: &str) -> Result<Vec<CandidateFileEntry>, FileListParseError> {
    if file_list.trim().is_empty() {
        return Ok(Vec::new());
    }

    file_list.split(ENTRY_SEPARATOR).map(parse_entry).collect()
}
