//! Album/artist string cleanup.
//!
//! Two separate transforms:
//! - [`simplify_album`] strips quality/source/disc markers and is used for
//!   display, comparison and the folder-name search fallback.
//! - [`search_term`] replaces symbols with spaces so a catalog search does not
//!   miss on literal punctuation. Only applied to values sent to the catalog.

use regex::Regex;
use std::sync::LazyLock;

/// `(FLAC)`, `[CD1]`, `(2011 Remaster)`, `[Label 123-456]`
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").unwrap());

/// `CD1`, `Disc 2`, `disk 3`
static DISC_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:cd|disc|disk)\s?\d+\b").unwrap());

const STRAY_BRACKETS: &[char] = &['(', ')', '[', ']'];

/// Clean an album title (or folder name) for search and comparison.
///
/// Removes bracketed segments and disc markers, then stray brackets and
/// standalone hyphens, collapsing whitespace. Runs to a fixed point so
/// `simplify_album(simplify_album(x)) == simplify_album(x)`.
pub fn simplify_album(text: &str) -> String {
    let mut current = simplify_once(text);
    loop {
        let next = simplify_once(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

fn simplify_once(text: &str) -> String {
    let without_groups = BRACKETED.replace_all(text, " ");
    let without_discs = DISC_MARKER.replace_all(&without_groups, " ");
    let without_brackets = without_discs.replace(STRAY_BRACKETS, " ");

    without_brackets
        .split_whitespace()
        .map(|token| token.trim_matches('-'))
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Replace every non-alphanumeric character with a space.
pub fn search_term(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect()
}
