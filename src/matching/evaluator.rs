use crate::matching::file_matcher::MatchScore;
use std::fmt;
use tracing::info;

/// Outcome of comparing one candidate with a local release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchVerdict {
    /// Every size and name overlaps
    Full,
    /// Audio sizes overlap at least as much as the configured threshold
    Partial,
    None,
}

impl MatchVerdict {
    /// Label of the action bucket for this verdict, if any
    pub fn label(&self) -> Option<&'static str> {
        match self {
            MatchVerdict::Full => Some("full"),
            MatchVerdict::Partial => Some("partial"),
            MatchVerdict::None => None,
        }
    }
}

impl fmt::Display for MatchVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label().unwrap_or("none"))
    }
}

/// Turn a score into a verdict. `music_threshold` is a percentage (0-100).
pub fn evaluate(score: &MatchScore, music_threshold: f64) -> MatchVerdict {
    let verdict = if score.audio_size_overlap_pct == 100.0
        && score.all_size_overlap_pct == 100.0
        && score.name_overlap_pct == 100.0
    {
        MatchVerdict::Full
    } else if score.audio_size_overlap_pct >= music_threshold {
        MatchVerdict::Partial
    } else {
        MatchVerdict::None
    };

    info!("Match evaluation = {}", verdict);
    verdict
}
