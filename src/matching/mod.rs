// # Matching Module
//
// - **FileMatcher**: Size/name overlap between a candidate's files and a release
// - **Evaluator**: Turns overlap percentages into a Full/Partial/None verdict

mod evaluator;
mod file_matcher;

pub use evaluator::{evaluate, MatchVerdict};
pub use file_matcher::{
    local_file_size, match_candidate, overlap_pct, FilesystemAccessError, MatchScore,
};
