// # Scan Module
//
// Local side of release matching:
//
// - **FolderScanner**: Walks a directory tree and groups it into releases
// - **NameCleaner**: Strips quality/disc markers from album and folder names
// - **TagReader**: MP3 (id3) and generic (symphonia) tag access behind one trait
// - **MetadataDetector**: Folds track tags into one artist/album/year/format guess

mod folder_scanner;
mod metadata_detector;
mod name_cleaner;
mod tag_reader;

pub use folder_scanner::{
    collect_all_files, discover_releases, is_audio_file, is_disc_subfolder, Release, ReleaseIter,
    AUDIO_EXTENSIONS,
};
pub use metadata_detector::{
    detect_metadata, parse_year, AudioFormat, DateParseError, MetadataAccumulator,
    ReleaseMetadata,
};
pub use name_cleaner::{search_term, simplify_album};
pub use tag_reader::{is_mp3, read_tags, GenericTags, Id3Tags, TagReadError, TagReader};
