#![allow(dead_code)]

pub mod flac;
pub mod mock_catalog;

pub use flac::write_tagged_flac;
pub use mock_catalog::{group, MockCatalog};

use std::fs;
use std::path::{Path, PathBuf};

/// Initialize tracing for tests with proper test output handling
pub fn tracing_init() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Create `relative` under `root` (parents included) filled with `size` bytes
pub fn write_file(root: &Path, relative: &str, size: usize) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, vec![0u8; size]).unwrap();
    path
}
