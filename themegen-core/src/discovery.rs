//! File discovery module for finding video files to process.
//!
//! Scans the top level of a directory for .mp4 files (case-insensitive).
//! Subdirectories are not searched; each video's metadata sidecar is expected
//! to live next to it.

use crate::error::{CoreError, CoreResult};

use std::path::{Path, PathBuf};

/// Finds video files eligible for processing in the specified directory.
///
/// Returns the discovered .mp4 paths sorted by file name so that batch order
/// is deterministic. Returns [`CoreError::NoFilesFound`] when the directory
/// contains no matching files.
pub fn find_processable_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = std::fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext_str| ext_str.eq_ignore_ascii_case("mp4"))
                .map(|_| path.clone())
        })
        .collect();

    files.sort();

    if files.is_empty() {
        Err(CoreError::NoFilesFound)
    } else {
        Ok(files)
    }
}
