//! Core library for generating theme catalog JSON from video production
//! metadata using ffmpeg and ffprobe.
//!
//! This crate parses the marker comment grammar embedded in XMP metadata
//! sidecars, classifies each video as a theme preview or a clip, extracts
//! poster frames, and assembles (or extends) a catalog consumed by a
//! downstream media player.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use themegen_core::{CoreConfig, process_videos};
//! use themegen_core::external::{CrateFfprobeExecutor, FfmpegPosterExtractor};
//! use themegen_core::sidecar::XmpSidecarReader;
//!
//! let mut config = CoreConfig::new("./assets/media/my-theme/");
//! config.append_mode = false;
//! config.validate().unwrap();
//!
//! let files = themegen_core::find_processable_files("/path/to/videos".as_ref()).unwrap();
//!
//! let report = process_videos(
//!     &FfmpegPosterExtractor::new(),
//!     &CrateFfprobeExecutor::new(),
//!     &XmpSidecarReader,
//!     &config,
//!     &files,
//!     &mut |done, total| println!("{done}/{total}"),
//! ).unwrap();
//! ```

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod external;
pub mod filename;
pub mod marker;
pub mod processing;
pub mod sidecar;

// Re-exports for public API
pub use catalog::{Catalog, Clip, Theme, UNRESOLVED_THEME_ID, generate_theme_id};
pub use config::CoreConfig;
pub use discovery::find_processable_files;
pub use error::{CoreError, CoreResult};
pub use external::{
    CrateFfprobeExecutor, FfmpegPosterExtractor, MediaInfo, MediaProber, PosterExtractor,
    PosterRequest, check_dependency,
};
pub use filename::{ParsedFilename, parse_clip_filename};
pub use marker::{InputField, MarkerConfig, parse_marker};
pub use processing::process_videos;
pub use sidecar::{SidecarMetadata, SidecarReader, XmpSidecarReader};

use std::path::PathBuf;

/// How a single input file fared within a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    /// The file was the theme preview and produced the theme record.
    ThemeCreated,
    /// The file was added to the catalog as a new clip.
    ClipAdded,
    /// The file was skipped (duplicate clip id, or theme preview while a
    /// loaded theme already exists). A status note, not an error.
    Skipped,
    /// A per-file recoverable failure; the batch continued.
    Failed,
}

/// Per-file outcome of a batch run.
#[derive(Debug, Clone)]
pub struct FileOutcome {
    pub filename: String,
    pub status: FileStatus,
    pub detail: String,
}

/// Result of one batch run, returned by [`process_videos`] on a successful
/// finalize.
#[derive(Debug, Clone)]
pub struct BatchReport {
    /// The catalog as written to disk.
    pub catalog: Catalog,
    /// Where the catalog was written.
    pub catalog_path: PathBuf,
    /// One entry per input file, in batch order.
    pub outcomes: Vec<FileOutcome>,
    /// Batch-level status notes (append-mode fallbacks and the like).
    pub notes: Vec<String>,
    /// Clips added in this run (excludes clips loaded from an existing
    /// catalog).
    pub new_clips: usize,
    /// Whether an existing catalog was extended rather than created fresh.
    pub appended: bool,
}

impl BatchReport {
    /// Per-file recoverable errors recorded during the run.
    pub fn errors(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == FileStatus::Failed)
    }

    /// Skip notes recorded during the run.
    pub fn skips(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|o| o.status == FileStatus::Skipped)
    }

    /// Total number of clips in the written catalog.
    #[must_use]
    pub fn total_clips(&self) -> usize {
        self.catalog.clips.len()
    }
}
