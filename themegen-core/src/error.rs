//! Error types for the themegen-core library.

use std::process::ExitStatus;
use thiserror::Error;

/// Custom error types for themegen-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No processable video files found")]
    NoFilesFound,

    #[error("Path error: {0}")]
    PathError(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Marker syntax error: {0}")]
    MarkerSyntax(String),

    #[error("Sidecar metadata error: {0}")]
    SidecarParse(String),

    #[error("Catalog file error: {0}")]
    CatalogParse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("External command '{cmd}' failed to start: {source}")]
    CommandStart {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("External command '{cmd}' failed ({status}): {stderr}")]
    CommandFailed {
        cmd: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("External command '{cmd}' failed while waiting: {source}")]
    CommandWait {
        cmd: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Required dependency not found: {0}")]
    DependencyNotFound(String),

    #[error("ffprobe parse error: {0}")]
    FfprobeParse(String),

    #[error("Poster extraction failed: {0}")]
    PosterExtraction(String),

    #[error(
        "No theme data found. Add a theme preview video with a THEME-NAME marker, \
         or run in append mode against an existing catalog"
    )]
    NoThemeFound,

    #[error("No valid clips were assembled")]
    NoClipsAssembled,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for themegen-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

/// Builds a [`CoreError::CommandStart`] for a command that could not be spawned.
pub(crate) fn command_start_error(cmd: impl Into<String>, source: std::io::Error) -> CoreError {
    CoreError::CommandStart {
        cmd: cmd.into(),
        source,
    }
}

/// Builds a [`CoreError::CommandFailed`] for a command that exited unsuccessfully.
pub(crate) fn command_failed_error(
    cmd: impl Into<String>,
    status: ExitStatus,
    stderr: impl Into<String>,
) -> CoreError {
    CoreError::CommandFailed {
        cmd: cmd.into(),
        status,
        stderr: stderr.into(),
    }
}

/// Builds a [`CoreError::CommandWait`] for a command whose exit could not be observed.
pub(crate) fn command_wait_error(cmd: impl Into<String>, source: std::io::Error) -> CoreError {
    CoreError::CommandWait {
        cmd: cmd.into(),
        source,
    }
}
