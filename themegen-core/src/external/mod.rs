//! Interactions with external command-line tools.
//!
//! Encapsulates ffmpeg and ffprobe invocations behind traits
//! ([`PosterExtractor`], [`MediaProber`]) so the assembly engine can be
//! driven with fake collaborators in tests. The default implementations use
//! the ffmpeg-sidecar and ffprobe crates.

use crate::error::{CoreError, CoreResult};

use std::io;
use std::process::{Command, Stdio};

pub mod ffprobe_executor;
pub mod poster;

pub use ffprobe_executor::{CrateFfprobeExecutor, MediaInfo, MediaProber};
pub use poster::{FfmpegPosterExtractor, PosterExtractor, PosterRequest};

/// Checks if a required external command is available and executable.
///
/// Runs the command with `-version` and discards its output; used to verify
/// ffmpeg/ffprobe presence before a real batch run.
pub fn check_dependency(cmd_name: &str) -> CoreResult<()> {
    let result = Command::new(cmd_name)
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status();

    match result {
        Ok(_) => {
            log::debug!("Found dependency: {cmd_name}");
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::warn!("Dependency '{cmd_name}' not found.");
            Err(CoreError::DependencyNotFound(cmd_name.to_string()))
        }
        Err(e) => {
            log::error!("Failed to start dependency check command '{cmd_name}': {e}");
            Err(crate::error::command_start_error(cmd_name, e))
        }
    }
}
