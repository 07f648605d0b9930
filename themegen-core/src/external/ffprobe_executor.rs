//! FFprobe integration for media analysis.
//!
//! Provides duration and dimension lookups used for clip durations and for
//! split-screen detection during poster extraction.

use crate::error::{CoreError, CoreResult, command_failed_error, command_start_error};

use ffprobe::{FfProbeError, ffprobe};
use std::path::Path;

/// Struct containing media information.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MediaInfo {
    /// Duration of the media in seconds
    pub duration: Option<f64>,
    /// Width of the video stream
    pub width: Option<i64>,
    /// Height of the video stream
    pub height: Option<i64>,
    /// Total number of frames in the video
    pub total_frames: Option<u64>,
}

/// Probes media files for duration and dimensions.
pub trait MediaProber {
    fn media_info(&self, input_path: &Path) -> CoreResult<MediaInfo>;
}

/// Concrete [`MediaProber`] backed by the ffprobe crate.
#[derive(Debug, Clone, Default)]
pub struct CrateFfprobeExecutor;

impl CrateFfprobeExecutor {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl MediaProber for CrateFfprobeExecutor {
    fn media_info(&self, input_path: &Path) -> CoreResult<MediaInfo> {
        log::debug!(
            "Running ffprobe (via crate) for media info on: {}",
            input_path.display()
        );
        match ffprobe(input_path) {
            Ok(metadata) => {
                let duration = metadata
                    .format
                    .duration
                    .as_deref()
                    .and_then(|d| d.parse::<f64>().ok());

                let mut info = MediaInfo {
                    duration,
                    ..Default::default()
                };

                if let Some(video_stream) = metadata
                    .streams
                    .iter()
                    .find(|s| s.codec_type.as_deref() == Some("video"))
                {
                    info.width = video_stream.width;
                    info.height = video_stream.height;
                    info.total_frames = video_stream
                        .nb_frames
                        .as_deref()
                        .and_then(|f| f.parse::<u64>().ok());
                }

                Ok(info)
            }
            Err(err) => {
                log::warn!("Failed to get media info: {err:?}");
                Err(map_ffprobe_error(err, "media info"))
            }
        }
    }
}

fn map_ffprobe_error(err: FfProbeError, context: &str) -> CoreError {
    match err {
        FfProbeError::Io(io_err) => command_start_error(format!("ffprobe ({context})"), io_err),
        FfProbeError::Status(output) => {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            command_failed_error(format!("ffprobe ({context})"), output.status, stderr)
        }
        FfProbeError::Deserialize(err) => CoreError::FfprobeParse(format!(
            "ffprobe {context} output deserialization: {err}"
        )),
        _ => CoreError::FfprobeParse(format!("Unknown ffprobe error during {context}: {err:?}")),
    }
}
