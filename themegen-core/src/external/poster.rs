//! Poster frame extraction via ffmpeg.
//!
//! Grabs a single frame at a configurable position in the video, optionally
//! crops away the right half of side-by-side sources, optionally resizes,
//! and writes `<stem>-poster.jpg` next to the video file.

use crate::error::{
    CoreError, CoreResult, command_failed_error, command_start_error, command_wait_error,
};
use crate::external::ffprobe_executor::{CrateFfprobeExecutor, MediaProber};

use ffmpeg_sidecar::command::FfmpegCommand;
use std::path::{Path, PathBuf};

/// Aspect ratio at or above which a source is treated as side-by-side and
/// cropped to its left half.
const SPLIT_SCREEN_RATIO: f64 = 1.8;

/// Parameters for one poster extraction call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PosterRequest {
    /// Frame position as a percentage of the video duration (0-100).
    pub position_percent: u8,
    /// JPEG quality on the 1-100 scale.
    pub quality: u8,
    /// Optional output size; `None` keeps the source frame size.
    pub output_size: Option<(u32, u32)>,
}

impl PosterRequest {
    /// Builds a request from the batch configuration.
    #[must_use]
    pub fn from_config(config: &crate::config::CoreConfig) -> Self {
        Self {
            position_percent: config.position_percent,
            quality: config.quality,
            output_size: config.output_size,
        }
    }
}

/// Extracts a poster image for a video file.
///
/// Returns the path of the saved poster on success. Failures are reported as
/// errors and downgraded by the assembly engine to per-file outcomes.
pub trait PosterExtractor {
    fn extract(&self, video_path: &Path, request: &PosterRequest) -> CoreResult<PathBuf>;
}

/// Concrete [`PosterExtractor`] that probes the source with ffprobe and
/// grabs the frame with an ffmpeg child process.
#[derive(Debug, Clone, Default)]
pub struct FfmpegPosterExtractor {
    prober: CrateFfprobeExecutor,
}

impl FfmpegPosterExtractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PosterExtractor for FfmpegPosterExtractor {
    fn extract(&self, video_path: &Path, request: &PosterRequest) -> CoreResult<PathBuf> {
        let info = self.prober.media_info(video_path)?;
        let duration = info
            .duration
            .filter(|d| *d > 0.0)
            .ok_or_else(|| CoreError::PosterExtraction("invalid video properties".to_string()))?;

        let seek_secs = seek_position(duration, request.position_percent);
        let stem = video_path
            .file_stem()
            .ok_or_else(|| {
                CoreError::PathError(format!(
                    "failed to get filename stem for {}",
                    video_path.display()
                ))
            })?
            .to_string_lossy()
            .to_string();

        let mut filters: Vec<String> = Vec::new();
        if needs_left_crop(&stem, info.width, info.height) {
            filters.push("crop=iw/2:ih:0:0".to_string());
        }
        if let Some((width, height)) = request.output_size {
            filters.push(format!("scale={width}:{height}:flags=lanczos"));
        }

        let output_path = poster_output_path(video_path, &stem);

        let mut cmd = FfmpegCommand::new();
        cmd.arg("-y"); // Posters are regenerated on every run
        cmd.arg("-ss");
        cmd.arg(format!("{seek_secs:.3}"));
        cmd.input(video_path.to_string_lossy().as_ref());
        cmd.args(["-frames:v", "1"]);
        if !filters.is_empty() {
            cmd.args(["-vf", &filters.join(",")]);
        }
        cmd.args(["-q:v", &jpeg_qscale(request.quality).to_string()]);
        cmd.output(output_path.to_string_lossy().as_ref());

        log::debug!("Running poster extraction command: {cmd:?}");

        let mut child = cmd
            .spawn()
            .map_err(|e| command_start_error("ffmpeg (poster)", e))?;
        let status = child
            .wait()
            .map_err(|e| command_wait_error("ffmpeg (poster)", e))?;
        if !status.success() {
            return Err(command_failed_error(
                "ffmpeg (poster)",
                status,
                "poster extraction process failed",
            ));
        }
        if !output_path.exists() {
            return Err(CoreError::PosterExtraction(format!(
                "ffmpeg did not produce {}",
                output_path.display()
            )));
        }

        log::debug!("Poster extracted to: {}", output_path.display());
        Ok(output_path)
    }
}

/// Seek position in seconds, clamped to stay inside the video.
fn seek_position(duration_secs: f64, position_percent: u8) -> f64 {
    let seek = duration_secs * f64::from(position_percent) / 100.0;
    seek.min(duration_secs - 0.001).max(0.0)
}

/// Whether the poster frame should be cropped to the left half: overlay
/// renders are exported side-by-side (fill + matte), and any source with an
/// aspect ratio >= 1.8 is treated as split-screen.
fn needs_left_crop(stem: &str, width: Option<i64>, height: Option<i64>) -> bool {
    if stem.starts_with("overlay") {
        return true;
    }
    match (width, height) {
        (Some(w), Some(h)) if h > 0 => (w as f64 / h as f64) >= SPLIT_SCREEN_RATIO,
        _ => false,
    }
}

/// Maps the 1-100 JPEG quality scale onto ffmpeg's mjpeg `-q:v` 31-2 scale
/// (lower qscale is higher quality).
fn jpeg_qscale(quality: u8) -> u8 {
    let quality = quality.clamp(1, 100) as u32;
    (31 - ((quality - 1) * 29 / 99)) as u8
}

/// Poster path: `<stem>-poster.jpg` next to the video.
fn poster_output_path(video_path: &Path, stem: &str) -> PathBuf {
    video_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(format!("{stem}-poster.jpg"))
}
