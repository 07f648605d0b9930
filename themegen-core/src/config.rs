//! Configuration structures and constants for the themegen-core library.
//!
//! Instances of [`CoreConfig`] are created by consumers of the library (like
//! themegen-cli) and passed to `process_videos` to control catalog assembly
//! and poster extraction behavior.

use crate::error::{CoreError, CoreResult};

/// Default poster frame position as a percentage of the video duration.
pub const DEFAULT_POSTER_POSITION_PERCENT: u8 = 25;

/// Default JPEG quality for extracted posters (1-100 scale).
pub const DEFAULT_JPEG_QUALITY: u8 = 85;

/// Default poster output width in pixels.
pub const DEFAULT_POSTER_WIDTH: u32 = 640;

/// Default poster output height in pixels.
pub const DEFAULT_POSTER_HEIGHT: u32 = 360;

/// Fallback clip duration in seconds when probing fails.
pub const DEFAULT_CLIP_DURATION_SECS: f64 = 3.0;

/// Extension of the metadata sidecar files consumed alongside each video.
pub const SIDECAR_EXTENSION: &str = "xmp";

/// Main configuration structure for the themegen-core library.
///
/// Holds the parameters for one batch run: the asset URL prefix written into
/// the catalog, poster extraction settings, and the append-mode flag.
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// URL prefix concatenated with each asset filename to build
    /// `previewUrl`/`posterUrl` values (e.g. `./assets/media/my-theme/`).
    pub base_url: String,

    /// Poster frame position as a percentage of the video duration (0-100).
    pub position_percent: u8,

    /// JPEG quality for extracted posters (1-100).
    pub quality: u8,

    /// Optional poster output size; `None` keeps the source frame size.
    pub output_size: Option<(u32, u32)>,

    /// Merge new clips into an existing catalog instead of creating one.
    pub append_mode: bool,
}

impl CoreConfig {
    /// Creates a configuration with the given base URL and default poster
    /// settings (25% position, quality 85, 640x360 output).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            position_percent: DEFAULT_POSTER_POSITION_PERCENT,
            quality: DEFAULT_JPEG_QUALITY,
            output_size: Some((DEFAULT_POSTER_WIDTH, DEFAULT_POSTER_HEIGHT)),
            append_mode: false,
        }
    }

    /// Returns the base URL with trailing slashes normalized to exactly one.
    #[must_use]
    pub fn normalized_base_url(&self) -> String {
        format!("{}/", self.base_url.trim_end_matches('/'))
    }

    /// Validates the configuration ranges.
    pub fn validate(&self) -> CoreResult<()> {
        if self.position_percent > 100 {
            return Err(CoreError::Config(format!(
                "poster position must be 0-100, got {}",
                self.position_percent
            )));
        }
        if self.quality == 0 || self.quality > 100 {
            return Err(CoreError::Config(format!(
                "JPEG quality must be 1-100, got {}",
                self.quality
            )));
        }
        if self.base_url.trim().is_empty() {
            return Err(CoreError::Config("base URL must not be empty".to_string()));
        }
        Ok(())
    }
}
