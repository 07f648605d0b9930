// themegen-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Themegen: theme catalog generation tool",
    long_about = "Builds a theme catalog JSON plus poster images from video files \
                  and their XMP metadata sidecars via the themegen-core library."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generates the theme catalog JSON and poster images for a batch of videos
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Input .mp4 file or directory containing .mp4 files with .xmp sidecars
    #[arg(required = true, value_name = "INPUT_PATH")]
    pub input_path: PathBuf,

    /// URL prefix written into previewUrl/posterUrl values
    /// (e.g. ./assets/media/theme-name/)
    #[arg(
        long = "base-url",
        value_name = "URL",
        default_value = "./assets/media/"
    )]
    pub base_url: String,

    /// Poster frame position as a percentage of the video duration
    #[arg(
        long,
        value_name = "PERCENT",
        default_value_t = 25,
        value_parser = clap::value_parser!(u8).range(0..=100)
    )]
    pub position: u8,

    /// JPEG quality for poster images (presets: low=60, medium=75, high=85, max=95)
    #[arg(
        long,
        value_name = "QUALITY",
        default_value_t = 85,
        value_parser = clap::value_parser!(u8).range(1..=100)
    )]
    pub quality: u8,

    /// Poster output width in pixels
    #[arg(long = "poster-width", value_name = "PIXELS", default_value_t = 640)]
    pub poster_width: u32,

    /// Poster output height in pixels
    #[arg(long = "poster-height", value_name = "PIXELS", default_value_t = 360)]
    pub poster_height: u32,

    /// Keep the source frame size instead of resizing posters
    #[arg(long)]
    pub native_size: bool,

    /// Append new clips to an existing catalog auto-detected in the folder
    #[arg(long)]
    pub append: bool,
}
