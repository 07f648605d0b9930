//! Implementation of the 'generate' subcommand.
//!
//! Discovers the video batch, configures themegen-core, runs the assembly
//! engine with a progress bar, and prints the end-of-run summary.

use crate::cli::GenerateArgs;
use crate::logging::get_timestamp;

use themegen_core::external::{CrateFfprobeExecutor, FfmpegPosterExtractor, check_dependency};
use themegen_core::sidecar::XmpSidecarReader;
use themegen_core::{BatchReport, CoreConfig, CoreError, CoreResult, process_videos};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use owo_colors::OwoColorize;
use std::fs;
use std::path::PathBuf;

/// Maximum number of per-file errors printed in the summary before
/// truncating with a "+N more" suffix.
const MAX_REPORTED_ERRORS: usize = 5;

/// Runs the `generate` command end to end.
pub fn run_generate(args: GenerateArgs) -> CoreResult<()> {
    info!("Generate run started: {}", get_timestamp());

    let files = discover_generate_files(&args)?;
    info!("Found {} file(s) to process.", files.len());

    let mut config = CoreConfig::new(&args.base_url);
    config.position_percent = args.position;
    config.quality = args.quality;
    config.output_size = if args.native_size {
        None
    } else {
        Some((args.poster_width, args.poster_height))
    };
    config.append_mode = args.append;
    config.validate()?;

    check_dependency("ffmpeg")?;
    check_dependency("ffprobe")?;
    info!("External dependency check passed.");

    let progress_bar = ProgressBar::new(files.len() as u64);
    progress_bar.set_style(
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
            .expect("valid progress template"),
    );

    let report = process_videos(
        &FfmpegPosterExtractor::new(),
        &CrateFfprobeExecutor::new(),
        &XmpSidecarReader,
        &config,
        &files,
        &mut |done, _total| progress_bar.set_position(done as u64),
    )?;
    progress_bar.finish_and_clear();

    print_summary(&report);
    Ok(())
}

/// Discovers .mp4 files from the input path (file or directory).
fn discover_generate_files(args: &GenerateArgs) -> CoreResult<Vec<PathBuf>> {
    let input_path = args.input_path.canonicalize().map_err(|e| {
        CoreError::PathError(format!(
            "Invalid input path '{}': {e}",
            args.input_path.display()
        ))
    })?;

    let metadata = fs::metadata(&input_path).map_err(|e| {
        CoreError::PathError(format!(
            "Failed to access input path '{}': {e}",
            input_path.display()
        ))
    })?;

    if metadata.is_dir() {
        themegen_core::find_processable_files(&input_path)
    } else if metadata.is_file() {
        if input_path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("mp4"))
        {
            Ok(vec![input_path])
        } else {
            Err(CoreError::OperationFailed(format!(
                "Input file '{}' is not a .mp4 file",
                input_path.display()
            )))
        }
    } else {
        Err(CoreError::OperationFailed(format!(
            "Input path '{}' is neither a file nor a directory",
            input_path.display()
        )))
    }
}

/// Prints the end-of-run summary: catalog location, clip counts, skip notes,
/// and a bounded error list.
fn print_summary(report: &BatchReport) {
    println!();
    println!("{}", "Catalog Summary:".bold());
    println!("  Catalog file: {}", report.catalog_path.display().bold());
    println!(
        "  Theme:        {} (id: {})",
        report.catalog.theme.name, report.catalog.theme.id
    );

    let status = if report.appended {
        format!(
            "Updated: added {} new clip(s) (total: {})",
            report.new_clips,
            report.total_clips()
        )
    } else {
        format!(
            "Complete: generated {} clip(s) + theme catalog",
            report.total_clips()
        )
    };
    println!("  {}", status.green());

    for note in &report.notes {
        println!("  {}", note.yellow());
    }
    for skip in report.skips() {
        println!(
            "  {}",
            format!("Skipped {}: {}", skip.filename, skip.detail).yellow()
        );
    }

    let errors: Vec<_> = report.errors().collect();
    if !errors.is_empty() {
        println!("  {}", format!("{} error(s):", errors.len()).red().bold());
        for outcome in errors.iter().take(MAX_REPORTED_ERRORS) {
            println!("    {}: {}", outcome.filename, outcome.detail);
        }
        if errors.len() > MAX_REPORTED_ERRORS {
            println!(
                "    ... and {} more errors",
                errors.len() - MAX_REPORTED_ERRORS
            );
        }
    }

    println!("  Sidecar files moved to xmp_trash/");
}
