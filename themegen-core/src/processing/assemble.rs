//! Main catalog assembly orchestration.
//!
//! One sequential pass over an ordered batch of video files. Each file is
//! classified as the theme preview (its marker carries `THEME-NAME:`) or as
//! a clip, per-file failures are recorded without aborting the batch, and
//! the finished catalog is written exactly once at the end of the run.
//!
//! Clips may legally precede their theme in batch order: such clips carry
//! the unresolved `themeId` sentinel and are back-filled once the theme is
//! known, so user-ordered input works without a theme-first requirement.

use crate::catalog::{self, Catalog, Clip, Theme, UNRESOLVED_THEME_ID, generate_theme_id};
use crate::config::{CoreConfig, DEFAULT_CLIP_DURATION_SECS};
use crate::error::{CoreError, CoreResult};
use crate::external::{MediaProber, PosterExtractor, PosterRequest};
use crate::filename::parse_clip_filename;
use crate::marker::parse_marker;
use crate::sidecar::{SidecarReader, relocate_sidecars, sidecar_path_for};
use crate::{BatchReport, FileOutcome, FileStatus};

use std::path::{Path, PathBuf};

/// What a single file contributed to the batch.
enum FileAction {
    NewTheme(Theme),
    NewClip(Clip),
    /// Theme preview encountered while a loaded theme already exists
    /// (append mode); existing theme data takes precedence.
    SkippedExistingTheme,
    /// Clip id already present in the accumulated list.
    SkippedDuplicate(String),
}

/// Processes a batch of video files into a theme catalog.
///
/// Runs strictly sequentially over `files_to_process` in input order. In
/// append mode an existing catalog is located in the folder of the first
/// file and extended; otherwise a fresh catalog is created. The catalog is
/// written only when both a theme and at least one clip exist at the end of
/// the run; consumed sidecars are then relocated best-effort.
///
/// `progress` is invoked after every file with `(index + 1, total)`,
/// regardless of that file's outcome.
///
/// # Errors
///
/// Batch-fatal conditions only: no input files, no theme resolved by the end
/// of the run ([`CoreError::NoThemeFound`]), or zero clips
/// ([`CoreError::NoClipsAssembled`]), plus IO failures while writing the
/// catalog. Per-file failures are reported through the returned
/// [`BatchReport`] instead.
pub fn process_videos<P: PosterExtractor, M: MediaProber, S: SidecarReader>(
    poster_extractor: &P,
    prober: &M,
    sidecar_reader: &S,
    config: &CoreConfig,
    files_to_process: &[PathBuf],
    progress: &mut dyn FnMut(usize, usize),
) -> CoreResult<BatchReport> {
    let Some(first) = files_to_process.first() else {
        return Err(CoreError::NoFilesFound);
    };
    let folder = first
        .parent()
        .ok_or_else(|| {
            CoreError::PathError(format!(
                "cannot determine parent folder of {}",
                first.display()
            ))
        })?
        .to_path_buf();

    let base_url = config.normalized_base_url();
    let request = PosterRequest::from_config(config);
    let total = files_to_process.len();

    let mut notes: Vec<String> = Vec::new();
    let mut theme: Option<Theme> = None;
    let mut clips: Vec<Clip> = Vec::new();
    let mut existing_path: Option<PathBuf> = None;

    if config.append_mode {
        match catalog::locate_catalog_file(&folder) {
            Some(path) => match Catalog::load(&path) {
                Ok(existing) => {
                    log::info!("Appending to existing catalog: {}", path.display());
                    notes.push(format!(
                        "Appending to: {}",
                        path.file_name().unwrap_or_default().to_string_lossy()
                    ));
                    theme = Some(existing.theme);
                    clips = existing.clips;
                    existing_path = Some(path);
                }
                Err(e) => {
                    log::warn!("Existing catalog is unusable, falling back to fresh mode: {e}");
                    notes.push("Existing catalog found but invalid, creating a new theme".to_string());
                }
            },
            None => {
                notes.push("No existing catalog found, creating a new theme".to_string());
            }
        }
    }

    // Theme data loaded from disk is never overwritten by a preview file
    // encountered later in the same run.
    let have_loaded_theme = existing_path.is_some();

    let mut outcomes: Vec<FileOutcome> = Vec::with_capacity(total);
    let mut new_clips = 0usize;

    for (index, input_path) in files_to_process.iter().enumerate() {
        let filename = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| input_path.display().to_string());

        log::info!("Processing: {filename}");

        let outcome = match evaluate_file(
            poster_extractor,
            prober,
            sidecar_reader,
            input_path,
            &filename,
            &base_url,
            &request,
            have_loaded_theme,
            theme.as_ref(),
            &clips,
        ) {
            Ok(FileAction::NewTheme(new_theme)) => {
                log::info!("Theme preview: '{}' (id: {})", new_theme.name, new_theme.id);
                let detail = format!("theme '{}'", new_theme.name);
                theme = Some(new_theme);
                FileOutcome {
                    filename,
                    status: FileStatus::ThemeCreated,
                    detail,
                }
            }
            Ok(FileAction::NewClip(clip)) => {
                log::info!("Added clip '{}' ({})", clip.id, clip.category);
                let detail = format!("clip '{}'", clip.id);
                clips.push(clip);
                new_clips += 1;
                FileOutcome {
                    filename,
                    status: FileStatus::ClipAdded,
                    detail,
                }
            }
            Ok(FileAction::SkippedExistingTheme) => {
                log::info!("Skipping theme video (using existing theme data)");
                FileOutcome {
                    filename,
                    status: FileStatus::Skipped,
                    detail: "existing theme data takes precedence".to_string(),
                }
            }
            Ok(FileAction::SkippedDuplicate(id)) => {
                log::info!("Skipping '{id}' (already exists)");
                FileOutcome {
                    filename,
                    status: FileStatus::Skipped,
                    detail: format!("clip '{id}' already exists"),
                }
            }
            Err(detail) => {
                log::warn!("{filename}: {detail}");
                FileOutcome {
                    filename,
                    status: FileStatus::Failed,
                    detail,
                }
            }
        };

        outcomes.push(outcome);
        progress(index + 1, total);
    }

    let Some(theme) = theme else {
        return Err(CoreError::NoThemeFound);
    };
    if clips.is_empty() {
        return Err(CoreError::NoClipsAssembled);
    }

    // Back-fill clips processed before the theme was known.
    for clip in &mut clips {
        if clip.theme_id == UNRESOLVED_THEME_ID {
            clip.theme_id = theme.id.clone();
        }
    }

    let appended = existing_path.is_some();
    let catalog_path =
        existing_path.unwrap_or_else(|| folder.join(format!("{}.json", theme.id)));
    let catalog = Catalog {
        theme,
        clips,
    };
    catalog.save(&catalog_path)?;
    log::info!(
        "Catalog written to {} ({} new clip(s), {} total)",
        catalog_path.display(),
        new_clips,
        catalog.clips.len()
    );

    // Consumed sidecars are moved out of the way; a relocation failure is
    // logged, never propagated.
    if let Err(e) = relocate_sidecars(files_to_process) {
        log::warn!("Failed to relocate sidecar files: {e}");
    }

    Ok(BatchReport {
        catalog,
        catalog_path,
        outcomes,
        notes,
        new_clips,
        appended,
    })
}

/// Evaluates one file against the current batch state.
///
/// `Err` carries the per-file error detail (taxonomy: recoverable); the
/// caller records it and continues the batch.
#[allow(clippy::too_many_arguments)]
fn evaluate_file<P: PosterExtractor, M: MediaProber, S: SidecarReader>(
    poster_extractor: &P,
    prober: &M,
    sidecar_reader: &S,
    input_path: &Path,
    filename: &str,
    base_url: &str,
    request: &PosterRequest,
    have_loaded_theme: bool,
    current_theme: Option<&Theme>,
    clips: &[Clip],
) -> Result<FileAction, String> {
    let stem = input_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .ok_or_else(|| "cannot determine filename stem".to_string())?;

    let sidecar = sidecar_path_for(input_path);
    if !sidecar.exists() {
        return Err("no XMP sidecar file found".to_string());
    }

    // Files named like the theme preview carry their marker at frame 0;
    // everything else is expected to carry it at frame 1 or later.
    let is_theme_file = stem.to_lowercase().contains("theme");
    let metadata = sidecar_reader
        .read(&sidecar, is_theme_file)
        .map_err(|e| e.to_string())?;
    let Some(comment) = metadata.comment else {
        return Err("no marker data found at the required frame".to_string());
    };
    let Some(marker) = parse_marker(&comment).map_err(|e| e.to_string())? else {
        return Err("marker comment is empty".to_string());
    };

    if let Some(theme_name) = &marker.theme_name {
        if have_loaded_theme {
            return Ok(FileAction::SkippedExistingTheme);
        }

        // The theme record survives a failed poster extraction with an
        // empty posterUrl; only clips require a poster.
        let poster_url = match poster_extractor.extract(input_path, request) {
            Ok(poster_path) => format!("{base_url}{}", file_name_of(&poster_path)),
            Err(e) => {
                log::warn!("Poster extraction failed for theme preview {filename}: {e}");
                String::new()
            }
        };

        return Ok(FileAction::NewTheme(Theme {
            id: generate_theme_id(theme_name),
            name: theme_name.clone(),
            description: marker.theme_description.clone().unwrap_or_default(),
            preview_url: format!("{base_url}{filename}"),
            poster_url,
        }));
    }

    // No THEME-NAME marker: this file is a clip.
    let parsed = parse_clip_filename(&stem)
        .ok_or_else(|| "invalid filename format (expected category-order-Title)".to_string())?;

    if clips.iter().any(|c| c.id == stem) {
        return Ok(FileAction::SkippedDuplicate(stem));
    }

    let poster_path = poster_extractor
        .extract(input_path, request)
        .map_err(|e| e.to_string())?;

    let default_duration = prober
        .media_info(input_path)
        .ok()
        .and_then(|info| info.duration)
        .map(|d| (d * 100.0).round() / 100.0)
        .unwrap_or(DEFAULT_CLIP_DURATION_SECS);

    let theme_id = current_theme
        .map(|t| t.id.clone())
        .unwrap_or_else(|| UNRESOLVED_THEME_ID.to_string());

    Ok(FileAction::NewClip(Clip {
        id: stem,
        title: parsed.title,
        category: parsed.category,
        category_order: parsed.category_order,
        preview_url: format!("{base_url}{filename}"),
        poster_url: format!("{base_url}{}", file_name_of(&poster_path)),
        theme_id,
        default_duration,
        is_overlay: marker.is_overlay,
        tier_requirement: marker.tier(),
        triggers_tier_upgrade: false,
        requires_input: marker.requires_input(),
        popup_message: marker.popup_message.clone().unwrap_or_default(),
        custom_inputs: marker.custom_inputs,
    }))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}
