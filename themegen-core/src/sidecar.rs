//! XMP metadata sidecar reading and post-run sidecar relocation.
//!
//! Each video is expected to ship with an `.xmp` sidecar exported alongside
//! it. The reader pulls two things out of the sidecar: the composition title
//! (`dc:title/rdf:Alt/rdf:li`) and the comment of the first timeline marker
//! (`xmpDM:markers/rdf:Seq/rdf:li`) whose `xmpDM:startTime` matches the
//! requested frame class. Theme preview files carry their marker at frame 0;
//! clips carry theirs at frame 1 or later.

use crate::config::SIDECAR_EXTENSION;
use crate::error::{CoreError, CoreResult};

use quick_xml::Reader;
use quick_xml::events::Event;
use std::path::{Path, PathBuf};

/// Title and marker comment extracted from one sidecar file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SidecarMetadata {
    /// Composition title, when present.
    pub title: Option<String>,
    /// Comment of the first marker at the requested frame class; `None` when
    /// no marker matched.
    pub comment: Option<String>,
}

/// Reads title and marker comment from a metadata sidecar.
///
/// Abstracted behind a trait so the assembly engine can be exercised with
/// fake sidecar data in tests.
pub trait SidecarReader {
    /// Reads the sidecar at `sidecar_path`. With `want_frame_zero` set, only
    /// a marker at frame 0 matches; otherwise only markers at frame > 0 do.
    fn read(&self, sidecar_path: &Path, want_frame_zero: bool) -> CoreResult<SidecarMetadata>;
}

/// Concrete [`SidecarReader`] parsing Adobe XMP sidecar files.
#[derive(Debug, Clone, Default)]
pub struct XmpSidecarReader;

impl SidecarReader for XmpSidecarReader {
    fn read(&self, sidecar_path: &Path, want_frame_zero: bool) -> CoreResult<SidecarMetadata> {
        let content = std::fs::read_to_string(sidecar_path).map_err(|e| {
            CoreError::SidecarParse(format!("failed to read {}: {e}", sidecar_path.display()))
        })?;
        parse_xmp(&content, want_frame_zero).map_err(|e| {
            CoreError::SidecarParse(format!("failed to parse {}: {e}", sidecar_path.display()))
        })
    }
}

/// Parses XMP text for the composition title and the first matching marker.
fn parse_xmp(content: &str, want_frame_zero: bool) -> Result<SidecarMetadata, String> {
    let mut reader = Reader::from_str(content);

    let mut metadata = SidecarMetadata::default();

    // dc:title subtree state
    let mut in_title = false;
    let mut in_title_li = false;

    // xmpDM:markers subtree state
    let mut in_markers = false;
    let mut in_marker_li = false;
    let mut in_start_time = false;
    let mut in_comment = false;
    let mut start_time_text = String::new();
    let mut comment_text: Option<String> = None;

    loop {
        match reader.read_event().map_err(|e| e.to_string())? {
            Event::Start(start) => match start.name().as_ref() {
                b"dc:title" => in_title = true,
                b"xmpDM:markers" => in_markers = true,
                b"rdf:li" if in_title => in_title_li = true,
                b"rdf:li" if in_markers => {
                    in_marker_li = true;
                    start_time_text.clear();
                    comment_text = None;
                }
                b"xmpDM:startTime" if in_marker_li => in_start_time = true,
                b"xmpDM:comment" if in_marker_li => in_comment = true,
                _ => {}
            },
            Event::End(end) => match end.name().as_ref() {
                b"dc:title" => in_title = false,
                b"xmpDM:markers" => in_markers = false,
                b"rdf:li" if in_title_li => in_title_li = false,
                b"rdf:li" if in_marker_li => {
                    in_marker_li = false;
                    if metadata.comment.is_none() {
                        if let Some(comment) = comment_text.take() {
                            let start_time: i64 = start_time_text
                                .trim()
                                .parse()
                                .map_err(|_| format!("invalid marker startTime '{start_time_text}'"))?;
                            let matches = if want_frame_zero {
                                start_time == 0
                            } else {
                                start_time > 0
                            };
                            if matches {
                                metadata.comment = Some(comment);
                            }
                        }
                    }
                }
                b"xmpDM:startTime" => in_start_time = false,
                b"xmpDM:comment" => in_comment = false,
                _ => {}
            },
            Event::Text(text) => {
                let text = text.unescape().map_err(|e| e.to_string())?;
                if in_title_li && metadata.title.is_none() {
                    metadata.title = Some(text.trim().to_string());
                } else if in_start_time {
                    start_time_text.push_str(&text);
                } else if in_comment {
                    let entry = comment_text.get_or_insert_with(String::new);
                    entry.push_str(&text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(metadata)
}

/// Returns the expected sidecar path for a video file (same path, `.xmp`).
#[must_use]
pub fn sidecar_path_for(video_path: &Path) -> PathBuf {
    video_path.with_extension(SIDECAR_EXTENSION)
}

/// Moves the sidecar files of all given videos into an `xmp_trash` subfolder.
///
/// Name collisions inside the trash folder are resolved by appending `_1`,
/// `_2`, ... to the stem; nothing is ever overwritten. Returns the number of
/// files moved. Missing sidecars are skipped silently.
pub fn relocate_sidecars(video_paths: &[PathBuf]) -> CoreResult<usize> {
    let Some(first) = video_paths.first() else {
        return Ok(0);
    };
    let folder = first.parent().ok_or_else(|| {
        CoreError::PathError(format!(
            "cannot determine parent folder of {}",
            first.display()
        ))
    })?;
    let trash_folder = folder.join("xmp_trash");
    std::fs::create_dir_all(&trash_folder)?;

    let mut moved = 0;
    for video_path in video_paths {
        let sidecar = sidecar_path_for(video_path);
        if !sidecar.exists() {
            continue;
        }
        let file_name = sidecar.file_name().ok_or_else(|| {
            CoreError::PathError(format!("sidecar path has no filename: {}", sidecar.display()))
        })?;
        let stem = sidecar
            .file_stem()
            .unwrap_or(file_name)
            .to_string_lossy()
            .to_string();

        let mut target = trash_folder.join(file_name);
        let mut counter = 1;
        while target.exists() {
            target = trash_folder.join(format!("{stem}_{counter}.{SIDECAR_EXTENSION}"));
            counter += 1;
        }
        std::fs::rename(&sidecar, &target)?;
        moved += 1;
    }

    log::info!("Moved {moved} sidecar file(s) to xmp_trash/");
    Ok(moved)
}
