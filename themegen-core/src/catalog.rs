//! Catalog data model: theme and clip records, the theme-id slug generator,
//! and loading/saving of the catalog JSON file.
//!
//! The catalog file is a pretty-printed UTF-8 JSON object with exactly two
//! top-level keys: `theme` and `clips`. Field names are part of the external
//! interface consumed by the downstream media player and must not change.

use crate::error::{CoreError, CoreResult};
use crate::marker::InputField;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Sentinel `themeId` carried by clips processed before the theme preview is
/// known within a batch; back-filled at finalize time.
pub const UNRESOLVED_THEME_ID: &str = "any";

static NON_SLUG_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9\s-]").expect("valid regex"));
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static HYPHEN_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"-+").expect("valid regex"));

/// Derives a URL-safe theme id from a human-readable theme name.
///
/// Lowercases, strips characters outside `[a-z0-9 -]`, collapses whitespace
/// runs to single hyphens, collapses hyphen runs, and trims leading/trailing
/// hyphens. Applying the function to its own output is a no-op.
#[must_use]
pub fn generate_theme_id(theme_name: &str) -> String {
    let id = theme_name.to_lowercase();
    let id = NON_SLUG_CHARS.replace_all(&id, "");
    let id = WHITESPACE_RUNS.replace_all(&id, "-");
    let id = HYPHEN_RUNS.replace_all(&id, "-");
    id.trim_matches('-').to_string()
}

/// Top-level catalog record representing one visual style/collection.
///
/// Created exactly once per catalog; `id` is derived from `name` via
/// [`generate_theme_id`] and is immutable once set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub preview_url: String,
    /// Empty string when poster extraction failed for the preview video.
    pub poster_url: String,
}

/// One catalog entry: a single short video plus the UI inputs it requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Clip {
    /// Filename stem of the source video; unique within a catalog.
    pub id: String,
    pub title: String,
    pub category: String,
    pub category_order: u32,
    pub preview_url: String,
    pub poster_url: String,
    pub theme_id: String,
    /// Playback duration in seconds, rounded to two decimals.
    pub default_duration: f64,
    pub is_overlay: bool,
    pub tier_requirement: String,
    /// Reserved; always written as false.
    pub triggers_tier_upgrade: bool,
    pub requires_input: bool,
    #[serde(default)]
    pub popup_message: String,
    #[serde(default)]
    pub custom_inputs: Vec<InputField>,
}

/// A theme plus its ordered clip list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub theme: Theme,
    pub clips: Vec<Clip>,
}

impl Catalog {
    /// Loads and validates a catalog file.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CoreError::CatalogParse(format!("failed to read {}: {e}", path.display()))
        })?;
        serde_json::from_str(&text).map_err(|e| {
            CoreError::CatalogParse(format!("invalid catalog in {}: {e}", path.display()))
        })
    }

    /// Writes the catalog as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::debug!("Wrote catalog to {}", path.display());
        Ok(())
    }
}

/// Locates an existing catalog file in a folder.
///
/// Scans top-level `.json` files sorted by name. A single candidate is
/// returned as-is; with several candidates the first whose top-level object
/// carries both a `theme` and a `clips` key wins; zero candidates or no
/// structural match yields `None`.
#[must_use]
pub fn locate_catalog_file(folder: &Path) -> Option<PathBuf> {
    let mut candidates: Vec<PathBuf> = std::fs::read_dir(folder)
        .ok()?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let is_json = path
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
            (path.is_file() && is_json).then_some(path)
        })
        .collect();
    candidates.sort();

    match candidates.len() {
        0 => None,
        1 => Some(candidates.remove(0)),
        _ => candidates.into_iter().find(|path| {
            std::fs::read_to_string(path)
                .ok()
                .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).ok())
                .is_some_and(|value| value.get("theme").is_some() && value.get("clips").is_some())
        }),
    }
}
