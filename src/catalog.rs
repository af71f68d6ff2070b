//! Screenshot discovery for one subsection folder.
//!
//! A folder is scanned once, filtered down to image files that survive the
//! skip rules, given display names and sorted. Unreadable folders produce an
//! empty catalog instead of an error.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use deunicode::deunicode;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{Dimensions, NameStyle};

/// Extensions accepted as screenshots (compared case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// One screenshot in a subsection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenImage {
    pub filename: String,
    pub display_name: String,
    /// `/`-joined path relative to the emitted page, not yet percent-encoded.
    pub relative_path: String,
    pub source_folder: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
}

/// Filters applied to file names before display names are derived.
#[derive(Debug, Clone, Default)]
pub struct SkipRules {
    pub skip_numeric: bool,
    pub patterns: Vec<Regex>,
}

impl SkipRules {
    /// Numeric skip first, then each pattern in order.
    pub fn skips(&self, filename: &str) -> bool {
        if self.skip_numeric && is_numeric_name(filename) {
            return true;
        }
        self.patterns.iter().any(|pat| pat.is_match(filename))
    }
}

/// Everything the loader needs to scan one folder.
#[derive(Debug, Clone)]
pub struct CatalogRequest<'a> {
    pub folder_path: &'a Path,
    /// Prefix for `relative_path`, e.g. `figma-images/Loanbook Web - Income`.
    pub relative_folder: &'a str,
    /// Configured folder name, the key the resolver looks up in `[folders]`.
    pub source_folder: &'a str,
    pub name_style: NameStyle,
    pub rules: &'a SkipRules,
}

fn numeric_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)?(-\d+)?$").expect("valid numeric-name regex"))
}

fn node_id_suffix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"_\d+-\d+$").expect("valid node-id suffix regex"))
}

/// Splits `name.ext` into stem and extension when the extension is an image type.
pub fn image_stem(filename: &str) -> Option<&str> {
    let (stem, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        Some(stem)
    } else {
        None
    }
}

/// True for index-like names such as `3.png`, `4-1.png` or `2.5.png`.
pub fn is_numeric_name(filename: &str) -> bool {
    image_stem(filename)
        .map(|stem| numeric_name_re().is_match(stem))
        .unwrap_or(false)
}

/// Derives the display name for an image file. May return an empty string.
pub fn display_name(filename: &str, style: NameStyle) -> String {
    let stem = image_stem(filename).unwrap_or(filename);
    let base = match style {
        NameStyle::NodeId => node_id_suffix_re().replace(stem, ""),
        NameStyle::Plain => stem.into(),
    };
    base.replace('_', " ").trim().to_string()
}

/// Collation key for display names: accents folded to ASCII, then lowercased.
pub fn collation_key(name: &str) -> String {
    deunicode(name).to_lowercase()
}

/// Orders two display names the way the catalog sorts them.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Scans a folder and returns its screenshots in display order.
pub fn load_catalog(request: &CatalogRequest<'_>) -> Vec<ScreenImage> {
    let entries = match fs::read_dir(request.folder_path) {
        Ok(entries) => entries,
        Err(err) => {
            debug!(
                folder = %request.folder_path.display(),
                error = %err,
                "image folder unreadable; treating as empty"
            );
            return Vec::new();
        }
    };

    let mut filenames: Vec<String> = entries
        .filter_map(|entry| entry.ok())
        // `Path::is_file` follows symlinks.
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .collect();
    // Byte order first so ties in the stable sort below do not depend on readdir order.
    filenames.sort();

    let mut images: Vec<ScreenImage> = filenames
        .into_iter()
        .filter(|f| image_stem(f).is_some())
        .filter(|f| !request.rules.skips(f))
        .filter_map(|filename| {
            let name = display_name(&filename, request.name_style);
            if name.is_empty() {
                return None;
            }
            let dimensions = read_dimensions(&request.folder_path.join(&filename));
            Some(ScreenImage {
                relative_path: join_relative(request.relative_folder, &filename),
                display_name: name,
                source_folder: request.source_folder.to_string(),
                dimensions,
                filename,
            })
        })
        .collect();

    images.sort_by_cached_key(|img| collation_key(&img.display_name));
    images
}

fn join_relative(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{prefix}/{filename}")
    }
}

fn read_dimensions(path: &Path) -> Option<Dimensions> {
    match image::image_dimensions(path) {
        Ok((width, height)) => Some(Dimensions { width, height }),
        Err(err) => {
            debug!(path = %path.display(), error = %err, "could not read image dimensions");
            None
        }
    }
}
