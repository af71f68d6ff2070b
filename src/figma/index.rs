//! Name → node-id lookup tables built from saved Figma exports.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::api_types::FigmaFileExport;
use crate::{GalleryError, Result};

/// Reduces a name to lowercase ASCII letters and digits.
///
/// Used both when registering frames and when looking up screen names, so
/// `"Active Offices"` and `"active_offices!!"` meet at `"activeoffices"`.
pub fn normalized_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect()
}

/// Normalized frame name → node id for one Figma file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentIndex {
    entries: BTreeMap<String, String>,
}

impl DocumentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a frame; a later registration of the same normalized name wins.
    pub fn register(&mut self, name: &str, node_id: &str) {
        self.entries
            .insert(normalized_name(name), node_id.to_string());
    }

    /// Indexes page children and the children of `SECTION` nodes, in page
    /// order then child order.
    pub fn from_export(export: &FigmaFileExport) -> Self {
        let mut index = Self::new();
        index.extend_from_export(export);
        index
    }

    pub fn extend_from_export(&mut self, export: &FigmaFileExport) {
        for page in export.pages() {
            for node in &page.children {
                if let (Some(name), Some(id)) = (non_empty(&node.name), non_empty(&node.id)) {
                    self.register(name, id);
                }
                if node.is_section() {
                    for child in &node.children {
                        if let (Some(name), Some(id)) =
                            (non_empty(&child.name), non_empty(&child.id))
                        {
                            self.register(name, id);
                        }
                    }
                }
            }
        }
    }

    /// Looks up a display name; normalization is applied here.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&normalized_name(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn merge(&mut self, other: DocumentIndex) {
        self.entries.extend(other.entries);
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Per-file indexes keyed by Figma file id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FigmaIndex {
    files: BTreeMap<String, DocumentIndex>,
}

impl FigmaIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document's entries under `file_id`, merging with entries already
    /// registered for that file (later entries win).
    pub fn insert(&mut self, file_id: impl Into<String>, index: DocumentIndex) {
        self.files.entry(file_id.into()).or_default().merge(index);
    }

    pub fn file(&self, file_id: &str) -> Option<&DocumentIndex> {
        self.files.get(file_id)
    }

    pub fn lookup(&self, file_id: &str, name: &str) -> Option<&str> {
        self.file(file_id)?.get(name)
    }

    /// Entry count per file id, in file-id order.
    pub fn entry_counts(&self) -> BTreeMap<String, usize> {
        self.files
            .iter()
            .map(|(id, idx)| (id.clone(), idx.len()))
            .collect()
    }

    pub fn total_entries(&self) -> usize {
        self.files.values().map(DocumentIndex::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.files.values().all(DocumentIndex::is_empty)
    }
}

/// Where exports live and how strictly to treat broken ones.
#[derive(Debug, Clone)]
pub struct IndexOptions {
    pub metadata_dir: PathBuf,
    /// Skip malformed documents with a warning instead of failing the run.
    pub lenient: bool,
}

/// Path of the export for a document key: `<metadata_dir>/<key>.json`.
pub fn document_path(metadata_dir: &Path, document_key: &str) -> PathBuf {
    metadata_dir.join(format!("{document_key}.json"))
}

/// Reads one export. `Ok(None)` when the file is absent or unreadable; an
/// error only when it exists but does not parse.
pub fn load_export(path: &Path) -> Result<Option<FigmaFileExport>> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no Figma export; deep links unavailable for it");
            return Ok(None);
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "Figma export unreadable; skipping");
            return Ok(None);
        }
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|source| GalleryError::metadata(path, source))
}

/// Builds the index for every `document key → file id` pair.
pub fn build_index(
    documents: &BTreeMap<String, String>,
    options: &IndexOptions,
) -> Result<FigmaIndex> {
    let mut index = FigmaIndex::new();
    for (key, file_id) in documents {
        let path = document_path(&options.metadata_dir, key);
        let export = match load_export(&path) {
            Ok(Some(export)) => export,
            Ok(None) => continue,
            Err(err) if options.lenient => {
                warn!(document = %key, error = %err, "skipping malformed Figma export");
                continue;
            }
            Err(err) => return Err(err),
        };
        let doc_index = DocumentIndex::from_export(&export);
        info!(
            document = %key,
            file = %file_id,
            entries = doc_index.len(),
            "loaded Figma index"
        );
        index.insert(file_id.clone(), doc_index);
    }
    Ok(index)
}
