//! Offline Figma metadata: export parsing, frame-name indexing and file references.
//!
//! This module provides:
//! - [`build_index`] - Per-file name → node-id tables from saved exports
//! - [`normalized_name`] - The single normalization used for matching
//! - [`parse_file_reference`] - File keys from bare keys or Figma URLs
//! - API types for the exported JSON

pub mod api_types;
pub mod index;
pub mod reference;

#[cfg(test)]
mod tests;

pub use api_types::{FigmaChildNode, FigmaDocument, FigmaFileExport, FigmaNodeData, FigmaPage};
pub use index::{
    build_index, document_path, load_export, normalized_name, DocumentIndex, FigmaIndex,
    IndexOptions,
};
pub use reference::{parse_file_reference, FigmaReference, ReferenceParseError};
