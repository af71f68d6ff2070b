//! Deep links from screen names back into Figma.

use std::collections::BTreeMap;

use crate::config::ValidatedConfig;
use crate::escape::encode_uri_component;
use crate::figma::FigmaIndex;

/// Resolves `(display name, source folder)` to a Figma deep link.
///
/// Every miss (unmapped folder, unknown document, name not in the index)
/// yields `None`; callers render that as "no deep link".
#[derive(Debug, Clone)]
pub struct UrlResolver {
    folder_documents: BTreeMap<String, String>,
    document_files: BTreeMap<String, String>,
    index: FigmaIndex,
    base_url: String,
}

impl UrlResolver {
    pub fn new(
        folder_documents: BTreeMap<String, String>,
        document_files: BTreeMap<String, String>,
        index: FigmaIndex,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            folder_documents,
            document_files,
            index,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ValidatedConfig, index: FigmaIndex) -> Self {
        Self::new(
            config.config.folders.clone(),
            config.file_ids.clone(),
            index,
            config.config.figma_base_url.clone(),
        )
    }

    pub fn resolve(&self, display_name: &str, source_folder: &str) -> Option<String> {
        let document = self.folder_documents.get(source_folder)?;
        let file_id = self.document_files.get(document)?;
        let node_id = self.index.lookup(file_id, display_name)?;
        Some(deep_link(&self.base_url, file_id, node_id))
    }

    pub fn index(&self) -> &FigmaIndex {
        &self.index
    }
}

/// `<base>/design/<file id>/?node-id=<encoded node id>`.
pub fn deep_link(base_url: &str, file_id: &str, node_id: &str) -> String {
    format!(
        "{}/design/{}/?node-id={}",
        base_url.trim_end_matches('/'),
        file_id,
        encode_uri_component(node_id)
    )
}
