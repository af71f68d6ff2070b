//! Shapes of exported Figma document JSON (the `GET /v1/files/:key` payload).
//!
//! Only the first three tree levels are modelled: pages, their direct
//! children, and the children of `SECTION` nodes. Every other field in the
//! export is ignored.

use serde::{Deserialize, Deserializer};

/// Node type of a grouping container whose children are indexed too.
pub const SECTION_NODE_TYPE: &str = "SECTION";

/// A saved Figma file export.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FigmaFileExport {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub document: Option<FigmaDocument>,
}

impl FigmaFileExport {
    pub fn pages(&self) -> &[FigmaPage] {
        self.document
            .as_ref()
            .map(|doc| doc.children.as_slice())
            .unwrap_or(&[])
    }
}

/// The root `DOCUMENT` node.
#[derive(Debug, Default, Deserialize)]
pub struct FigmaDocument {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<FigmaPage>,
}

/// A `CANVAS` node (one page of the file).
#[derive(Debug, Default, Deserialize)]
pub struct FigmaPage {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<FigmaNodeData>,
}

/// A top-level node on a page: usually a frame, sometimes a section.
#[derive(Debug, Default, Deserialize)]
pub struct FigmaNodeData {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub node_type: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<FigmaChildNode>,
}

impl FigmaNodeData {
    pub fn is_section(&self) -> bool {
        self.node_type.as_deref() == Some(SECTION_NODE_TYPE)
    }
}

/// A node nested one level below a page child. Its own subtree is skipped.
#[derive(Debug, Default, Deserialize)]
pub struct FigmaChildNode {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}
