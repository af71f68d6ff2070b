use crate::error::ErrorPayload;
use crate::model::{GalleryModel, GalleryTotals};
use crate::types::Platform;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Schema version for output payloads.
pub const GALLERY_OUTPUT_VERSION: &str = "0.1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum GalleryOutput {
    Build(BuildOutput),
    Check(CheckOutput),
    Error(ErrorOutput),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOutput {
    pub version: String,
    pub output_path: PathBuf,
    pub bytes: usize,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckOutput {
    pub version: String,
    pub summary: RunSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorOutput {
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub error: ErrorPayload,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub totals: TotalsSummary,
    pub sections: Vec<SectionSummary>,
    pub deep_links: LinkCoverage,
    /// Index entries per Figma file id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub index_entries: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSummary {
    pub screens: usize,
    pub sections: usize,
    pub subsections: usize,
    pub web: usize,
    pub mobile: usize,
}

impl From<&GalleryTotals> for TotalsSummary {
    fn from(totals: &GalleryTotals) -> Self {
        Self {
            screens: totals.screens,
            sections: totals.sections,
            subsections: totals.subsections,
            web: totals.per_platform.web,
            mobile: totals.per_platform.mobile,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub id: String,
    pub label: String,
    pub platform: Platform,
    pub screens: usize,
    pub subsections: Vec<SubsectionSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubsectionSummary {
    pub label: String,
    pub folder: String,
    pub screens: usize,
}

/// Screens with and without a resolved deep link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCoverage {
    pub linked: usize,
    pub unlinked: usize,
}

impl LinkCoverage {
    pub fn record(&mut self, linked: bool) {
        if linked {
            self.linked += 1;
        } else {
            self.unlinked += 1;
        }
    }
}

pub fn section_summaries(model: &GalleryModel) -> Vec<SectionSummary> {
    model
        .sections
        .iter()
        .map(|section| SectionSummary {
            id: section.id.clone(),
            label: section.label.clone(),
            platform: section.platform,
            screens: section.screen_count(),
            subsections: section
                .subsections
                .iter()
                .map(|sub| SubsectionSummary {
                    label: sub.label.clone(),
                    folder: sub.folder.clone(),
                    screens: sub.screen_count(),
                })
                .collect(),
        })
        .collect()
}
