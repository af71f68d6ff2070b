use std::collections::{BTreeMap, HashSet};
use std::path::{Component, Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;
use url::Url;

use crate::catalog::SkipRules;
use crate::figma::parse_file_reference;
use crate::types::{NameStyle, Platform};
use crate::{GalleryError, Result};

/// File name picked up from the working directory when `--config` is absent.
pub const LOCAL_CONFIG_FILE: &str = "gallery.toml";

pub const DEFAULT_FIGMA_BASE_URL: &str = "https://www.figma.com";

/// Declarative description of the catalog: where inputs live, which folders
/// make up which sections, and how folders map to Figma files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalleryConfig {
    /// `<title>` and sidebar heading.
    pub title: String,
    /// Hero banner heading.
    pub heading: String,
    pub tagline: String,
    /// Directory holding one subdirectory per subsection folder.
    pub image_root: PathBuf,
    /// Directory holding `<document key>.json` Figma exports.
    pub metadata_dir: PathBuf,
    /// Path of the generated page.
    pub output: PathBuf,
    /// Prefix joined before `<folder>/<file>` in image URLs, relative to the page.
    pub asset_prefix: String,
    pub figma_base_url: String,
    /// Skip malformed exports instead of failing the run.
    pub lenient_metadata: bool,
    /// Document key → Figma file key (or a Figma URL containing it).
    pub documents: BTreeMap<String, String>,
    /// Image folder → document key.
    pub folders: BTreeMap<String, String>,
    pub sections: Vec<SectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SectionConfig {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub codebase: String,
    pub platform: Platform,
    pub color: String,
    pub subsections: Vec<SubsectionConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubsectionConfig {
    pub label: String,
    pub folder: String,
    #[serde(default)]
    pub name_style: NameStyle,
    #[serde(default)]
    pub skip_numeric: bool,
    /// Regular expressions matched against the full file name.
    #[serde(default)]
    pub skip_patterns: Vec<String>,
}

impl SubsectionConfig {
    fn plain(label: &str, folder: &str) -> Self {
        Self {
            label: label.to_string(),
            folder: folder.to_string(),
            name_style: NameStyle::Plain,
            skip_numeric: false,
            skip_patterns: Vec::new(),
        }
    }

    /// Compiles the skip patterns for this subsection.
    pub fn skip_rules(&self) -> Result<SkipRules> {
        let patterns = self
            .skip_patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|source| GalleryError::Pattern {
                    subsection: self.label.clone(),
                    pattern: pattern.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SkipRules {
            skip_numeric: self.skip_numeric,
            patterns,
        })
    }
}

#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("{0}")]
    Read(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] toml::de::Error),
}

/// Configuration after validation, with derived lookup tables.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    pub config: GalleryConfig,
    /// Document key → bare Figma file key.
    pub file_ids: BTreeMap<String, String>,
    /// Compiled skip rules, indexed `[section][subsection]`.
    pub skip_rules: Vec<Vec<SkipRules>>,
}

impl GalleryConfig {
    /// Explicit path > `gallery.toml` in the working directory > built-in defaults.
    pub fn load(path: Option<&Path>) -> std::result::Result<Self, ConfigLoadError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        let local = Self::local_config_path();
        if local.is_file() {
            return Self::from_file(&local);
        }
        Ok(Self::default())
    }

    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_CONFIG_FILE)
    }

    pub fn from_file(path: &Path) -> std::result::Result<Self, ConfigLoadError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> std::result::Result<Self, ConfigLoadError> {
        Ok(toml::from_str(raw)?)
    }

    /// Checks the structure once before any discovery runs.
    pub fn validate(self) -> Result<ValidatedConfig> {
        if self.sections.is_empty() {
            return Err(GalleryError::config("Configuration defines no sections"));
        }

        let mut seen_ids = HashSet::new();
        let mut skip_rules = Vec::with_capacity(self.sections.len());
        for section in &self.sections {
            validate_section(section)?;
            if !seen_ids.insert(section.id.as_str()) {
                return Err(GalleryError::config(format!(
                    "Duplicate section id '{}' in configuration",
                    section.id
                )));
            }
            skip_rules.push(
                section
                    .subsections
                    .iter()
                    .map(SubsectionConfig::skip_rules)
                    .collect::<Result<Vec<_>>>()?,
            );
        }

        let base = Url::parse(&self.figma_base_url).map_err(|e| {
            GalleryError::config(format!(
                "Invalid figma_base_url '{}': {e}",
                self.figma_base_url
            ))
        })?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(GalleryError::config(format!(
                "figma_base_url must be http(s), got '{}'",
                self.figma_base_url
            )));
        }

        let mut file_ids = BTreeMap::new();
        for (key, reference) in &self.documents {
            let parsed = parse_file_reference(reference).map_err(|e| {
                GalleryError::config(format!("Document '{key}' has a bad Figma file key: {e}"))
            })?;
            file_ids.insert(key.clone(), parsed.file_key);
        }

        for (folder, key) in &self.folders {
            if !file_ids.contains_key(key) {
                warn!(
                    folder = %folder,
                    document = %key,
                    "folder mapped to an undefined document; its screens get no deep links"
                );
            }
        }

        Ok(ValidatedConfig {
            config: self,
            file_ids,
            skip_rules,
        })
    }
}

fn validate_section(section: &SectionConfig) -> Result<()> {
    if section.id.is_empty()
        || !section
            .id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(GalleryError::config(format!(
            "Section id '{}' must be non-empty and use only letters, digits, '-' or '_'",
            section.id
        )));
    }
    if section.label.trim().is_empty() {
        return Err(GalleryError::config(format!(
            "Section '{}' has an empty label",
            section.id
        )));
    }
    if !is_hex_color(&section.color) {
        return Err(GalleryError::config(format!(
            "Section '{}' has invalid accent color '{}'",
            section.id, section.color
        )));
    }
    if section.subsections.is_empty() {
        return Err(GalleryError::config(format!(
            "Section '{}' has no subsections",
            section.id
        )));
    }
    for sub in &section.subsections {
        if sub.label.trim().is_empty() {
            return Err(GalleryError::config(format!(
                "Section '{}' has a subsection with an empty label",
                section.id
            )));
        }
        if !is_relative_folder(&sub.folder) {
            return Err(GalleryError::config(format!(
                "Subsection '{}' in section '{}' needs a relative folder under the image root, got '{}'",
                sub.label, section.id, sub.folder
            )));
        }
    }
    Ok(())
}

fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

fn is_relative_folder(folder: &str) -> bool {
    if folder.trim().is_empty() {
        return false;
    }
    Path::new(folder)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
}

const LOANBOOK_WEB_SKIP: &[&str] = &[
    r"^👉",
    r"(?i)^Frame \d",
    r"(?i)^Line \d",
    r"(?i)^Vector \d",
    r"(?i)^Untitled(-\d+)?\.png$",
    r"(?i)^Group \d",
    r"(?i)^Hover State\.png$",
    r"(?i)^Saved\.png$",
    r"(?i)^B\.png$",
    r"(?i)^\d+(\.\d+)?(-\d+)?\.png$",
    r"(?i)^pointer\.png$",
    r"(?i)^alert-circle\.png$",
    r"(?i)^Added this as a separate step",
];

fn default_sections() -> Vec<SectionConfig> {
    vec![
        SectionConfig {
            id: "web-old-ui".to_string(),
            label: "Web Platform — Old UI".to_string(),
            codebase: "Kotak on-prem".to_string(),
            platform: Platform::Web,
            color: "#2D4F7E".to_string(),
            subsections: vec![SubsectionConfig {
                name_style: NameStyle::NodeId,
                ..SubsectionConfig::plain("All Screens", "web-platform-old-ui")
            }],
        },
        SectionConfig {
            id: "field-staff".to_string(),
            label: "Loanbook Field Staff".to_string(),
            codebase: "Digamber + Kotak SaaS · Mobile".to_string(),
            platform: Platform::Mobile,
            color: "#003366".to_string(),
            subsections: vec![
                SubsectionConfig::plain("Collections", "Loanbook Field Staff -  Collection - PNG"),
                SubsectionConfig::plain(
                    "Overdues",
                    "Loanbook Field Staff - Collection - Overdue - PNG",
                ),
                SubsectionConfig::plain("Search", "Loanbook Field Staff - Search - PNG"),
                SubsectionConfig::plain("Sourcing", "Loanbook Field Staff - Sourcing - PNG"),
                SubsectionConfig {
                    skip_numeric: true,
                    ..SubsectionConfig::plain(
                        "All Individual Screens",
                        "Loanbook Field Staff - Complete",
                    )
                },
            ],
        },
        SectionConfig {
            id: "loanbook-web".to_string(),
            label: "Loanbook Web".to_string(),
            codebase: "Digamber + Kotak SaaS · Web".to_string(),
            platform: Platform::Web,
            color: "#1F497D".to_string(),
            subsections: vec![SubsectionConfig {
                skip_patterns: LOANBOOK_WEB_SKIP.iter().map(|p| p.to_string()).collect(),
                ..SubsectionConfig::plain("All Screens", "Loanbook Web - new UI")
            }],
        },
        SectionConfig {
            id: "income-web".to_string(),
            label: "Income Assessment — Web".to_string(),
            codebase: "Loanbook Web · HHI Module".to_string(),
            platform: Platform::Web,
            color: "#4A7CB5".to_string(),
            subsections: vec![SubsectionConfig::plain(
                "All Screens",
                "Loanbook Web - Income",
            )],
        },
        SectionConfig {
            id: "income-mobile".to_string(),
            label: "Income Assessment — Mobile".to_string(),
            codebase: "Loanbook Field Staff · HHI Module".to_string(),
            platform: Platform::Mobile,
            color: "#2196F3".to_string(),
            subsections: vec![SubsectionConfig::plain(
                "All Screens",
                "Loanbook Mobile - Income assessment",
            )],
        },
    ]
}

fn default_documents() -> BTreeMap<String, String> {
    [
        ("web-platform-old-ui", "qEMRRpn8rPa2hbjTS0HnVl"),
        ("loanbook-field-staff", "ynrZ50gvTh5yb20gwciKcI"),
        ("loanbook-web", "9PNXDkvwtrjSLDfg9QCR89"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_folders() -> BTreeMap<String, String> {
    [
        ("web-platform-old-ui", "web-platform-old-ui"),
        ("Loanbook Field Staff -  Collection - PNG", "loanbook-field-staff"),
        (
            "Loanbook Field Staff - Collection - Overdue - PNG",
            "loanbook-field-staff",
        ),
        ("Loanbook Field Staff - Search - PNG", "loanbook-field-staff"),
        ("Loanbook Field Staff - Sourcing - PNG", "loanbook-field-staff"),
        ("Loanbook Field Staff - Complete", "loanbook-field-staff"),
        ("Loanbook Web - new UI", "loanbook-web"),
        ("Loanbook Web - Income", "loanbook-web"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            title: "MFI Design Gallery".to_string(),
            heading: "MFI Platform Design Gallery".to_string(),
            tagline: "All screens from Figma, served locally, no Figma API key needed"
                .to_string(),
            image_root: PathBuf::from("docs/figma-images"),
            metadata_dir: PathBuf::from("docs/figma-json"),
            output: PathBuf::from("docs/figma-gallery.html"),
            asset_prefix: "figma-images".to_string(),
            figma_base_url: DEFAULT_FIGMA_BASE_URL.to_string(),
            lenient_metadata: false,
            documents: default_documents(),
            folders: default_folders(),
            sections: default_sections(),
        }
    }
}
