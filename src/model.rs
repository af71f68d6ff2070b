//! The catalog model: sections of subsections of screens, plus aggregates.
//!
//! Built as a pure fold over the configured sections. Each subsection is
//! loaded independently and counts are reductions over the finished model,
//! so the same inputs always produce the same model.

use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::catalog::{load_catalog, CatalogRequest, ScreenImage, SkipRules};
use crate::config::{SectionConfig, SubsectionConfig, ValidatedConfig};
use crate::types::Platform;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subsection {
    pub label: String,
    /// Element id of the subsection block; also keys its sidebar link.
    pub anchor_id: String,
    pub folder: String,
    pub images: Vec<ScreenImage>,
}

impl Subsection {
    pub fn screen_count(&self) -> usize {
        self.images.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub label: String,
    pub codebase: String,
    pub platform: Platform,
    pub color: String,
    pub subsections: Vec<Subsection>,
}

impl Section {
    pub fn screen_count(&self) -> usize {
        self.subsections.iter().map(Subsection::screen_count).sum()
    }

    pub fn screens(&self) -> impl Iterator<Item = &ScreenImage> {
        self.subsections.iter().flat_map(|sub| sub.images.iter())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PlatformCounts {
    pub web: usize,
    pub mobile: usize,
}

impl PlatformCounts {
    pub fn get(&self, platform: Platform) -> usize {
        match platform {
            Platform::Web => self.web,
            Platform::Mobile => self.mobile,
        }
    }

    fn add(self, platform: Platform, count: usize) -> Self {
        match platform {
            Platform::Web => Self {
                web: self.web + count,
                ..self
            },
            Platform::Mobile => Self {
                mobile: self.mobile + count,
                ..self
            },
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryTotals {
    pub screens: usize,
    pub sections: usize,
    pub subsections: usize,
    pub per_platform: PlatformCounts,
}

impl GalleryTotals {
    pub fn from_sections(sections: &[Section]) -> Self {
        sections.iter().fold(
            GalleryTotals {
                sections: sections.len(),
                ..GalleryTotals::default()
            },
            |acc, section| {
                let count = section.screen_count();
                GalleryTotals {
                    screens: acc.screens + count,
                    subsections: acc.subsections + section.subsections.len(),
                    per_platform: acc.per_platform.add(section.platform, count),
                    ..acc
                }
            },
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryModel {
    pub sections: Vec<Section>,
    pub totals: GalleryTotals,
}

impl GalleryModel {
    pub fn new(sections: Vec<Section>) -> Self {
        let totals = GalleryTotals::from_sections(&sections);
        Self { sections, totals }
    }

    /// Logs total, per-section and per-subsection counts.
    pub fn log_summary(&self) {
        info!(screens = self.totals.screens, "total screens");
        for section in &self.sections {
            info!(section = %section.label, screens = section.screen_count(), "section");
            for sub in &section.subsections {
                info!(
                    section = %section.label,
                    subsection = %sub.label,
                    screens = sub.screen_count(),
                    "subsection"
                );
            }
        }
    }
}

/// Anchor id for the `index`-th subsection of a section.
pub fn subsection_anchor(section_id: &str, index: usize) -> String {
    format!("{section_id}--sub{index}")
}

fn relative_folder(asset_prefix: &str, folder: &str) -> String {
    let prefix = asset_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        folder.to_string()
    } else {
        format!("{prefix}/{folder}")
    }
}

pub fn build_subsection(
    section_id: &str,
    index: usize,
    config: &SubsectionConfig,
    rules: &SkipRules,
    image_root: &Path,
    asset_prefix: &str,
) -> Subsection {
    let folder_path = image_root.join(&config.folder);
    let relative = relative_folder(asset_prefix, &config.folder);
    let images = load_catalog(&CatalogRequest {
        folder_path: &folder_path,
        relative_folder: &relative,
        source_folder: &config.folder,
        name_style: config.name_style,
        rules,
    });
    Subsection {
        label: config.label.clone(),
        anchor_id: subsection_anchor(section_id, index),
        folder: config.folder.clone(),
        images,
    }
}

pub fn build_section(
    config: &SectionConfig,
    rules: &[SkipRules],
    image_root: &Path,
    asset_prefix: &str,
) -> Section {
    let subsections = config
        .subsections
        .iter()
        .zip(rules)
        .enumerate()
        .map(|(i, (sub, rules))| {
            build_subsection(&config.id, i, sub, rules, image_root, asset_prefix)
        })
        .collect();
    Section {
        id: config.id.clone(),
        label: config.label.clone(),
        codebase: config.codebase.clone(),
        platform: config.platform,
        color: config.color.clone(),
        subsections,
    }
}

/// Loads every configured subsection from `config.image_root`.
pub fn build_model(config: &ValidatedConfig) -> GalleryModel {
    let cfg = &config.config;
    let sections = cfg
        .sections
        .iter()
        .zip(&config.skip_rules)
        .map(|(section, rules)| build_section(section, rules, &cfg.image_root, &cfg.asset_prefix))
        .collect();
    GalleryModel::new(sections)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;
    use crate::types::NameStyle;
    use std::fs;
    use tempfile::TempDir;

    fn section(id: &str, platform: Platform, folders: &[&str]) -> SectionConfig {
        SectionConfig {
            id: id.to_string(),
            label: id.to_uppercase(),
            codebase: "repo".to_string(),
            platform,
            color: "#000000".to_string(),
            subsections: folders
                .iter()
                .map(|f| SubsectionConfig {
                    label: f.to_string(),
                    folder: f.to_string(),
                    name_style: NameStyle::Plain,
                    skip_numeric: true,
                    skip_patterns: vec![],
                })
                .collect(),
        }
    }

    fn write_images(root: &Path, folder: &str, names: &[&str]) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).expect("mkdir");
        for name in names {
            fs::write(dir.join(name), b"png").expect("write");
        }
    }

    fn config(root: &Path) -> ValidatedConfig {
        GalleryConfig {
            image_root: root.to_path_buf(),
            asset_prefix: "shots".to_string(),
            sections: vec![
                section("web", Platform::Web, &["dash", "missing"]),
                section("app", Platform::Mobile, &["login"]),
            ],
            ..GalleryConfig::default()
        }
        .validate()
        .expect("valid config")
    }

    #[test]
    fn builds_sections_and_aggregates() {
        let dir = TempDir::new().expect("tempdir");
        write_images(dir.path(), "dash", &["Overview.png", "Reports.png", "1.png"]);
        write_images(dir.path(), "login", &["Login Screen.png"]);

        let model = build_model(&config(dir.path()));

        assert_eq!(model.sections.len(), 2);
        assert_eq!(model.sections[0].subsections[0].screen_count(), 2);
        assert_eq!(model.sections[0].subsections[1].screen_count(), 0);
        assert_eq!(model.sections[0].subsections[1].anchor_id, "web--sub1");
        assert_eq!(
            model.totals,
            GalleryTotals {
                screens: 3,
                sections: 2,
                subsections: 3,
                per_platform: PlatformCounts { web: 2, mobile: 1 },
            }
        );
        assert_eq!(
            model.sections[1].subsections[0].images[0].relative_path,
            "shots/login/Login Screen.png"
        );
    }

    #[test]
    fn model_is_deterministic() {
        let dir = TempDir::new().expect("tempdir");
        write_images(dir.path(), "dash", &["b.png", "A.png", "c.png"]);
        let cfg = config(dir.path());
        assert_eq!(build_model(&cfg), build_model(&cfg));
    }

    #[test]
    fn totals_of_empty_model() {
        let totals = GalleryTotals::from_sections(&[]);
        assert_eq!(totals, GalleryTotals::default());
    }

    #[test]
    fn platform_counts_lookup() {
        let counts = PlatformCounts { web: 4, mobile: 9 };
        assert_eq!(counts.get(Platform::Web), 4);
        assert_eq!(counts.get(Platform::Mobile), 9);
    }
}
