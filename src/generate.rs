//! End-to-end generation: validated config in, page and run summary out.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::config::ValidatedConfig;
use crate::error::{GalleryError, Result};
use crate::figma::{build_index, IndexOptions};
use crate::model::{build_model, GalleryModel};
use crate::output::{section_summaries, LinkCoverage, RunSummary, TotalsSummary};
use crate::render::{render_page, PageText};
use crate::resolver::UrlResolver;

/// Model and resolver for one run.
#[derive(Debug, Clone)]
pub struct PreparedGallery {
    pub model: GalleryModel,
    pub resolver: UrlResolver,
}

impl PreparedGallery {
    /// Builds the Figma index, then the model. Nothing is written.
    pub fn prepare(config: &ValidatedConfig) -> Result<Self> {
        let cfg = &config.config;
        let index = build_index(
            &config.file_ids,
            &IndexOptions {
                metadata_dir: cfg.metadata_dir.clone(),
                lenient: cfg.lenient_metadata,
            },
        )?;
        debug!(entries = index.total_entries(), "Figma index ready");

        let model = build_model(config);
        model.log_summary();

        Ok(Self {
            model,
            resolver: UrlResolver::from_config(config, index),
        })
    }

    pub fn link_coverage(&self) -> LinkCoverage {
        let mut coverage = LinkCoverage::default();
        for screen in self.model.sections.iter().flat_map(|s| s.screens()) {
            coverage.record(
                self.resolver
                    .resolve(&screen.display_name, &screen.source_folder)
                    .is_some(),
            );
        }
        coverage
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            totals: TotalsSummary::from(&self.model.totals),
            sections: section_summaries(&self.model),
            deep_links: self.link_coverage(),
            index_entries: self.resolver.index().entry_counts(),
        }
    }

    pub fn render(&self, text: &PageText) -> Result<String> {
        render_page(&self.model, &self.resolver, text)
    }
}

/// Result of a build: where the page went and what it contains.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub bytes: usize,
    pub summary: RunSummary,
}

/// Writes `html` to `path`, creating parent directories.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    if path.is_dir() {
        return Err(GalleryError::Output(format!(
            "{} is a directory",
            path.display()
        )));
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}

/// Prepares, renders and writes the page to `config.output`.
pub fn build(config: &ValidatedConfig) -> Result<BuildReport> {
    let gallery = PreparedGallery::prepare(config)?;
    let html = gallery.render(&PageText::from_config(&config.config))?;
    let output = &config.config.output;
    write_page(output, &html)?;
    info!(
        path = %output.display(),
        kib = %format!("{:.1}", html.len() as f64 / 1024.0),
        "gallery written"
    );
    Ok(BuildReport {
        bytes: html.len(),
        summary: gallery.summary(),
    })
}

/// Prepares everything a build would, without writing.
pub fn check(config: &ValidatedConfig) -> Result<RunSummary> {
    Ok(PreparedGallery::prepare(config)?.summary())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GalleryConfig, SectionConfig, SubsectionConfig};
    use crate::types::{NameStyle, Platform};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    const EXPORT: &str = r#"{"document":{"children":[{"id":"0:1","name":"Page","children":[
        {"id":"10:1","name":"Active Offices","type":"FRAME"}
    ]}]}}"#;

    fn config(root: &Path) -> ValidatedConfig {
        let images = root.join("images");
        fs::create_dir_all(images.join("offices")).expect("mkdir");
        fs::write(images.join("offices/Active_Offices_10-1.png"), b"png").expect("write");
        fs::write(images.join("offices/Unlinked_Screen_1-1.png"), b"png").expect("write");
        let metadata = root.join("meta");
        fs::create_dir_all(&metadata).expect("mkdir");
        fs::write(metadata.join("web.json"), EXPORT).expect("write");

        GalleryConfig {
            image_root: images,
            metadata_dir: metadata,
            output: root.join("out/gallery.html"),
            asset_prefix: "images".to_string(),
            documents: BTreeMap::from([("web".to_string(), "FILEKEY".to_string())]),
            folders: BTreeMap::from([("offices".to_string(), "web".to_string())]),
            sections: vec![SectionConfig {
                id: "web".to_string(),
                label: "Web".to_string(),
                codebase: String::new(),
                platform: Platform::Web,
                color: "#2D4F7E".to_string(),
                subsections: vec![SubsectionConfig {
                    label: "Offices".to_string(),
                    folder: "offices".to_string(),
                    name_style: NameStyle::NodeId,
                    skip_numeric: true,
                    skip_patterns: vec![],
                }],
            }],
            ..GalleryConfig::default()
        }
        .validate()
        .expect("valid config")
    }

    #[test]
    fn build_writes_page_and_reports_coverage() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = config(dir.path());

        let report = build(&cfg).expect("build");

        let html = fs::read_to_string(dir.path().join("out/gallery.html")).expect("read page");
        assert_eq!(report.bytes, html.len());
        assert!(html.contains("node-id=10%3A1"));
        assert_eq!(report.summary.totals.screens, 2);
        assert_eq!(
            report.summary.deep_links,
            LinkCoverage {
                linked: 1,
                unlinked: 1
            }
        );
        assert_eq!(report.summary.index_entries.get("FILEKEY"), Some(&1));
    }

    #[test]
    fn check_writes_nothing() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = config(dir.path());
        let summary = check(&cfg).expect("check");
        assert_eq!(summary.sections[0].subsections[0].screens, 2);
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn malformed_metadata_aborts_build() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = config(dir.path());
        fs::write(dir.path().join("meta/web.json"), "{").expect("write");
        let err = build(&cfg).expect_err("malformed metadata");
        assert!(matches!(err, GalleryError::Metadata { .. }));
        assert!(!dir.path().join("out/gallery.html").exists());
    }

    #[test]
    fn nested_folders_keep_their_deep_links() {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path();
        for folder in ["web/old-ui", "mobile/old-ui"] {
            let path = root.join("images").join(folder);
            fs::create_dir_all(&path).expect("mkdir");
            fs::write(path.join("Active_Offices_10-1.png"), b"png").expect("write");
        }
        let metadata = root.join("meta");
        fs::create_dir_all(&metadata).expect("mkdir");
        fs::write(metadata.join("web.json"), EXPORT).expect("write");

        let subsection = |folder: &str| SubsectionConfig {
            label: folder.to_string(),
            folder: folder.to_string(),
            name_style: NameStyle::NodeId,
            skip_numeric: true,
            skip_patterns: vec![],
        };
        let cfg = GalleryConfig {
            image_root: root.join("images"),
            metadata_dir: metadata,
            output: root.join("out/gallery.html"),
            asset_prefix: "images".to_string(),
            documents: BTreeMap::from([("web".to_string(), "FILEKEY".to_string())]),
            folders: BTreeMap::from([("web/old-ui".to_string(), "web".to_string())]),
            sections: vec![SectionConfig {
                id: "web".to_string(),
                label: "Web".to_string(),
                codebase: String::new(),
                platform: Platform::Web,
                color: "#2D4F7E".to_string(),
                subsections: vec![subsection("web/old-ui"), subsection("mobile/old-ui")],
            }],
            ..GalleryConfig::default()
        }
        .validate()
        .expect("valid config");

        let gallery = PreparedGallery::prepare(&cfg).expect("prepare");
        let subs = &gallery.model.sections[0].subsections;
        assert_eq!(subs[0].images[0].source_folder, "web/old-ui");
        assert_eq!(
            gallery.resolver.resolve("Active Offices", &subs[0].images[0].source_folder),
            Some("https://www.figma.com/design/FILEKEY/?node-id=10%3A1".to_string())
        );
        assert_eq!(
            gallery.resolver.resolve("Active Offices", &subs[1].images[0].source_folder),
            None
        );
        assert_eq!(
            gallery.link_coverage(),
            LinkCoverage {
                linked: 1,
                unlinked: 1
            }
        );
    }

    #[test]
    fn write_page_rejects_directory() {
        let dir = TempDir::new().expect("tempdir");
        let err = write_page(dir.path(), "<html>").expect_err("directory target");
        assert!(matches!(err, GalleryError::Output(_)));
    }
}
