//! Screen Gallery Library
//!
//! Turns folders of exported design screenshots, plus optional Figma file
//! exports, into one self-contained HTML catalog page with search, platform
//! filtering, grid density, a lightbox and deep links back into Figma.
//!
//! # Module Overview
//!
//! - [`catalog`] - Per-folder image discovery, skip rules and display names
//! - [`figma`] - Offline Figma export parsing and name → node-id indexing
//! - [`resolver`] - Deep links from screen names to Figma nodes
//! - [`model`] - Sections, subsections and aggregate counts
//! - [`render`] - The page itself (markup tree, stylesheet, client script)
//! - [`runtime`] - Interaction state model mirrored by the client script
//! - [`config`] - Declarative catalog layout (TOML)
//! - [`output`] - JSON run-summary schemas
//!
//! # Example
//!
//! ```no_run
//! use gallery_lib::{build, GalleryConfig};
//!
//! # fn example() -> gallery_lib::Result<()> {
//! let config = GalleryConfig::default().validate()?;
//! let report = build(&config)?;
//! println!("{} screens", report.summary.totals.screens);
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod escape;
pub mod figma;
pub mod generate;
pub mod model;
pub mod output;
pub mod render;
pub mod resolver;
pub mod runtime;
pub mod types;

pub use catalog::{display_name, load_catalog, CatalogRequest, ScreenImage, SkipRules};
pub use config::{
    ConfigLoadError, GalleryConfig, SectionConfig, SubsectionConfig, ValidatedConfig,
    DEFAULT_FIGMA_BASE_URL, LOCAL_CONFIG_FILE,
};
pub use error::{ErrorCategory, ErrorPayload, GalleryError, Result};
pub use figma::{build_index, normalized_name, DocumentIndex, FigmaIndex, IndexOptions};
pub use generate::{build, check, write_page, BuildReport, PreparedGallery};
pub use model::{build_model, GalleryModel, GalleryTotals, Section, Subsection};
pub use output::{
    BuildOutput, CheckOutput, ErrorOutput, GalleryOutput, LinkCoverage, RunSummary,
    GALLERY_OUTPUT_VERSION,
};
pub use render::{render_page, PageText};
pub use resolver::UrlResolver;
pub use runtime::{GalleryController, PlatformFilter, Viewer};
pub use types::{Dimensions, GridMode, NameStyle, Platform};
