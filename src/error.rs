use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GalleryError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid skip pattern '{pattern}' in subsection '{subsection}': {source}")]
    Pattern {
        subsection: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("Malformed Figma metadata {}: {source}", path.display())]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    Output(String),
}

impl GalleryError {
    pub fn config(message: impl Into<String>) -> Self {
        GalleryError::Config(message.into())
    }

    pub fn metadata(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        GalleryError::Metadata {
            path: path.into(),
            source,
        }
    }

    pub fn to_payload(&self) -> ErrorPayload {
        match self {
            GalleryError::Io(e) => ErrorPayload::new(
                ErrorCategory::Io,
                e.to_string(),
                "Check file paths/permissions for the output file and its directory.",
            ),
            GalleryError::Config(msg) => {
                let lower = msg.to_ascii_lowercase();
                if lower.contains("duplicate section id") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Give every [[sections]] entry a unique id; ids become page anchors.",
                    )
                } else if lower.contains("folder") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Set `folder` on every [[sections.subsections]] entry to a directory name under the image root.",
                    )
                } else if lower.contains("color") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a hex accent color such as #2D4F7E or #fff.",
                    )
                } else if lower.contains("file key") || lower.contains("figma url") {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Use a bare file key or a URL like https://www.figma.com/design/<FILE_KEY>/... in [documents].",
                    )
                } else if lower.contains("failed to read config") || lower.contains("parse config")
                {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check that the --config file exists and is valid TOML.",
                    )
                } else {
                    ErrorPayload::new(
                        ErrorCategory::Config,
                        msg.to_string(),
                        "Check gallery.toml (or --config) sections, subsections and tables.",
                    )
                }
            }
            GalleryError::Pattern { .. } => ErrorPayload::new(
                ErrorCategory::Config,
                self.to_string(),
                "Skip patterns are regular expressions matched against file names; escape literal dots and brackets.",
            ),
            GalleryError::Metadata { .. } => ErrorPayload::new(
                ErrorCategory::Metadata,
                self.to_string(),
                "Re-export the document JSON, remove it, or pass --lenient-metadata to skip unreadable documents.",
            ),
            GalleryError::Serialization(e) => ErrorPayload::new(
                ErrorCategory::Render,
                e.to_string(),
                "Re-run with --verbose; file an issue if persistent.",
            ),
            GalleryError::Output(msg) => ErrorPayload::new(
                ErrorCategory::Io,
                msg.to_string(),
                "Point `output` (or --output) at an .html file path, not a directory.",
            ),
        }
    }
}

pub type Result<T> = std::result::Result<T, GalleryError>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Config,
    Metadata,
    Io,
    Render,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remediation: Option<String>,
}

impl ErrorPayload {
    pub fn new(category: ErrorCategory, message: String, remediation: impl Into<String>) -> Self {
        Self {
            category,
            message,
            remediation: Some(remediation.into()),
        }
    }
}
