//! Core types shared by the catalog, model, renderer and client runtime.
//!
//! - [`Platform`] - Section classification inherited by every screen
//! - [`NameStyle`] - How display names are derived from file names
//! - [`GridMode`] - Card grid density in the generated page
//! - [`Dimensions`] - Pixel size read from an image header

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Platform tag of a section; every screen inherits its section's tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Platform {
    Web,
    Mobile,
}

impl Platform {
    pub const fn all() -> [Platform; 2] {
        [Platform::Web, Platform::Mobile]
    }

    /// Tag used in markup (`data-platform`) and in the client runtime.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Web => "WEB",
            Platform::Mobile => "MOBILE",
        }
    }

    /// Lowercase variant used for CSS classes and counter suffixes.
    pub fn css_class(&self) -> &'static str {
        match self {
            Platform::Web => "web",
            Platform::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeParseError {
    #[error("Unknown platform '{0}' (expected WEB or MOBILE)")]
    Platform(String),
    #[error("Unknown name style '{0}' (expected node-id or plain)")]
    NameStyle(String),
    #[error("Unknown grid mode '{0}' (expected comfortable, compact or list)")]
    GridMode(String),
}

impl FromStr for Platform {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "WEB" => Ok(Platform::Web),
            "MOBILE" => Ok(Platform::Mobile),
            _ => Err(TypeParseError::Platform(s.to_string())),
        }
    }
}

/// Display-name derivation style for a subsection's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NameStyle {
    /// `Active_Offices_2659-3065.png`: strip the trailing node-id suffix.
    NodeId,
    /// `Loan_Summary_Screen.png`: underscores become spaces.
    #[default]
    Plain,
}

impl FromStr for NameStyle {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "node-id" | "node_id" | "nodeid" => Ok(NameStyle::NodeId),
            "plain" => Ok(NameStyle::Plain),
            _ => Err(TypeParseError::NameStyle(s.to_string())),
        }
    }
}

/// Card grid density. Only relabels the layout class; never affects visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridMode {
    #[default]
    Comfortable,
    Compact,
    List,
}

impl GridMode {
    pub const fn all() -> [GridMode; 3] {
        [GridMode::Comfortable, GridMode::Compact, GridMode::List]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GridMode::Comfortable => "comfortable",
            GridMode::Compact => "compact",
            GridMode::List => "list",
        }
    }

    /// Extra class applied to every `.grid`; comfortable is the bare class.
    pub fn grid_class(&self) -> Option<&'static str> {
        match self {
            GridMode::Comfortable => None,
            GridMode::Compact => Some("compact"),
            GridMode::List => Some("list"),
        }
    }
}

impl FromStr for GridMode {
    type Err = TypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "comfortable" => Ok(GridMode::Comfortable),
            "compact" => Ok(GridMode::Compact),
            "list" => Ok(GridMode::List),
            _ => Err(TypeParseError::GridMode(s.to_string())),
        }
    }
}

/// Pixel dimensions of a screenshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} × {}", self.width, self.height)
    }
}
