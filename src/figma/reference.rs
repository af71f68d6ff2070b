use thiserror::Error;
use url::Url;

/// A Figma file (and optionally a node) referenced from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigmaReference {
    pub file_key: String,
    pub node_id: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReferenceParseError {
    #[error("Invalid Figma URL '{value}': {message}")]
    InvalidUrl { value: String, message: String },
    #[error("Figma URL missing file key in '{url}'")]
    MissingFileKey { url: String },
    #[error("Invalid Figma file key '{value}': expected letters and digits only")]
    InvalidFileKey { value: String },
}

/// Path segments that precede the file key in Figma URLs.
const FILE_SEGMENTS: &[&str] = &["file", "design", "proto", "board"];

/// Accepts a bare file key (`qEMRRpn8rPa2hbjTS0HnVl`) or a Figma URL
/// (`https://www.figma.com/design/<key>/Name?node-id=1-2`).
pub fn parse_file_reference(value: &str) -> Result<FigmaReference, ReferenceParseError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return parse_figma_url(value);
    }
    validate_file_key(value)?;
    Ok(FigmaReference {
        file_key: value.to_string(),
        node_id: None,
    })
}

fn parse_figma_url(value: &str) -> Result<FigmaReference, ReferenceParseError> {
    let url = Url::parse(value).map_err(|e| ReferenceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();

    let file_key = path_segments
        .iter()
        .position(|s| FILE_SEGMENTS.contains(s))
        .and_then(|i| path_segments.get(i + 1))
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .ok_or_else(|| ReferenceParseError::MissingFileKey {
            url: value.to_string(),
        })?;
    validate_file_key(&file_key)?;

    // Share links use `1-2`; the API and exports use `1:2`.
    let node_id = url
        .query_pairs()
        .find(|(k, _)| k == "node-id")
        .map(|(_, v)| v.replace('-', ":"));

    Ok(FigmaReference { file_key, node_id })
}

fn validate_file_key(value: &str) -> Result<(), ReferenceParseError> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ReferenceParseError::InvalidFileKey {
            value: value.to_string(),
        });
    }
    Ok(())
}
