use std::path::Path;

use gallery_lib::{GalleryConfig, GalleryError, ValidatedConfig};

use crate::cli::RunArgs;

/// Load config from an explicit path, `./gallery.toml`, or built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<GalleryConfig, GalleryError> {
    GalleryConfig::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| GalleryConfig::local_config_path().display().to_string());
        GalleryError::Config(format!("Failed to read config {}: {}", loc, e))
    })
}

/// CLI flags win over config values.
pub fn apply_overrides(mut config: GalleryConfig, args: &RunArgs) -> GalleryConfig {
    if let Some(images) = &args.images {
        config.image_root = images.clone();
    }
    if let Some(metadata) = &args.metadata {
        config.metadata_dir = metadata.clone();
    }
    if let Some(output) = &args.output {
        config.output = output.clone();
    }
    if let Some(prefix) = &args.asset_prefix {
        config.asset_prefix = prefix.clone();
    }
    if args.lenient_metadata {
        config.lenient_metadata = true;
    }
    config
}

/// Load, override, and validate in one step.
pub fn resolve_config(path: Option<&Path>, args: &RunArgs) -> Result<ValidatedConfig, GalleryError> {
    let config = apply_overrides(load_config(path)?, args);
    config.validate().map_err(|e| match e {
        GalleryError::Config(msg) => GalleryError::Config(match path {
            Some(p) => format!("Invalid config ({}): {}", p.display(), msg),
            None => format!("Invalid config: {}", msg),
        }),
        other => other,
    })
}
