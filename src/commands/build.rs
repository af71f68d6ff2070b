use std::path::PathBuf;
use std::process::ExitCode;

use gallery_lib::{BuildOutput, GalleryError, GalleryOutput, GALLERY_OUTPUT_VERSION};
use tracing::info;

use crate::cli::RunArgs;
use crate::formatting::{render_error, write_output};
use crate::settings::resolve_config;

/// Run the build command.
pub fn run_build(config_path: Option<PathBuf>, args: RunArgs) -> ExitCode {
    let format = args.format;
    let summary_output = args.summary_output.clone();

    let config = match resolve_config(config_path.as_deref(), &args) {
        Ok(cfg) => cfg,
        Err(err) => return render_error(err, format, summary_output),
    };
    info!(
        images = %config.config.image_root.display(),
        metadata = %config.config.metadata_dir.display(),
        "building gallery"
    );

    let report = match gallery_lib::build(&config) {
        Ok(report) => report,
        Err(err) => return render_error(err, format, summary_output),
    };

    let body = GalleryOutput::Build(BuildOutput {
        version: GALLERY_OUTPUT_VERSION.to_string(),
        output_path: config.config.output.clone(),
        bytes: report.bytes,
        summary: report.summary,
    });
    if let Err(err) = write_output(&body, format, summary_output.clone()) {
        return render_error(GalleryError::Output(err.to_string()), format, summary_output);
    }
    ExitCode::SUCCESS
}
