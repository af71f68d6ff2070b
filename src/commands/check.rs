use std::path::PathBuf;
use std::process::ExitCode;

use gallery_lib::{CheckOutput, GalleryError, GalleryOutput, GALLERY_OUTPUT_VERSION};

use crate::cli::RunArgs;
use crate::formatting::{render_error, write_output};
use crate::settings::resolve_config;

/// Run the check command. Reads everything, writes nothing but the summary.
pub fn run_check(config_path: Option<PathBuf>, args: RunArgs) -> ExitCode {
    let format = args.format;
    let summary_output = args.summary_output.clone();

    let summary = match resolve_config(config_path.as_deref(), &args)
        .and_then(|config| gallery_lib::check(&config))
    {
        Ok(summary) => summary,
        Err(err) => return render_error(err, format, summary_output),
    };

    let body = GalleryOutput::Check(CheckOutput {
        version: GALLERY_OUTPUT_VERSION.to_string(),
        summary,
    });
    if let Err(err) = write_output(&body, format, summary_output.clone()) {
        return render_error(GalleryError::Output(err.to_string()), format, summary_output);
    }
    ExitCode::SUCCESS
}
