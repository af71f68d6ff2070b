use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use gallery_lib::output::RunSummary;
use gallery_lib::{ErrorOutput, GalleryError, GalleryOutput, GALLERY_OUTPUT_VERSION};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &GalleryOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the fatal exit code.
pub fn render_error(err: GalleryError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    let error_payload = err.to_payload();
    let payload = GalleryOutput::Error(ErrorOutput {
        version: GALLERY_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    ExitCode::from(2)
}

/// Write JSON output to file or stdout.
fn write_json_output(
    body: &GalleryOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Write pretty output to file or stdout.
fn write_pretty_output(body: &GalleryOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &GalleryOutput, colorize: bool) -> String {
    match body {
        GalleryOutput::Build(out) => {
            let mut buf = String::new();
            let header = color("[BUILD]", "32", colorize);
            writeln!(
                buf,
                "{} Gallery written to {} ({:.1} KiB)",
                header,
                out.output_path.display(),
                out.bytes as f64 / 1024.0
            )
            .ok();
            write_summary(&mut buf, &out.summary, colorize);
            buf
        }
        GalleryOutput::Check(out) => {
            let mut buf = String::new();
            let header = color("[CHECK]", "36", colorize);
            writeln!(buf, "{} Configuration and inputs OK", header).ok();
            write_summary(&mut buf, &out.summary, colorize);
            buf
        }
        GalleryOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            let message = out
                .message
                .as_deref()
                .unwrap_or_else(|| out.error.message.as_str());
            writeln!(buf, "{} {}", header, message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn write_summary(buf: &mut String, summary: &RunSummary, colorize: bool) {
    let totals = &summary.totals;
    writeln!(
        buf,
        "Screens: {} ({} web, {} mobile) in {} sections / {} subsections",
        totals.screens, totals.web, totals.mobile, totals.sections, totals.subsections
    )
    .ok();
    for section in &summary.sections {
        writeln!(buf, "- {:32} {:>5}", section.label, section.screens).ok();
        for sub in &section.subsections {
            let count = sub.screens.to_string();
            let count = if sub.screens == 0 {
                color(&count, "33", colorize)
            } else {
                count
            };
            writeln!(buf, "    {:30} {:>5}", sub.label, count).ok();
        }
    }

    let links = &summary.deep_links;
    let linked_total = links.linked + links.unlinked;
    let pct = if linked_total == 0 {
        0.0
    } else {
        links.linked as f64 * 100.0 / linked_total as f64
    };
    writeln!(
        buf,
        "Deep links: {} of {} screens ({:.1}%)",
        links.linked, linked_total, pct
    )
    .ok();
    if !summary.index_entries.is_empty() {
        writeln!(buf, "Figma index:").ok();
        for (file, entries) in &summary.index_entries {
            writeln!(buf, "- {:24} {} entries", file, entries).ok();
        }
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}
