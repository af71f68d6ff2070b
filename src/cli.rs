use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "screen-gallery")]
#[command(
    version,
    about = "Screen Gallery - Build a searchable HTML catalog of design screenshots",
    long_about = "Screen Gallery\n\nModes:\n- build: scan the image folders, index Figma exports, and write one self-contained HTML page.\n- check: run everything a build would (config validation, metadata indexing, discovery) and report counts without writing the page.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (info-level) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Gallery config file (TOML); defaults to ./gallery.toml, then built-in layout. CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate the gallery page
    Build(RunArgs),

    /// Validate config and inputs without writing the page
    Check(RunArgs),
}

/// Flags shared by `build` and `check`.
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    #[arg(long, value_name = "DIR", help = "Image root (one subdirectory per subsection folder)")]
    pub images: Option<PathBuf>,

    #[arg(long, value_name = "DIR", help = "Directory holding <document>.json Figma exports")]
    pub metadata: Option<PathBuf>,

    #[arg(long, short, value_name = "PATH", help = "Path of the generated HTML page")]
    pub output: Option<PathBuf>,

    #[arg(
        long,
        value_name = "PREFIX",
        help = "Prefix for image URLs in the page, relative to the page location"
    )]
    pub asset_prefix: Option<String>,

    #[arg(long, help = "Skip malformed Figma exports with a warning instead of failing")]
    pub lenient_metadata: bool,

    #[arg(long, value_enum, default_value = "json", help = "Run summary format")]
    pub format: OutputFormat,

    #[arg(
        long,
        value_name = "PATH",
        help = "Write the run summary to this file (stdout if omitted)"
    )]
    pub summary_output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}
