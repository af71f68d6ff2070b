mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_build, run_check};

fn main() -> ExitCode {
    let args = cli::parse();
    init_logging(args.verbose);

    match args.command {
        Commands::Build(run) => run_build(args.config, run),
        Commands::Check(run) => run_check(args.config, run),
    }
}

/// Logs go to stderr so stdout stays a clean summary. `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .with_target(false)
        .init();
}
