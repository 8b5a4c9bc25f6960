//! CLI entry point for dual-grid auto-tiling of PNG masks

use clap::Parser;
use dualgrid::io::cli::{Cli, FileProcessor};
use tracing_subscriber::EnvFilter;

fn main() -> dualgrid::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_unset| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut processor = FileProcessor::new(cli)?;
    processor.process()
}
