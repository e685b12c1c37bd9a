use std::process::ExitCode;

use clap::Parser;
use sketchkit::cli::{run, Cli};
use sketchkit::init_logging;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging()?;
    tracing::debug!("sketchkit {} built {}", sketchkit::VERSION, sketchkit::BUILD_DATE);

    if run(&cli)? {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
