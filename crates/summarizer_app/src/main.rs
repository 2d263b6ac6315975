mod cli;
mod platform;

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;

use cli::Cli;
use summarizer_logging::LogDestination;
use platform::config::AppConfig;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    if cli.batch && cli.files.is_empty() {
        bail!("--batch needs at least one document to process");
    }

    let mut config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;
    config.apply_cli(&cli);
    let settings = config.into_settings().context("invalid configuration")?;

    let logging = summarizer_logging::initialize(
        settings.log_destination,
        settings.log_level,
        &settings.log_file,
    );
    if !logging && settings.log_destination != LogDestination::Off {
        eprintln!("warning: logging could not be initialized");
    }

    platform::run_app(settings, cli.files, cli.batch)
}
