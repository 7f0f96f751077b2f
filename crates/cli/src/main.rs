mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hunter_core::Settings;

use crate::cli::{CliArgs, Command};
use crate::config::RunConfig;

fn main() -> Result<ExitCode> {
    hunter_core::config::load_dotenv();

    // Logs go to stderr so stdout stays clean JSON.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();
    let settings = Settings::from_env();
    settings.log_summary();
    let run = RunConfig::resolve(settings, args.rules_dir.clone());

    match &args.command {
        Command::Generate(g) => commands::generate(&run, g),
        Command::Validate => commands::validate(&run),
        Command::Check(c) => commands::check(&run, c),
        Command::Lens(l) => commands::lens(&run, l),
    }
}
