use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Developer harness for the hunt engine.
///
/// Generates challenges from the rule files, validates those files, and
/// checks answers against reproducible seeded challenges.
#[derive(Parser, Debug)]
#[command(name = "hunter", about = "Generate and inspect data-hunt challenges")]
pub struct CliArgs {
    /// Directory holding the rule documents (default: data/rules)
    #[arg(long, global = true, env = "HUNTER_RULES_DIR")]
    pub rules_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print generated challenges as JSON
    Generate(GenerateArgs),
    /// Load and validate every rule file
    Validate,
    /// Regenerate a seeded challenge and check an answer against it
    Check(CheckArgs),
    /// Show a seeded challenge through one lens
    Lens(LensArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long)]
    pub level: u32,

    /// Threshold tier 0-3 (Scout, Hunter, Tracker, Mythic)
    #[arg(long)]
    pub tier: Option<u8>,

    /// Seed for the first challenge; later ones use seed+1, seed+2, ...
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value = "1")]
    pub count: usize,

    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    #[arg(long)]
    pub level: u32,

    #[arg(long)]
    pub answer: String,

    #[arg(long)]
    pub tier: Option<u8>,

    #[arg(long)]
    pub seed: u64,

    /// Attempts taken, including this one
    #[arg(long, default_value = "1")]
    pub attempts: u32,
}

#[derive(Args, Debug)]
pub struct LensArgs {
    #[arg(long)]
    pub level: u32,

    #[arg(long)]
    pub seed: u64,

    /// standard, focus, xray, summary or void
    #[arg(long, default_value = "standard")]
    pub mode: String,

    #[arg(long)]
    pub tier: Option<u8>,

    #[arg(long)]
    pub pretty: bool,
}
