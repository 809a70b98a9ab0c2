//! Claritizer CLI - offline renderer for the claritizer effect engine.

mod commands;
mod wav;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "claritizer")]
#[command(author, version, about = "Claritizer effect engine CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an audio file through the effect
    Process(commands::process::ProcessArgs),

    /// Show the four mode tables and the macro controls
    Modes(commands::modes::ModesArgs),

    /// Export or check tuning files
    Tuning(commands::tuning::TuningArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Modes(args) => commands::modes::run(args),
        Commands::Tuning(args) => commands::tuning::run(args),
    }
}
