//! pvoc CLI - command-line interface for the pvoc phase vocoder.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pvoc")]
#[command(author, version, about = "pvoc phase vocoder CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Pitch-shift, robotize, or whisperize an audio file
    Process(commands::process::ProcessArgs),

    /// Generate test signals
    Generate(commands::generate::GenerateArgs),

    /// List and manage presets
    Presets(commands::presets::PresetsArgs),

    /// Show WAV file information and vocoder latency
    Info(commands::info::InfoArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Process(args) => commands::process::run(args),
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Presets(args) => commands::presets::run(args),
        Commands::Info(args) => commands::info::run(args),
    }
}
