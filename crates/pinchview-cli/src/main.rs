mod commands;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinchview", about = "Headless image preview and zoom host")]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show image/GIF metadata
    Info(commands::info::InfoArgs),
    /// Compute the fitted content size for a viewport
    Fit(commands::fit::FitArgs),
    /// Replay a gesture script against a zoomable viewport
    Zoom(commands::zoom::ZoomArgs),
    /// Simulate GIF playback with a fixed-rate frame timer
    Play(commands::play::PlayArgs),
    /// Print or save the default preview config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Info(args) => commands::info::run(args),
        Commands::Fit(args) => commands::fit::run(args),
        Commands::Zoom(args) => commands::zoom::run(args),
        Commands::Play(args) => commands::play::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
