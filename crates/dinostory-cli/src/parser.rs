//! Root CLI structure with global options.

use clap::Parser;

use crate::commands::Commands;

/// Dinosaur bedtime stories: serve the endpoints or run the wizard headless.
#[derive(Parser)]
#[command(name = "dinostory")]
#[command(about = "Generate and read dinosaur bedtime stories")]
#[command(version)]
pub struct Cli {
    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}
