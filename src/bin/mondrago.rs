//! Mondrago CLI - exhaustive solver and explorer for the Mondrago board game
//!
//! This CLI provides a unified interface for:
//! - Solving every legal position and writing the database
//! - Summarizing and inspecting a stored solution
//! - Mining initial positions, deepest wins and puzzles

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "mondrago")]
#[command(version, about = "Retrograde solver for the Mondrago board game", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the game and write the database
    Solve(mondrago::cli::commands::solve::SolveArgs),

    /// Print statistics of a stored solution
    Stats(mondrago::cli::commands::stats::StatsArgs),

    /// Look up one position
    Inspect(mondrago::cli::commands::inspect::InspectArgs),

    /// Write exploration reports and puzzles
    Explore(mondrago::cli::commands::explore::ExploreArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve(args) => mondrago::cli::commands::solve::execute(args),
        Commands::Stats(args) => mondrago::cli::commands::stats::execute(args),
        Commands::Inspect(args) => mondrago::cli::commands::inspect::execute(args),
        Commands::Explore(args) => mondrago::cli::commands::explore::execute(args),
    }
}
