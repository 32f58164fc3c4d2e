//! Inspect command - Show the value of one position

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{DEFAULT_DATABASE, load_solution};
use crate::{
    cli::{
        logging::init_logger,
        output::{print_kv, print_section, print_subsection},
    },
    game::Position,
    report::{render_board, render_move, summarize, winning_moves},
};

#[derive(Parser, Debug)]
#[command(about = "Look up a position in a stored solution")]
pub struct InspectArgs {
    /// Position as mover and opponent cells, e.g. "0,1,23,24/3,4,20,21"
    pub position: String,

    /// Database file (.txt or .msgpack)
    #[arg(long, short = 'd', default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Log debug output while loading
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: InspectArgs) -> Result<()> {
    init_logger(args.verbose, None)?;
    let position: Position = args
        .position
        .parse()
        .with_context(|| format!("Invalid position '{}'", args.position))?;
    let solution = load_solution(&args.database)?;
    let entry = solution.lookup(position)?;
    let summary = summarize(&solution, entry.position)?;

    print_section("Position");
    print!("{}", render_board(&position));
    if entry.position != position {
        print_subsection("Canonical form");
        print!("{}", render_board(&entry.position));
    }

    print_subsection("Value");
    print_kv("Canonical", &format!("{:?}", entry.position));
    print_kv("Outcome", &entry.outcome().to_string());
    print_kv("Depth", &entry.depth.to_string());
    print_kv("Winning moves", &summary.wins.to_string());
    print_kv("Losing moves", &summary.losses.to_string());
    print_kv("Drawing moves", &summary.draws.to_string());
    print_kv("Optimal moves", &summary.optimal.to_string());

    let moves = winning_moves(&solution, position);
    if !moves.is_empty() {
        print_subsection("Winning moves");
        for successor in &moves {
            println!("{}", render_move(&position, successor));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args() {
        let args =
            InspectArgs::try_parse_from(["inspect", "0,1,23,24/3,4,20,21", "--verbose"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.database, PathBuf::from(DEFAULT_DATABASE));
        assert!(args.position.parse::<Position>().is_ok());

        assert!(InspectArgs::try_parse_from(["inspect"]).is_err());
    }
}
