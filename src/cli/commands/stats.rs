//! Stats command - Summarize a stored solution

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::{DEFAULT_DATABASE, load_solution};
use crate::{
    cli::{
        logging::init_logger,
        output::{format_number, print_kv, print_section, print_subsection},
    },
    solver::Outcome,
};

#[derive(Parser, Debug)]
#[command(about = "Print outcome counts and the depth histogram")]
pub struct StatsArgs {
    /// Database file (.txt or .msgpack)
    #[arg(long, short = 'd', default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Log debug output while loading
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: StatsArgs) -> Result<()> {
    init_logger(args.verbose, None)?;
    let solution = load_solution(&args.database)?;
    let counts = solution.counts();

    print_section("Mondrago Statistics");
    for outcome in [Outcome::MoverWins, Outcome::MoverLoses, Outcome::Draw] {
        print_kv(&outcome.to_string(), &format_number(counts.get(outcome)));
    }
    print_kv("legal positions", &format_number(counts.total()));

    print_subsection("Positions per depth");
    for (depth, size) in solution.histogram() {
        println!("  {depth:>4}  {:>10}  {}", format_number(size), Outcome::from_depth(depth));
    }
    Ok(())
}
