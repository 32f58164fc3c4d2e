//! Explore command - Mine reports and puzzles from a stored solution

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use super::{DEFAULT_DATABASE, load_solution};
use crate::{
    cli::{
        config::ExploreConfig,
        logging::init_logger,
        output::{print_kv, print_section, with_spinner},
    },
    report::Explorer,
};

#[derive(Parser, Debug)]
#[command(about = "Write initial-position, draw, deepest-win and puzzle reports")]
pub struct ExploreArgs {
    /// Database file (.txt or .msgpack)
    #[arg(long, short = 'd', default_value = DEFAULT_DATABASE)]
    pub database: PathBuf,

    /// Directory for the report files
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// JSON exploration configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log debug output while loading
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: ExploreArgs) -> Result<()> {
    init_logger(args.verbose, None)?;
    let config = match &args.config {
        Some(path) => ExploreConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ExploreConfig::default(),
    };
    let initial = config.initial_position()?;
    let solution = load_solution(&args.database)?;

    let written = with_spinner("Writing reports...", "Reports written", || {
        Explorer::new(&solution).write_reports(
            &args.output_dir,
            initial,
            &config.puzzle_targets,
            config.min_losing_replies,
        )
    })
    .context("Failed to write reports")?;

    print_section("Mondrago Reports");
    for path in written {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        print_kv(&name, &path.display().to_string());
    }
    Ok(())
}
