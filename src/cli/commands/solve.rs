//! Solve command - Classify every position and write the database

use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::info;

use crate::{
    adapters::{MsgPackRepository, TextRepository},
    cli::{
        config::SolverConfig,
        logging::init_logger,
        output::{format_number, print_kv, print_section, with_spinner},
    },
    ports::SolutionRepository,
    report::write_stats,
    solver::{Classifier, Solution, compute_depths, verify},
};

const DEFAULT_CACHE: &str = "MONDRAGO_DATABASE.msgpack";

#[derive(Parser, Debug)]
#[command(about = "Solve the game and write the database")]
pub struct SolveArgs {
    /// Directory for the database and statistics files
    #[arg(long, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// JSON solver configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip the post-solve consistency check
    #[arg(long)]
    pub no_verify: bool,

    /// Also write a MessagePack snapshot
    #[arg(long)]
    pub cache: bool,

    /// Log per-layer progress
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(dir) = args.output_dir {
        config.output_dir = dir;
    }
    if args.no_verify {
        config.verify = false;
    }
    if args.cache && config.cache.is_none() {
        config.cache = Some(DEFAULT_CACHE.to_string());
    }

    init_logger(args.verbose, config.log_file.as_deref())?;
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let solution = run_pipeline(&config)?;
    write_outputs(&solution, &config)?;
    print_summary(&solution, &config);
    Ok(())
}

fn run_pipeline(config: &SolverConfig) -> Result<Solution> {
    let classifier = with_spinner(
        "Enumerating legal positions...",
        "Legal positions enumerated",
        Classifier::seed,
    );
    info!("{} positions queued", classifier.pending());

    let classification = with_spinner(
        "Classifying positions...",
        "Classification complete",
        || classifier.run(),
    );
    let depths = with_spinner("Computing depths...", "Depths computed", || {
        compute_depths(&classification)
    })
    .context("Depth computation failed")?;
    let solution = Solution::new(classification, depths);

    if config.verify {
        with_spinner("Verifying solution...", "Solution verified", || {
            verify(&solution)
        })
        .context("Solution failed verification")?;
    } else {
        info!("verification skipped");
    }
    if solution.is_empty() {
        bail!("Solver produced no positions");
    }
    Ok(solution)
}

fn write_outputs(solution: &Solution, config: &SolverConfig) -> Result<()> {
    let database = config.database_path();
    with_spinner("Writing database...", "Database written", || {
        TextRepository::new().save(solution, &database)
    })
    .with_context(|| format!("Failed to write database {}", database.display()))?;

    let stats = config.stats_path();
    write_stats(solution, &stats)
        .with_context(|| format!("Failed to write statistics {}", stats.display()))?;

    if let Some(cache) = config.cache_path() {
        MsgPackRepository::new()
            .save(solution, &cache)
            .with_context(|| format!("Failed to write cache {}", cache.display()))?;
    }
    Ok(())
}

fn print_summary(solution: &Solution, config: &SolverConfig) {
    let counts = solution.counts();
    print_section("Mondrago Solution");
    print_kv("Mover wins", &format_number(counts.mover_wins));
    print_kv("Mover loses", &format_number(counts.mover_loses));
    print_kv("Draws", &format_number(counts.draws));
    print_kv("Legal positions", &format_number(counts.total()));
    if let Some(max) = solution.max_depth() {
        print_kv("Longest forced win", &format!("{max} plies"));
    }
    if let Some(min) = solution.min_depth() {
        print_kv("Deepest draw", &min.to_string());
    }
    print_kv("Verified", if config.verify { "yes" } else { "no" });
    print_kv("Database", &config.database_path().display().to_string());
    print_kv("Statistics", &config.stats_path().display().to_string());
    if let Some(cache) = config.cache_path() {
        print_kv("Cache", &cache.display().to_string());
    }
}
