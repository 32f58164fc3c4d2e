//! Shared configuration types for CLI commands
//!
//! Both configurations can be read from a JSON file with `--config`; any
//! field missing from the file keeps its default.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{
    Error, Result,
    game::Position,
    report::PuzzleTarget,
    solver::Depth,
};

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path).map_err(|source| Error::Io {
        operation: format!("read config {path:?}"),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

/// Solver configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Directory receiving every output file
    pub output_dir: PathBuf,

    /// Text database file name
    pub database: String,

    /// Statistics file name
    pub stats: String,

    /// MessagePack cache file name, written when caching is enabled
    pub cache: Option<String>,

    /// Re-check every position after solving
    pub verify: bool,

    /// Also log to this file at debug level
    pub log_file: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            database: "MONDRAGO_DATABASE.txt".to_string(),
            stats: "MONDRAGO_STATS.txt".to_string(),
            cache: None,
            verify: true,
            log_file: None,
        }
    }
}

impl SolverConfig {
    pub fn load(path: &Path) -> Result<Self> {
        load_json(path)
    }

    pub fn database_path(&self) -> PathBuf {
        self.output_dir.join(&self.database)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.output_dir.join(&self.stats)
    }

    pub fn cache_path(&self) -> Option<PathBuf> {
        self.cache.as_ref().map(|name| self.output_dir.join(name))
    }
}

/// Exploration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreConfig {
    /// Forced-win lengths to mine puzzles for
    pub puzzle_targets: Vec<PuzzleTarget>,

    /// Puzzles need strictly more losing moves than this
    pub min_losing_replies: usize,

    /// Mover cells of the starting setup
    pub initial_mover: Vec<usize>,

    /// Opponent cells of the starting setup
    pub initial_opponent: Vec<usize>,
}

impl Default for ExploreConfig {
    fn default() -> Self {
        let targets: [(Depth, &str); 4] = [
            (3, "EASY"),
            (5, "NORMAL"),
            (7, "DIFFICULT"),
            (9, "VERY_DIFFICULT"),
        ];
        Self {
            puzzle_targets: targets
                .into_iter()
                .map(|(depth, name)| PuzzleTarget::new(depth, name))
                .collect(),
            min_losing_replies: 18,
            initial_mover: vec![0, 1, 23, 24],
            initial_opponent: vec![3, 4, 20, 21],
        }
    }
}

impl ExploreConfig {
    /// Load and validate a configuration file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed, or if it describes
    /// an invalid starting setup or a puzzle target that is not a win.
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = load_json(path)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let initial = self.initial_position()?;
        if !initial.is_legal() {
            return Err(Error::InvalidConfiguration {
                message: format!("initial position {initial:?} is illegal"),
            });
        }
        for target in &self.puzzle_targets {
            if target.depth < 1 || target.depth % 2 == 0 {
                return Err(Error::InvalidConfiguration {
                    message: format!(
                        "puzzle target {} has depth {}, forced wins have odd positive depth",
                        target.name, target.depth
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn initial_position(&self) -> Result<Position> {
        Position::from_cells(&self.initial_mover, &self.initial_opponent)
    }
}
