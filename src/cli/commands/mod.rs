//! Command implementations, one module per subcommand

use std::path::Path;

use anyhow::{Context, Result};

use crate::{adapters::repository_for, cli::output::with_spinner, solver::Solution};

pub mod explore;
pub mod inspect;
pub mod solve;
pub mod stats;

/// Default location of the text database, shared by the reading commands
pub const DEFAULT_DATABASE: &str = "MONDRAGO_DATABASE.txt";

/// Load a stored solution, picking the format from the file extension
pub fn load_solution(path: &Path) -> Result<Solution> {
    let repository = repository_for(path);
    with_spinner(
        &format!("Loading {}...", path.display()),
        "Solution loaded",
        || repository.load(path),
    )
    .with_context(|| format!("Failed to load solution from {}", path.display()))
}
