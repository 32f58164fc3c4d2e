//! Summary of a solution: outcome counts and depth histogram
//!
//! "N" is the next player (the mover), "P" the previous player (the opponent).

use std::{fmt, fs, path::Path};

use crate::{Error, Result, solver::Solution};

/// Statistics file contents for a solution
pub struct Stats<'a>(pub &'a Solution);

impl fmt::Display for Stats<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = self.0.counts();
        writeln!(f, "Number of N wins positions: {:7}", counts.mover_wins)?;
        writeln!(f, "Number of P wins positions: {:7}", counts.mover_loses)?;
        writeln!(f, "Number of drawn  positions: {:7}", counts.draws)?;
        writeln!(f, "Number of legal  positions: {:7}", counts.total())?;
        writeln!(f)?;
        for (depth, size) in self.0.histogram() {
            writeln!(f, "     Positions at depth {depth:2}: {size:7}")?;
        }
        writeln!(f, "\n(draws have negative depths)")
    }
}

/// Render the statistics file
pub fn format_stats(solution: &Solution) -> String {
    Stats(solution).to_string()
}

/// Write the statistics file to `path`
pub fn write_stats(solution: &Solution, path: &Path) -> Result<()> {
    fs::write(path, format_stats(solution)).map_err(|source| Error::Io {
        operation: format!("write statistics to {path:?}"),
        source,
    })
}
