//! Repository port for solution persistence.

use std::path::Path;

use crate::{Result, solver::Solution};

/// Port for persisting and loading solved games.
///
/// # Examples
///
/// ```no_run
/// use mondrago::ports::SolutionRepository;
/// use mondrago::Solution;
/// use std::path::Path;
///
/// fn save_solution<R: SolutionRepository>(
///     repo: &R,
///     solution: &Solution,
///     path: &Path,
/// ) -> mondrago::Result<()> {
///     repo.save(solution, path)
/// }
/// ```
pub trait SolutionRepository {
    /// Save a solution to persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written, or if
    /// serialization fails.
    fn save(&self, solution: &Solution, path: &Path) -> Result<()>;

    /// Load a solution from persistent storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, its content is malformed,
    /// or an entry is not a legal canonical position.
    fn load(&self, path: &Path) -> Result<Solution>;
}
