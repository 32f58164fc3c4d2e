//! Exploration reports mined from a solved game
//!
//! Every report is a plain-text file of boards, each followed by a caption
//! and two blank lines. Section titles name outcomes the way the statistics
//! file does: N wins for the mover, P wins for the opponent.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::info;
use serde::{Deserialize, Serialize};

use super::{
    analysis::{MoveSummary, is_symmetrical, summarize, winning_moves},
    render::{render_board, render_move},
};
use crate::{
    Error, Result,
    game::Position,
    solver::{Depth, Entry, Outcome, Solution},
};

pub const INITIAL_POSITIONS_FILE: &str = "MONDRAGO_INITIAL_POSITIONS.txt";
pub const SAFEST_DRAWS_FILE: &str = "MONDRAGO_SAFEST_DRAWS.txt";
pub const DEEPEST_POSITIONS_FILE: &str = "MONDRAGO_DEEPEST_POSITIONS.txt";

/// A puzzle difficulty: the forced-win length and the name used in the file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PuzzleTarget {
    pub depth: Depth,
    pub name: String,
}

impl PuzzleTarget {
    pub fn new(depth: Depth, name: impl Into<String>) -> Self {
        Self {
            depth,
            name: name.into(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("MONDRAGO_PUZZLES_{}.txt", self.name)
    }
}

fn block(board: String, caption: &str) -> String {
    format!("{board}\n{caption}\n\n\n")
}

/// Report generator over a frozen solution
pub struct Explorer<'a> {
    solution: &'a Solution,
}

impl<'a> Explorer<'a> {
    pub fn new(solution: &'a Solution) -> Self {
        Self { solution }
    }

    fn entries_with(&self, outcome: Outcome) -> impl Iterator<Item = Entry> + '_ {
        self.solution
            .entries()
            .filter(move |entry| entry.outcome() == outcome)
    }

    fn summary_block(&self, position: Position) -> Result<String> {
        let summary = summarize(self.solution, position)?;
        Ok(block(render_board(&position), &summary.to_string()))
    }

    /// The given starting setup, then every symmetrical setup grouped by outcome
    pub fn initial_positions(&self, initial: Position) -> Result<String> {
        let current = self.solution.lookup(initial)?;
        let mut out = String::from("\nCURRENT INITIAL POSITION:\n\n");
        out.push_str(&self.summary_block(current.position)?);

        let sections = [
            (Outcome::Draw, "DRAW INITIAL POSITIONS"),
            (Outcome::MoverWins, "N_WINS INITIAL POSITIONS"),
        ];
        for (outcome, title) in sections {
            out.push_str(&format!("\n{title}:\n\n"));
            for entry in self.entries_with(outcome) {
                if is_symmetrical(entry.position) {
                    out.push_str(&self.summary_block(entry.position)?);
                }
            }
        }

        let losing: Vec<Position> = self
            .entries_with(Outcome::MoverLoses)
            .map(|entry| entry.position)
            .filter(|&position| is_symmetrical(position))
            .collect();
        if losing.is_empty() {
            out.push_str("\n(There are no P_WINS initial positions)\n");
        } else {
            out.push_str("\nP_WINS INITIAL POSITIONS:\n\n");
            for position in losing {
                out.push_str(&self.summary_block(position)?);
            }
        }
        Ok(out)
    }

    /// Draws furthest from any position where the draw can be left
    pub fn safest_draws(&self) -> Result<String> {
        let mut out = String::new();
        let Some(deepest) = self.solution.min_depth().filter(|&depth| depth < 0) else {
            return Ok(out);
        };
        for entry in self.entries_with(Outcome::Draw) {
            if entry.depth == deepest {
                out.push_str(&self.summary_block(entry.position)?);
            }
        }
        Ok(out)
    }

    /// Longest forced wins, each shown next to every winning move
    pub fn deepest_positions(&self) -> Result<String> {
        let mut out = String::new();
        let Some(deepest) = self.solution.max_depth() else {
            return Ok(out);
        };
        if Outcome::from_depth(deepest) != Outcome::MoverWins {
            return Err(Error::InvariantViolation {
                position: "(all)".to_string(),
                reason: format!("maximum depth {deepest} is not a win"),
            });
        }

        for entry in self.entries_with(Outcome::MoverWins) {
            if entry.depth != deepest {
                continue;
            }
            let summary = summarize(self.solution, entry.position)?;
            let moves = winning_moves(self.solution, entry.position);
            let Some((first, others)) = moves.split_first() else {
                return Err(Error::InvariantViolation {
                    position: format!("{:?}", entry.position),
                    reason: "won position has no winning move".to_string(),
                });
            };
            for successor in others {
                out.push_str(&render_move(&entry.position, successor));
                out.push('\n');
            }
            out.push_str(&block(
                render_move(&entry.position, first),
                &summary.brief(),
            ));
        }
        Ok(out)
    }

    /// Whether a won position makes a good puzzle: a single winning move, no
    /// drawing move, many losing moves, none of which loses immediately
    pub fn is_puzzle(summary: &MoveSummary, min_losing_replies: usize) -> bool {
        summary.outcome() == Outcome::MoverWins
            && summary.wins == 1
            && summary.draws == 0
            && summary.losses > min_losing_replies
            && summary.fastest_reply.is_some_and(|fastest| fastest > 1)
    }

    /// Puzzle positions whose forced win takes exactly `depth` plies
    pub fn puzzle_positions(&self, depth: Depth, min_losing_replies: usize) -> Result<Vec<Position>> {
        let mut puzzles = Vec::new();
        for entry in self.entries_with(Outcome::MoverWins) {
            if entry.depth != depth {
                continue;
            }
            let summary = summarize(self.solution, entry.position)?;
            if Self::is_puzzle(&summary, min_losing_replies) {
                puzzles.push(entry.position);
            }
        }
        Ok(puzzles)
    }

    /// Puzzle report for one target depth, each with its unique solution
    pub fn puzzles(&self, depth: Depth, min_losing_replies: usize) -> Result<String> {
        let caption =
            format!("X plays and wins in {depth} plies (1 winning move, 0 draws)");
        let mut out = String::new();
        for position in self.puzzle_positions(depth, min_losing_replies)? {
            let moves = winning_moves(self.solution, position);
            let Some(answer) = moves.first() else {
                continue;
            };
            out.push_str(&block(render_move(&position, answer), &caption));
        }
        Ok(out)
    }

    /// Write every report into `dir`, returning the files written
    pub fn write_reports(
        &self,
        dir: &Path,
        initial: Position,
        targets: &[PuzzleTarget],
        min_losing_replies: usize,
    ) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dir).map_err(|source| Error::Io {
            operation: format!("create directory {dir:?}"),
            source,
        })?;

        let mut reports = vec![
            (INITIAL_POSITIONS_FILE.to_string(), self.initial_positions(initial)?),
            (SAFEST_DRAWS_FILE.to_string(), self.safest_draws()?),
            (DEEPEST_POSITIONS_FILE.to_string(), self.deepest_positions()?),
        ];
        for target in targets {
            reports.push((
                target.file_name(),
                self.puzzles(target.depth, min_losing_replies)?,
            ));
        }

        let mut written = Vec::with_capacity(reports.len());
        for (name, content) in reports {
            let path = dir.join(name);
            fs::write(&path, content).map_err(|source| Error::Io {
                operation: format!("write report {path:?}"),
                source,
            })?;
            info!("wrote {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::game::moves;

    /// A one-ply win whose other moves are all draws at the edge of the draw set
    fn one_ply_solution() -> (Solution, Position) {
        let position = Position::from_cells(&[0, 1, 5, 7], &[20, 21, 22, 23]).unwrap();
        let mut entries = vec![Entry { position, depth: 1 }];
        for child in moves(position) {
            let depth = if child.is_terminal() { 0 } else { -1 };
            entries.push(Entry {
                position: child,
                depth,
            });
        }
        (Solution::from_entries(entries).unwrap(), position)
    }

    #[test]
    fn test_deepest_positions() {
        let (solution, _) = one_ply_solution();
        let report = Explorer::new(&solution).deepest_positions().unwrap();
        assert!(report.starts_with("X X . . .         X X . . .\n"));
        assert!(report.contains("\nd: 1, W: 1, D: "));
        assert!(report.ends_with("L: 0\n\n\n"));
    }

    #[test]
    fn test_reports_need_children_in_solution() {
        // The drawn children are present, their own children are not
        let (solution, _) = one_ply_solution();
        let result = Explorer::new(&solution).safest_draws();
        assert!(matches!(result, Err(Error::UnknownPosition { .. })));
    }

    #[test]
    fn test_is_puzzle() {
        let mut summary = MoveSummary {
            depth: 5,
            wins: 1,
            losses: 19,
            draws: 0,
            optimal: 1,
            fastest_reply: Some(3),
        };
        assert!(Explorer::is_puzzle(&summary, 18));

        summary.fastest_reply = Some(1);
        assert!(!Explorer::is_puzzle(&summary, 18));
        summary.fastest_reply = Some(3);
        summary.losses = 18;
        assert!(!Explorer::is_puzzle(&summary, 18));
        summary.losses = 19;
        summary.draws = 1;
        assert!(!Explorer::is_puzzle(&summary, 18));
        summary.draws = 0;
        summary.wins = 2;
        assert!(!Explorer::is_puzzle(&summary, 18));
    }

    #[test]
    fn test_no_puzzles_without_losing_replies() {
        let (solution, _) = one_ply_solution();
        let explorer = Explorer::new(&solution);
        assert!(explorer.puzzle_positions(1, 0).unwrap().is_empty());
        assert!(explorer.puzzles(1, 0).unwrap().is_empty());
    }

    #[test]
    fn test_initial_position_must_be_solved() {
        let (solution, _) = one_ply_solution();
        let initial = Position::from_cells(&[0, 1, 23, 24], &[3, 4, 20, 21]).unwrap();
        let result = Explorer::new(&solution).initial_positions(initial);
        assert!(matches!(result, Err(Error::UnknownPosition { .. })));
    }

    #[test]
    fn test_initial_positions_report() {
        let (solution, position) = one_ply_solution();
        let report = Explorer::new(&solution).initial_positions(position).unwrap();
        assert!(report.starts_with("\nCURRENT INITIAL POSITION:\n\nX X . . .\n"));
        assert!(report.contains("d: 1, W: 1"));
        assert!(report.contains("\nDRAW INITIAL POSITIONS:\n\n\nN_WINS INITIAL POSITIONS:\n\n"));
        assert!(report.ends_with("(There are no P_WINS initial positions)\n"));
    }

    #[test]
    fn test_puzzle_file_name() {
        assert_eq!(
            PuzzleTarget::new(9, "VERY_DIFFICULT").file_name(),
            "MONDRAGO_PUZZLES_VERY_DIFFICULT.txt"
        );
    }

    /// Every position any report summarizes has all of its children present:
    /// a one-ply win whose replies all lose, and the standard setup as a draw
    /// two steps from an escape
    fn reportable_solution() -> (Solution, Position, Position) {
        let win = Position::from_cells(&[0, 1, 5, 7], &[20, 21, 22, 23]).unwrap();
        let draw = Position::from_cells(&[0, 1, 23, 24], &[3, 4, 20, 21])
            .unwrap()
            .canonical();
        let mut entries = vec![
            Entry {
                position: win,
                depth: 1,
            },
            Entry {
                position: draw,
                depth: -2,
            },
        ];
        entries.extend(moves(win).into_iter().map(|position| Entry { position, depth: 0 }));
        entries.extend(
            moves(draw)
                .into_iter()
                .map(|position| Entry { position, depth: -1 }),
        );
        (Solution::from_entries(entries).unwrap(), win, draw)
    }

    #[test]
    fn test_safest_draws() {
        let (solution, _, draw) = reportable_solution();
        let report = Explorer::new(&solution).safest_draws().unwrap();
        assert!(report.starts_with(&render_board(&draw)));
        assert!(report.contains("\nd: -2, W: 0, D: "));
        assert_eq!(report.matches("d: ").count(), 1);
    }

    #[test]
    fn test_write_reports() {
        let (solution, win, draw) = reportable_solution();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let targets = [PuzzleTarget::new(3, "EASY")];

        let written = Explorer::new(&solution)
            .write_reports(temp_dir.path(), win, &targets, 18)
            .unwrap();
        assert_eq!(written.len(), 4);
        for path in &written {
            assert!(path.exists(), "{path:?} was not written");
        }

        let read = |name: &str| fs::read_to_string(temp_dir.path().join(name)).unwrap();
        let initial = read(INITIAL_POSITIONS_FILE);
        assert!(initial.starts_with(&format!(
            "\nCURRENT INITIAL POSITION:\n\n{}",
            render_board(&win)
        )));
        assert!(initial.contains(&format!(
            "DRAW INITIAL POSITIONS:\n\n{}",
            render_board(&draw)
        )));
        assert!(initial.ends_with("(There are no P_WINS initial positions)\n"));

        assert!(read(SAFEST_DRAWS_FILE).starts_with(&render_board(&draw)));
        let deepest = read(DEEPEST_POSITIONS_FILE);
        assert!(deepest.starts_with("X X . . .         "));
        assert!(deepest.contains("d: 1, W: "));
        assert!(read("MONDRAGO_PUZZLES_EASY.txt").is_empty());
    }

    #[test]
    fn test_write_reports_fails_on_unwritable_dir() {
        let (solution, position) = one_ply_solution();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let blocker = temp_dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = Explorer::new(&solution).write_reports(&blocker.join("reports"), position, &[], 18);
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
