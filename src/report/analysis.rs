//! Per-position move statistics derived from a solution

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    game::{D4Transform, Position, moves, successors},
    solver::{Depth, Outcome, Solution},
};

/// How the moves of a position split by outcome.
///
/// Counts are over distinct canonical children, so symmetric moves count once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveSummary {
    /// Depth of the position itself
    pub depth: Depth,
    /// Moves into positions lost for the side to move next
    pub wins: usize,
    /// Moves into positions won for the side to move next
    pub losses: usize,
    /// Moves that keep the game drawn
    pub draws: usize,
    /// Moves that keep the position's value under optimal play
    pub optimal: usize,
    /// Smallest depth among children won for the side to move next
    pub fastest_reply: Option<Depth>,
}

impl MoveSummary {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_depth(self.depth)
    }

    /// Caption without the optimal-move count
    pub fn brief(&self) -> String {
        format!(
            "d: {}, W: {}, D: {}, L: {}",
            self.depth, self.wins, self.draws, self.losses
        )
    }
}

impl fmt::Display for MoveSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, O: {}", self.brief(), self.optimal)
    }
}

/// Summarize the moves of a canonical position.
///
/// # Errors
///
/// Returns [`Error::UnknownPosition`] if the position or one of its children
/// is missing from the solution.
pub fn summarize(solution: &Solution, position: Position) -> Result<MoveSummary> {
    let depth_of = |position: Position| {
        solution.depth(position).ok_or_else(|| Error::UnknownPosition {
            position: format!("{position:?}"),
        })
    };
    let depth = depth_of(position)?;
    let outcome = Outcome::from_depth(depth);

    let mut summary = MoveSummary {
        depth,
        wins: 0,
        losses: 0,
        draws: 0,
        optimal: 0,
        fastest_reply: None,
    };
    for child in moves(position) {
        let child_depth = depth_of(child)?;
        let child_outcome = Outcome::from_depth(child_depth);
        match child_outcome {
            Outcome::MoverLoses => summary.wins += 1,
            Outcome::MoverWins => {
                summary.losses += 1;
                summary.fastest_reply = Some(
                    summary
                        .fastest_reply
                        .map_or(child_depth, |fastest| fastest.min(child_depth)),
                );
            }
            Outcome::Draw => summary.draws += 1,
        }
        let optimal = match outcome {
            Outcome::Draw => child_outcome == Outcome::Draw,
            Outcome::MoverLoses => child_depth == depth - 1,
            Outcome::MoverWins => {
                child_outcome == Outcome::MoverLoses && child_depth == depth - 1
            }
        };
        if optimal {
            summary.optimal += 1;
        }
    }
    Ok(summary)
}

/// Winning moves of `position` in its own orientation.
///
/// Each result is a successor as produced by [`successors`], kept only when
/// its canonical image is lost for the side to move next.
pub fn winning_moves(solution: &Solution, position: Position) -> Vec<Position> {
    successors(position)
        .into_iter()
        .filter(|next| solution.outcome(next.canonical()) == Some(Outcome::MoverLoses))
        .collect()
}

/// Whether a position looks like a fair starting setup.
///
/// Holds when some non-identity symmetry maps the mover's markers onto the
/// opponent's, and some non-identity symmetry maps the mover's markers onto
/// themselves. The two symmetries need not be the same.
pub fn is_symmetrical(position: Position) -> bool {
    let mover = position.mover();
    let images: Vec<_> = D4Transform::all()
        .into_iter()
        .filter(|transform| !transform.is_identity())
        .map(|transform| mover.transform(&transform))
        .collect();
    images.contains(&position.opponent()) && images.contains(&mover)
}
