//! Independent check of a solution against the game rules

use log::info;

use super::{Depth, Outcome, Solution, universe};
use crate::{
    Error, Result,
    game::{Position, moves},
};

/// Re-derive every position's outcome and depth from its children.
///
/// Checks that the solution covers exactly the legal canonical positions,
/// that terminal positions are losses at depth 0, that every non-terminal
/// position has a move, and that each depth is consistent with optimal play.
///
/// # Errors
///
/// Returns [`Error::InvariantViolation`] for the first position that fails.
pub fn verify(solution: &Solution) -> Result<()> {
    let mut legal = 0usize;
    let mut violation: Option<Error> = None;
    universe::for_each_legal_position(|index, position| {
        if violation.is_some() {
            return;
        }
        legal += 1;
        let result = match solution.depth_at(index) {
            Some(depth) => check_position(solution, position, depth),
            None => Err("legal position has no entry".to_string()),
        };
        if let Err(reason) = result {
            violation = Some(Error::InvariantViolation {
                position: format!("{position:?}"),
                reason,
            });
        }
    });
    if let Some(error) = violation {
        return Err(error);
    }

    if solution.len() != legal {
        return Err(Error::InvariantViolation {
            position: "(all)".to_string(),
            reason: format!(
                "solution holds {} positions but {legal} are legal",
                solution.len()
            ),
        });
    }
    info!("verified {legal} positions");
    Ok(())
}

fn check_position(
    solution: &Solution,
    position: Position,
    depth: Depth,
) -> std::result::Result<(), String> {
    let outcome = Outcome::from_depth(depth);
    if position.is_terminal() {
        return if depth == 0 {
            Ok(())
        } else {
            Err(format!("terminal position has depth {depth}"))
        };
    }

    let mut children = Vec::new();
    for child in moves(position) {
        let child_depth = solution
            .depth(child)
            .ok_or_else(|| format!("child {child:?} has no entry"))?;
        children.push((child, child_depth));
    }
    if children.is_empty() {
        return Err("non-terminal position has no moves".to_string());
    }

    let depths_of = |wanted: Outcome| -> Vec<Depth> {
        children
            .iter()
            .map(|&(_, child_depth)| child_depth)
            .filter(|&child_depth| Outcome::from_depth(child_depth) == wanted)
            .collect()
    };
    let losing = depths_of(Outcome::MoverLoses);
    let drawn = depths_of(Outcome::Draw);

    let expected = match outcome {
        Outcome::MoverWins => {
            let fastest = losing
                .iter()
                .min()
                .ok_or("won position has no move into a lost position")?;
            fastest + 1
        }
        Outcome::MoverLoses => {
            if children.len() != depths_of(Outcome::MoverWins).len() {
                return Err("lost position has a move that does not lose".to_string());
            }
            let slowest = children
                .iter()
                .map(|&(_, child_depth)| child_depth)
                .max()
                .ok_or("lost position has no moves")?;
            slowest + 1
        }
        Outcome::Draw => {
            if !losing.is_empty() {
                return Err("drawn position has a winning move".to_string());
            }
            let closest = drawn
                .iter()
                .max()
                .ok_or("drawn position has no drawing move")?;
            if drawn.len() < children.len() {
                -1
            } else {
                closest - 1
            }
        }
    };

    if depth == expected {
        Ok(())
    } else {
        Err(format!("{outcome} position has depth {depth}, expected {expected}"))
    }
}
