//! Depth assignment for classified positions
//!
//! Decisive positions get the length of the game under optimal play: the
//! winner hurries, the loser delays. Draws get the negated distance to the
//! nearest position where the side to move can leave the draw set.

use log::{debug, info};

use super::{
    Classification, Depth, Outcome,
    universe::{self, INDEX_SPACE, IndexSet},
};
use crate::{
    Error, Result,
    game::{Position, moves, parents},
};

/// Raw value of a position without a depth.
///
/// Depths are stored with the sign bit flipped, so a zeroed array is an
/// empty map and `Depth::MIN` is the one value that cannot be stored.
pub(crate) const UNASSIGNED: u16 = 0;

pub(crate) fn encode(depth: Depth) -> u16 {
    (depth as u16) ^ 0x8000
}

pub(crate) fn decode(raw: u16) -> Option<Depth> {
    (raw != UNASSIGNED).then(|| (raw ^ 0x8000) as Depth)
}

/// Depth of every legal canonical position, indexed like the classification
#[derive(Debug, Clone)]
pub struct DepthMap {
    depths: Vec<u16>,
}

impl DepthMap {
    fn new() -> Self {
        DepthMap {
            depths: vec![UNASSIGNED; INDEX_SPACE],
        }
    }

    /// Depth of a canonical position, if it has one
    pub fn depth(&self, position: Position) -> Option<Depth> {
        self.get(universe::index_of(position))
    }

    pub(crate) fn get(&self, index: usize) -> Option<Depth> {
        decode(self.depths[index])
    }

    fn is_assigned(&self, index: usize) -> bool {
        self.depths[index] != UNASSIGNED
    }

    fn assign(&mut self, index: usize, depth: Depth) {
        self.depths[index] = encode(depth);
    }

    pub(crate) fn into_raw(self) -> Vec<u16> {
        self.depths
    }
}

/// Compute depths for every classified position.
///
/// # Errors
///
/// Returns [`Error::InvariantViolation`] if a decisive position or a draw is
/// left without a depth, which means the classification is inconsistent.
pub fn compute_depths(classification: &Classification) -> Result<DepthMap> {
    let mut depths = DepthMap::new();
    assign_decisive(classification, &mut depths)?;
    assign_draws(classification, &mut depths)?;
    Ok(depths)
}

fn assign_decisive(classification: &Classification, depths: &mut DepthMap) -> Result<()> {
    let mut frontier = Layer::new();
    for (index, position, _) in classification.positions() {
        if position.is_terminal() {
            depths.assign(index, 0);
            for parent in parents(position) {
                frontier.push(parent);
            }
        }
    }

    let mut layer: Depth = 1;
    while !frontier.is_empty() {
        let current = frontier.advance();
        let mut assigned = 0usize;
        for position in current {
            let index = universe::index_of(position);
            if depths.is_assigned(index) {
                continue;
            }
            let Some(outcome) = classification.outcome_at(index) else {
                continue;
            };
            let depth = match outcome {
                Outcome::MoverWins => fastest_win(classification, depths, position),
                Outcome::MoverLoses => slowest_loss(classification, depths, position),
                Outcome::Draw => None,
            };
            let Some(depth) = depth else {
                continue;
            };
            depths.assign(index, depth);
            assigned += 1;

            let waiting = match outcome {
                Outcome::MoverWins => Outcome::MoverLoses,
                _ => Outcome::MoverWins,
            };
            for parent in parents(position) {
                let parent_index = universe::index_of(parent);
                if !depths.is_assigned(parent_index)
                    && classification.outcome_at(parent_index) == Some(waiting)
                {
                    frontier.push(parent);
                }
            }
        }
        debug!("depth layer {layer}: {assigned} positions assigned");
        layer += 1;
    }

    for (index, position, outcome) in classification.positions() {
        if outcome != Outcome::Draw && !depths.is_assigned(index) {
            return Err(Error::InvariantViolation {
                position: format!("{position:?}"),
                reason: format!("{outcome} position received no depth"),
            });
        }
    }
    info!("decisive depths assigned in {} layers", layer - 1);
    Ok(())
}

/// `1 + min` over the losing children already reached
fn fastest_win(
    classification: &Classification,
    depths: &DepthMap,
    position: Position,
) -> Option<Depth> {
    moves(position)
        .into_iter()
        .filter_map(|child| {
            let index = universe::index_of(child);
            match classification.outcome_at(index) {
                Some(Outcome::MoverLoses) => depths.get(index),
                _ => None,
            }
        })
        .min()
        .map(|depth| depth + 1)
}

/// `1 + max` over the children, once every child is a won position with a depth
fn slowest_loss(
    classification: &Classification,
    depths: &DepthMap,
    position: Position,
) -> Option<Depth> {
    let mut deepest = None;
    for child in moves(position) {
        let index = universe::index_of(child);
        if classification.outcome_at(index) != Some(Outcome::MoverWins) {
            return None;
        }
        let depth = depths.get(index)?;
        deepest = deepest.max(Some(depth));
    }
    deepest.map(|depth| depth + 1)
}

fn assign_draws(classification: &Classification, depths: &mut DepthMap) -> Result<()> {
    let mut frontier = Vec::new();
    for (index, position, outcome) in classification.positions() {
        if outcome != Outcome::Draw {
            continue;
        }
        let escapes = moves(position)
            .into_iter()
            .any(|child| classification.outcome(child) != Some(Outcome::Draw));
        if escapes {
            depths.assign(index, -1);
            frontier.push(position);
        }
    }
    info!("{} drawn positions can leave the draw set", frontier.len());

    let mut level: Depth = -1;
    while !frontier.is_empty() {
        let mut next = Vec::new();
        for position in frontier {
            for parent in parents(position) {
                let index = universe::index_of(parent);
                if classification.outcome_at(index) == Some(Outcome::Draw)
                    && !depths.is_assigned(index)
                {
                    depths.assign(index, level - 1);
                    next.push(parent);
                }
            }
        }
        if !next.is_empty() {
            debug!("draw depth {}: {} positions", level - 1, next.len());
        }
        frontier = next;
        level -= 1;
    }

    for (index, position, outcome) in classification.positions() {
        if outcome == Outcome::Draw && !depths.is_assigned(index) {
            return Err(Error::InvariantViolation {
                position: format!("{position:?}"),
                reason: "drawn position cannot reach an escape".to_string(),
            });
        }
    }
    Ok(())
}

/// Deduplicated queue of positions for the next depth layer
struct Layer {
    positions: Vec<Position>,
    queued: IndexSet,
}

impl Layer {
    fn new() -> Self {
        Layer {
            positions: Vec::new(),
            queued: IndexSet::new(INDEX_SPACE),
        }
    }

    fn push(&mut self, position: Position) {
        if self.queued.insert(universe::index_of(position)) {
            self.positions.push(position);
        }
    }

    fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Take the queued positions and start collecting the next layer
    fn advance(&mut self) -> Vec<Position> {
        let current = std::mem::take(&mut self.positions);
        for &position in &current {
            self.queued.remove(universe::index_of(position));
        }
        current
    }
}
