//! Solved game: outcome and depth of every legal canonical position

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{
    Classification, Depth, DepthMap, Outcome, OutcomeCounts,
    depth::{self, UNASSIGNED},
    universe::{self, INDEX_SPACE},
};
use crate::{Error, Result, game::Position};

/// One solved position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub position: Position,
    pub depth: Depth,
}

impl Entry {
    pub fn outcome(&self) -> Outcome {
        Outcome::from_depth(self.depth)
    }
}

/// Depth table over the dense index space.
///
/// Outcomes are not stored separately: sign and parity of the depth carry
/// them, so a solution read back from disk is as complete as a fresh one.
#[derive(Debug, Clone)]
pub struct Solution {
    depths: Vec<u16>,
    counts: OutcomeCounts,
}

impl Solution {
    /// Freeze a classification together with its depths
    pub fn new(classification: Classification, depths: DepthMap) -> Self {
        let counts = classification.counts();
        drop(classification);
        Solution {
            depths: depths.into_raw(),
            counts,
        }
    }

    /// Rebuild a solution from stored entries.
    ///
    /// # Errors
    ///
    /// Returns error if an entry is illegal or not canonical, carries an
    /// out-of-range depth, or appears twice.
    pub fn from_entries(entries: impl IntoIterator<Item = Entry>) -> Result<Self> {
        let mut depths = vec![UNASSIGNED; INDEX_SPACE];
        let mut counts = OutcomeCounts::default();
        for Entry { position, depth } in entries {
            if !position.is_legal() || !position.is_canonical() {
                return Err(Error::IllegalPosition {
                    position: format!("{position:?}"),
                });
            }
            if depth == Depth::MIN {
                return Err(Error::InvariantViolation {
                    position: format!("{position:?}"),
                    reason: format!("depth {depth} is out of range"),
                });
            }
            let index = universe::index_of(position);
            if depths[index] != UNASSIGNED {
                return Err(Error::DuplicatePosition {
                    position: format!("{position:?}"),
                });
            }
            depths[index] = depth::encode(depth);
            counts.record(Outcome::from_depth(depth));
        }
        Ok(Solution { depths, counts })
    }

    /// Outcome of a canonical position
    pub fn outcome(&self, position: Position) -> Option<Outcome> {
        self.depth(position).map(Outcome::from_depth)
    }

    /// Depth of a canonical position
    pub fn depth(&self, position: Position) -> Option<Depth> {
        self.depth_at(universe::index_of(position))
    }

    pub(crate) fn depth_at(&self, index: usize) -> Option<Depth> {
        depth::decode(self.depths[index])
    }

    /// Look up any position, canonicalizing it first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalPosition`] if the side to move already stands
    /// on a square, or [`Error::UnknownPosition`] if the solution has no
    /// entry for it.
    pub fn lookup(&self, position: Position) -> Result<Entry> {
        if !position.is_legal() {
            return Err(Error::IllegalPosition {
                position: format!("{position:?}"),
            });
        }
        let canonical = position.canonical();
        let depth = self.depth(canonical).ok_or_else(|| Error::UnknownPosition {
            position: format!("{canonical:?}"),
        })?;
        Ok(Entry {
            position: canonical,
            depth,
        })
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }

    /// Number of solved positions
    pub fn len(&self) -> usize {
        self.counts.total()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries in position order
    pub fn entries(&self) -> impl Iterator<Item = Entry> + '_ {
        self.depths
            .iter()
            .enumerate()
            .filter_map(|(index, &raw)| {
                depth::decode(raw).map(|depth| Entry {
                    position: universe::position_at(index),
                    depth,
                })
            })
    }

    /// Number of positions at each depth
    pub fn histogram(&self) -> BTreeMap<Depth, usize> {
        let mut histogram = BTreeMap::new();
        for depth in self.assigned() {
            *histogram.entry(depth).or_insert(0) += 1;
        }
        histogram
    }

    /// Longest forced game
    pub fn max_depth(&self) -> Option<Depth> {
        self.assigned().max()
    }

    /// Deepest draw, the one furthest from any escape
    pub fn min_depth(&self) -> Option<Depth> {
        self.assigned().min()
    }

    fn assigned(&self) -> impl Iterator<Item = Depth> + '_ {
        self.depths.iter().filter_map(|&raw| depth::decode(raw))
    }
}
