//! Retrograde solver: classification, depths and invariant checks
//!
//! The pipeline runs in three stages, each handing a frozen result to the next:
//!
//! 1. [`classify::Classifier`] enumerates every legal canonical position and
//!    propagates terminal losses backwards until the win/loss/draw partition
//!    reaches its fixpoint.
//! 2. [`depth::compute_depths`] assigns distances: optimal game length for
//!    decisive positions, negated distance to the nearest escape for draws.
//! 3. [`verify::verify`] re-checks every position against its children.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Result;

pub mod classify;
pub mod depth;
pub mod solution;
pub mod universe;
pub mod verify;

pub use classify::{Classification, Classifier, OutcomeCounts, classify};
pub use depth::{DepthMap, compute_depths};
pub use solution::{Entry, Solution};
pub use verify::verify;

/// Signed distance attached to every classified position.
///
/// Mover-loses positions have even depth (0 when terminal), mover-wins
/// positions odd depth, draws negative depth.
pub type Depth = i16;

/// Game-theoretic value of a position for the side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    MoverWins,
    MoverLoses,
    Draw,
}

impl Outcome {
    /// Recover the outcome from a depth value
    pub fn from_depth(depth: Depth) -> Self {
        if depth < 0 {
            Outcome::Draw
        } else if depth % 2 == 1 {
            Outcome::MoverWins
        } else {
            Outcome::MoverLoses
        }
    }

    /// Whether `depth` has the sign and parity this outcome requires
    pub fn admits_depth(self, depth: Depth) -> bool {
        Outcome::from_depth(depth) == self
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::MoverWins => "mover wins",
            Outcome::MoverLoses => "mover loses",
            Outcome::Draw => "draw",
        };
        write!(f, "{label}")
    }
}

/// Run the whole pipeline: classify, then compute depths.
///
/// # Errors
///
/// Returns [`crate::Error::InvariantViolation`] if the depth passes leave a
/// classified position without a depth.
pub fn solve() -> Result<Solution> {
    let classification = classify();
    let depths = compute_depths(&classification)?;
    Ok(Solution::new(classification, depths))
}
