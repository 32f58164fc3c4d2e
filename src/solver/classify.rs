//! Retrograde classification of every legal position

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{
    Outcome,
    universe::{self, INDEX_SPACE, IndexSet},
};
use crate::game::{Position, moves, parents};

/// Number of positions per outcome
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeCounts {
    pub mover_wins: usize,
    pub mover_loses: usize,
    pub draws: usize,
}

impl OutcomeCounts {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::MoverWins => self.mover_wins += 1,
            Outcome::MoverLoses => self.mover_loses += 1,
            Outcome::Draw => self.draws += 1,
        }
    }

    pub fn get(&self, outcome: Outcome) -> usize {
        match outcome {
            Outcome::MoverWins => self.mover_wins,
            Outcome::MoverLoses => self.mover_loses,
            Outcome::Draw => self.draws,
        }
    }

    /// Number of legal positions
    pub fn total(&self) -> usize {
        self.mover_wins + self.mover_loses + self.draws
    }
}

/// Frozen win/loss/draw partition of all legal canonical positions.
#[derive(Debug, Clone)]
pub struct Classification {
    outcomes: Vec<Option<Outcome>>,
    counts: OutcomeCounts,
}

impl Classification {
    fn from_outcomes(outcomes: Vec<Option<Outcome>>) -> Self {
        let mut counts = OutcomeCounts::default();
        for outcome in outcomes.iter().flatten() {
            counts.record(*outcome);
        }
        Classification { outcomes, counts }
    }

    /// Outcome of a canonical position, `None` if it is not a legal canonical position
    pub fn outcome(&self, position: Position) -> Option<Outcome> {
        self.outcomes[universe::index_of(position)]
    }

    pub(crate) fn outcome_at(&self, index: usize) -> Option<Outcome> {
        self.outcomes[index]
    }

    pub fn counts(&self) -> OutcomeCounts {
        self.counts
    }

    /// Legal positions with their outcomes, in position order
    pub fn positions(&self) -> impl Iterator<Item = (usize, Position, Outcome)> + '_ {
        self.outcomes
            .iter()
            .enumerate()
            .filter_map(|(index, outcome)| {
                outcome.map(|outcome| (index, universe::position_at(index), outcome))
            })
    }
}

/// Worklist-driven fixpoint solver.
///
/// Every legal position starts as a draw unless it is terminal. A position is
/// only re-examined after one of its children changed classification, and it
/// changes classification at most once (draw to win, or draw to loss).
pub struct Classifier {
    outcomes: Vec<Option<Outcome>>,
    worklist: Vec<Position>,
    queued: IndexSet,
}

impl Classifier {
    /// Enumerate the legal positions and queue the parents of terminal ones.
    pub fn seed() -> Self {
        let mut outcomes = vec![None; INDEX_SPACE];
        let mut terminals = Vec::new();
        let mut legal = 0usize;
        universe::for_each_legal_position(|index, position| {
            legal += 1;
            if position.is_terminal() {
                outcomes[index] = Some(Outcome::MoverLoses);
                terminals.push(position);
            } else {
                outcomes[index] = Some(Outcome::Draw);
            }
        });
        info!(
            "enumerated {legal} legal positions, {} terminal",
            terminals.len()
        );

        let mut classifier = Classifier {
            outcomes,
            worklist: Vec::new(),
            queued: IndexSet::new(INDEX_SPACE),
        };
        for terminal in terminals {
            classifier.queue_draw_parents(terminal);
        }
        info!("seeded worklist with {} positions", classifier.worklist.len());
        classifier
    }

    /// Positions waiting for re-evaluation
    pub fn pending(&self) -> usize {
        self.worklist.len()
    }

    /// Run the fixpoint loop to completion and freeze the result.
    pub fn run(mut self) -> Classification {
        let mut processed = 0usize;
        while let Some(position) = self.worklist.pop() {
            let index = universe::index_of(position);
            self.queued.remove(index);
            processed += 1;
            if processed.is_multiple_of(1_000_000) {
                debug!(
                    "processed {processed} positions, {} pending",
                    self.worklist.len()
                );
            }

            if self.outcomes[index] != Some(Outcome::Draw) {
                continue;
            }

            let children = moves(position);
            let decided = if children
                .iter()
                .any(|&child| self.outcome(child) == Some(Outcome::MoverLoses))
            {
                Outcome::MoverWins
            } else if children
                .iter()
                .all(|&child| self.outcome(child) == Some(Outcome::MoverWins))
            {
                Outcome::MoverLoses
            } else {
                continue;
            };

            self.outcomes[index] = Some(decided);
            self.queue_draw_parents(position);
        }

        let classification = Classification::from_outcomes(self.outcomes);
        let counts = classification.counts();
        info!(
            "classification reached fixpoint after {processed} evaluations: {} wins, {} losses, {} draws",
            counts.mover_wins, counts.mover_loses, counts.draws
        );
        classification
    }

    fn outcome(&self, position: Position) -> Option<Outcome> {
        self.outcomes[universe::index_of(position)]
    }

    fn queue_draw_parents(&mut self, position: Position) {
        for parent in parents(position) {
            let index = universe::index_of(parent);
            if self.outcomes[index] == Some(Outcome::Draw) && self.queued.insert(index) {
                self.worklist.push(parent);
            }
        }
    }
}

/// Classify every legal position
pub fn classify() -> Classification {
    Classifier::seed().run()
}
