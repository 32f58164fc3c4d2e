//! Forward and backward transitions over the implicit game graph

use super::{
    board::{self, Topology},
    position::{Position, canonicalize},
};

/// Positions reached by one legal move, before canonicalization.
///
/// Each entry keeps the board orientation of `position`: the former opponent
/// becomes the mover and the moved marker set becomes the opponent. Illegal
/// and terminal positions have no successors.
pub fn successors(position: Position) -> Vec<Position> {
    if !position.is_legal() || position.is_terminal() {
        return Vec::new();
    }

    let topology = Topology::get();
    let empty = position.empty();
    let mover = position.mover();
    let mut result = Vec::new();
    for from in mover.iter() {
        for to in board::cells(topology.neighbors(from) & empty) {
            result.push(Position::from_sets(position.opponent(), mover.moved(from, to)));
        }
    }
    result
}

/// Canonical positions reachable from `position` by one legal move.
///
/// The result is sorted and free of duplicates; symmetric moves collapse into
/// a single child.
pub fn moves(position: Position) -> Vec<Position> {
    let mut result: Vec<Position> = successors(position)
        .into_iter()
        .map(|next| canonicalize(next.mover(), next.opponent()))
        .collect();
    result.sort_unstable();
    result.dedup();
    result
}

/// Canonical positions from which `position` is reachable by one legal move.
///
/// The opponent of `position` made the last move, so each of its markers is
/// walked back to an empty neighboring cell. Candidates where the side to move
/// would already stand on a square are illegal and discarded.
pub fn parents(position: Position) -> Vec<Position> {
    if !position.is_legal() {
        return Vec::new();
    }

    let topology = Topology::get();
    let empty = position.empty();
    let opponent = position.opponent();
    let mut result = Vec::new();
    for to in opponent.iter() {
        for from in board::cells(topology.neighbors(to) & empty) {
            let previous = opponent.moved(to, from);
            if previous.is_square() {
                continue;
            }
            result.push(canonicalize(previous, position.mover()));
        }
    }
    result.sort_unstable();
    result.dedup();
    result
}
