//! Mondrago game rules: board topology, symmetries, positions and moves

pub mod board;
pub mod position;
pub mod symmetry;
pub mod transitions;

pub use board::{BOARD_MASK, CELLS, MARKERS, SIDE, Topology};
pub use position::{MarkerSet, Position, canonicalize};
pub use symmetry::D4Transform;
pub use transitions::{moves, parents, successors};
