//! Mondrago retrograde solver
//!
//! This crate provides:
//! - The 5x5 board topology, its eight symmetries and canonical positions
//! - Forward and backward move generation over the implicit game graph
//! - A retrograde classifier and depth calculator covering every legal position
//! - A post-solve verifier, text and MessagePack databases, and reports

pub mod adapters;
pub mod cli;
pub mod error;
pub mod game;
pub mod ports;
pub mod report;
pub mod solver;

pub use error::{Error, Result};
pub use game::{MarkerSet, Position};
pub use solver::{Depth, Entry, Outcome, OutcomeCounts, Solution, solve, verify};
