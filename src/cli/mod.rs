//! CLI infrastructure for the Mondrago solver
//!
//! This module provides the command-line interface for solving the game,
//! summarizing and inspecting a stored solution, and mining reports from it.

pub mod commands;
pub mod config;
pub mod logging;
pub mod output;
