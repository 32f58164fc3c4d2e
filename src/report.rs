//! Reports built on a frozen solution: statistics, move summaries and the
//! exploration files (initial positions, safest draws, deepest wins, puzzles)

pub mod analysis;
pub mod explorer;
pub mod render;
pub mod stats;

pub use analysis::{MoveSummary, is_symmetrical, summarize, winning_moves};
pub use explorer::{Explorer, PuzzleTarget};
pub use render::{render_board, render_move, render_pair};
pub use stats::{Stats, format_stats, write_stats};
