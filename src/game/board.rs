//! Board topology: cell adjacency and the catalogue of winning squares
//!
//! Cells are numbered row by row:
//!
//! ```text
//!  0  1  2  3  4
//!  5  6  7  8  9
//! 10 11 12 13 14
//! 15 16 17 18 19
//! 20 21 22 23 24
//! ```
//!
//! A marker moves to any of the (up to eight) surrounding cells. A side wins
//! when its four markers form the corners of a square, including tilted
//! squares such as `(1, 5, 7, 11)`.

use std::sync::LazyLock;

/// Width and height of the board
pub const SIDE: usize = 5;

/// Number of cells on the board
pub const CELLS: usize = SIDE * SIDE;

/// Number of markers each side controls
pub const MARKERS: usize = 4;

/// Mask with one bit set for every cell of the board
pub const BOARD_MASK: u32 = (1 << CELLS) - 1;

static TOPOLOGY: LazyLock<Topology> = LazyLock::new(Topology::build);

/// Immutable adjacency and square data, built once on first use.
#[derive(Debug)]
pub struct Topology {
    neighbors: [u32; CELLS],
    squares: Vec<u32>,
    squares_by_cell: Vec<Vec<u32>>,
}

impl Topology {
    /// Shared topology instance
    pub fn get() -> &'static Topology {
        &TOPOLOGY
    }

    fn build() -> Self {
        let mut neighbors = [0u32; CELLS];
        for (cell, mask) in neighbors.iter_mut().enumerate() {
            let (row, col) = coordinates(cell);
            for dr in -1..=1 {
                for dc in -1..=1 {
                    if (dr, dc) == (0, 0) {
                        continue;
                    }
                    if let Some(neighbor) = cell_at(row + dr, col + dc) {
                        *mask |= cell_mask(neighbor);
                    }
                }
            }
        }

        // Every square is generated exactly once: from each corner there is a
        // single outgoing edge (a, b) with a >= 1, b >= 0 whose quarter turn
        // (b, -a) is the other edge.
        let mut squares = Vec::new();
        let side = SIDE as isize;
        for cell in 0..CELLS {
            let (row, col) = coordinates(cell);
            for a in 1..side {
                for b in 0..side {
                    let corners = [
                        cell_at(row, col),
                        cell_at(row + a, col + b),
                        cell_at(row + a + b, col + b - a),
                        cell_at(row + b, col - a),
                    ];
                    if let [Some(c0), Some(c1), Some(c2), Some(c3)] = corners {
                        squares.push(cell_mask(c0) | cell_mask(c1) | cell_mask(c2) | cell_mask(c3));
                    }
                }
            }
        }
        squares.sort_unstable();
        squares.dedup();

        let mut squares_by_cell = vec![Vec::new(); CELLS];
        for &square in &squares {
            for cell in cells(square) {
                squares_by_cell[cell].push(square);
            }
        }

        Topology {
            neighbors,
            squares,
            squares_by_cell,
        }
    }

    /// Mask of the cells adjacent to `cell`
    pub fn neighbors(&self, cell: usize) -> u32 {
        self.neighbors[cell]
    }

    /// All winning squares as cell masks, in ascending mask order
    pub fn squares(&self) -> &[u32] {
        &self.squares
    }

    /// Winning squares that have `cell` as one of their corners
    pub fn squares_containing(&self, cell: usize) -> &[u32] {
        &self.squares_by_cell[cell]
    }

    /// Check whether a four-cell mask is one of the winning squares
    pub fn is_square(&self, mask: u32) -> bool {
        if mask == 0 {
            return false;
        }
        let lowest = mask.trailing_zeros() as usize;
        self.squares_by_cell[lowest].contains(&mask)
    }
}

/// Mask with only `cell` set
pub const fn cell_mask(cell: usize) -> u32 {
    1 << cell
}

/// Iterate the cells of a mask in ascending order
pub fn cells(mask: u32) -> impl Iterator<Item = usize> {
    let mut remaining = mask;
    std::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let cell = remaining.trailing_zeros() as usize;
        remaining &= remaining - 1;
        Some(cell)
    })
}

fn coordinates(cell: usize) -> (isize, isize) {
    ((cell / SIDE) as isize, (cell % SIDE) as isize)
}

fn cell_at(row: isize, col: isize) -> Option<usize> {
    let side = SIDE as isize;
    if (0..side).contains(&row) && (0..side).contains(&col) {
        Some((row * side + col) as usize)
    } else {
        None
    }
}
