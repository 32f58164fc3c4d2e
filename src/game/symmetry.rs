//! D4 symmetry group operations for position canonicalization

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::board::SIDE;

const ROW_PATTERNS: usize = 1 << SIDE;

static TABLES: LazyLock<Vec<SymmetryTable>> =
    LazyLock::new(|| D4Transform::all().into_iter().map(SymmetryTable::new).collect());

/// D4 symmetry transformation (dihedral group of the square)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Rotation in degrees (0, 90, 180, 270)
    pub rotation: u16,
    /// Whether to apply reflection
    pub reflection: bool,
}

impl D4Transform {
    /// Create identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotation: 0,
            reflection: false,
        }
    }

    /// Get all 8 D4 transforms, identity first
    pub fn all() -> Vec<D4Transform> {
        let mut transforms = Vec::with_capacity(8);
        for rotation in [0, 90, 180, 270] {
            transforms.push(D4Transform {
                rotation,
                reflection: false,
            });
            transforms.push(D4Transform {
                rotation,
                reflection: true,
            });
        }
        transforms
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Apply transform to a cell (0-24)
    pub fn transform_cell(&self, cell: usize) -> usize {
        let last = SIDE - 1;
        let (mut row, mut col) = (cell / SIDE, cell % SIDE);

        // Mirror across the vertical axis before rotating
        if self.reflection {
            col = last - col;
        }

        // Rotate clockwise
        for _ in 0..(self.rotation / 90) {
            let new_row = col;
            let new_col = last - row;
            row = new_row;
            col = new_col;
        }

        row * SIDE + col
    }

    /// Apply the transform to a cell mask
    pub fn apply_to_mask(&self, mask: u32) -> u32 {
        super::board::cells(mask).fold(0, |image, cell| image | 1 << self.transform_cell(cell))
    }
}

/// Precomputed mask permutation for one transform.
///
/// The board mask is split into its five rows; each row pattern maps to a
/// precomputed image, so a whole mask is transformed with five lookups.
#[derive(Debug, Clone)]
pub struct SymmetryTable {
    transform: D4Transform,
    rows: [[u32; ROW_PATTERNS]; SIDE],
}

impl SymmetryTable {
    fn new(transform: D4Transform) -> Self {
        let mut rows = [[0u32; ROW_PATTERNS]; SIDE];
        for (row, images) in rows.iter_mut().enumerate() {
            for (pattern, image) in images.iter_mut().enumerate() {
                *image = transform.apply_to_mask((pattern as u32) << (row * SIDE));
            }
        }
        SymmetryTable { transform, rows }
    }

    pub fn transform(&self) -> D4Transform {
        self.transform
    }

    /// Transform a cell mask
    #[inline]
    pub fn apply(&self, mask: u32) -> u32 {
        let low = (ROW_PATTERNS - 1) as u32;
        self.rows[0][(mask & low) as usize]
            | self.rows[1][((mask >> SIDE) & low) as usize]
            | self.rows[2][((mask >> (2 * SIDE)) & low) as usize]
            | self.rows[3][((mask >> (3 * SIDE)) & low) as usize]
            | self.rows[4][((mask >> (4 * SIDE)) & low) as usize]
    }
}

/// Lookup tables for all 8 transforms, identity first
pub fn tables() -> &'static [SymmetryTable] {
    &TABLES
}
