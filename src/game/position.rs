//! Marker sets, positions and canonicalization

use std::{cmp::Ordering, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::{
    board::{self, BOARD_MASK, CELLS, MARKERS, SIDE, Topology},
    symmetry::{self, D4Transform},
};
use crate::{Error, Result};

/// The four cells occupied by one side, as a 25-bit mask.
///
/// Marker sets order like their sorted cell sequences: `(0, 1, 5, 6)` comes
/// before `(0, 2, 3, 4)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarkerSet(u32);

impl MarkerSet {
    /// Build a marker set from exactly four distinct cells.
    ///
    /// # Errors
    ///
    /// Returns error if a cell is out of bounds or the cells are not four
    /// distinct values.
    pub fn from_cells(cells: &[usize]) -> Result<Self> {
        let mut mask = 0u32;
        for &cell in cells {
            if cell >= CELLS {
                return Err(Error::InvalidCell { cell });
            }
            mask |= board::cell_mask(cell);
        }
        if cells.len() != MARKERS || mask.count_ones() as usize != MARKERS {
            return Err(Error::InvalidMarkerCount {
                expected: MARKERS,
                got: mask.count_ones() as usize,
                context: format!("{cells:?}"),
            });
        }
        Ok(MarkerSet(mask))
    }

    /// Wrap a mask already known to hold four cells of the board
    pub(crate) const fn from_mask(mask: u32) -> Self {
        MarkerSet(mask)
    }

    pub fn mask(self) -> u32 {
        self.0
    }

    /// Occupied cells in ascending order
    pub fn cells(self) -> [usize; MARKERS] {
        let mut cells = [0; MARKERS];
        for (slot, cell) in cells.iter_mut().zip(board::cells(self.0)) {
            *slot = cell;
        }
        cells
    }

    pub fn iter(self) -> impl Iterator<Item = usize> {
        board::cells(self.0)
    }

    pub fn contains(self, cell: usize) -> bool {
        self.0 & board::cell_mask(cell) != 0
    }

    pub fn is_disjoint(self, other: MarkerSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Check whether the markers form a winning square
    pub fn is_square(self) -> bool {
        Topology::get().is_square(self.0)
    }

    /// Replace the marker on `from` with one on `to`
    #[must_use = "moved returns a new marker set; the original is unchanged"]
    pub fn moved(self, from: usize, to: usize) -> Self {
        MarkerSet(self.0 ^ board::cell_mask(from) ^ board::cell_mask(to))
    }

    #[must_use]
    pub fn transform(self, transform: &D4Transform) -> Self {
        MarkerSet(transform.apply_to_mask(self.0))
    }
}

impl Ord for MarkerSet {
    fn cmp(&self, other: &Self) -> Ordering {
        let difference = self.0 ^ other.0;
        if difference == 0 {
            Ordering::Equal
        } else if self.0 & (1 << difference.trailing_zeros()) != 0 {
            // The lowest differing cell belongs to us, so our sorted sequence
            // has the smaller element at the first mismatch
            Ordering::Less
        } else {
            Ordering::Greater
        }
    }
}

impl PartialOrd for MarkerSet {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.cells();
        write!(f, "({a}, {b}, {c}, {d})")
    }
}

impl fmt::Display for MarkerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A game position: the side to move and the side that just moved.
///
/// Derived ordering compares `mover` first, then `opponent`, which is the
/// order used to pick canonical representatives and to sort the database.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    mover: MarkerSet,
    opponent: MarkerSet,
}

impl Position {
    /// Create a position from two disjoint marker sets.
    ///
    /// # Errors
    ///
    /// Returns error if the two sides share a cell.
    pub fn new(mover: MarkerSet, opponent: MarkerSet) -> Result<Self> {
        if !mover.is_disjoint(opponent) {
            return Err(Error::OverlappingMarkers {
                context: format!("{mover} {opponent}"),
            });
        }
        Ok(Position { mover, opponent })
    }

    /// Create a position from two cell lists
    pub fn from_cells(mover: &[usize], opponent: &[usize]) -> Result<Self> {
        Self::new(MarkerSet::from_cells(mover)?, MarkerSet::from_cells(opponent)?)
    }

    pub(crate) const fn from_sets(mover: MarkerSet, opponent: MarkerSet) -> Self {
        Position { mover, opponent }
    }

    /// The side about to move
    pub fn mover(&self) -> MarkerSet {
        self.mover
    }

    /// The side that just moved
    pub fn opponent(&self) -> MarkerSet {
        self.opponent
    }

    /// Mask of all occupied cells
    pub fn occupied(&self) -> u32 {
        self.mover.0 | self.opponent.0
    }

    /// Mask of all empty cells
    pub fn empty(&self) -> u32 {
        !self.occupied() & BOARD_MASK
    }

    /// A position is illegal when the side to move already sits on a square
    pub fn is_legal(&self) -> bool {
        !self.mover.is_square()
    }

    /// The side that just moved completed a square and has won
    pub fn is_terminal(&self) -> bool {
        self.opponent.is_square()
    }

    /// Apply a D4 transform to both sides
    #[must_use]
    pub fn transform(&self, transform: &D4Transform) -> Self {
        Position {
            mover: self.mover.transform(transform),
            opponent: self.opponent.transform(transform),
        }
    }

    /// Canonical representative of the position's symmetry orbit
    pub fn canonical(&self) -> Self {
        canonicalize(self.mover, self.opponent)
    }

    pub fn is_canonical(&self) -> bool {
        self.canonical() == *self
    }

    /// Pack into a single integer: mover bits low, opponent bits high
    pub fn pack(&self) -> u64 {
        u64::from(self.mover.0) | u64::from(self.opponent.0) << CELLS
    }

    /// Inverse of [`Position::pack`].
    ///
    /// # Errors
    ///
    /// Returns error if the value does not hold two disjoint four-cell sets.
    pub fn unpack(packed: u64) -> Result<Self> {
        let invalid = || Error::InvalidPositionFormat {
            input: format!("{packed:#x}"),
            expected: "two disjoint 25-bit masks of four cells".to_string(),
        };
        if packed >> (2 * CELLS) != 0 {
            return Err(invalid());
        }
        let mover = (packed & u64::from(BOARD_MASK)) as u32;
        let opponent = (packed >> CELLS) as u32;
        if mover.count_ones() as usize != MARKERS || opponent.count_ones() as usize != MARKERS {
            return Err(invalid());
        }
        Position::new(MarkerSet(mover), MarkerSet(opponent)).map_err(|_| invalid())
    }
}

/// Canonical representative of `(mover, opponent)` under the 8 board symmetries.
///
/// Among the 8 images the smallest one wins, comparing the sorted mover cells
/// first and the sorted opponent cells second.
pub fn canonicalize(mover: MarkerSet, opponent: MarkerSet) -> Position {
    let mut best = Position { mover, opponent };
    for table in symmetry::tables() {
        let image = Position {
            mover: MarkerSet(table.apply(mover.0)),
            opponent: MarkerSet(table.apply(opponent.0)),
        };
        if image < best {
            best = image;
        }
    }
    best
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?},{:?})", self.mover, self.opponent)
    }
}

/// Renders the board with `X` for the mover and `O` for the opponent
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            let line: Vec<String> = (0..SIDE)
                .map(|col| cell_char(self, row * SIDE + col).to_string())
                .collect();
            write!(f, "{}", line.join(" "))?;
            if row + 1 < SIDE {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

pub(crate) fn cell_char(position: &Position, cell: usize) -> char {
    if position.mover.contains(cell) {
        'X'
    } else if position.opponent.contains(cell) {
        'O'
    } else {
        '.'
    }
}

/// Parses `"0,1,23,24/3,4,20,21"` (mover cells, then opponent cells)
impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let format_error = || Error::InvalidPositionFormat {
            input: s.to_string(),
            expected: "m0,m1,m2,m3/o0,o1,o2,o3".to_string(),
        };
        let (mover, opponent) = s.trim().split_once('/').ok_or_else(format_error)?;
        let parse_side = |side: &str| -> Result<Vec<usize>> {
            side.split(',')
                .map(|cell| cell.trim().parse::<usize>().map_err(|_| format_error()))
                .collect()
        };
        Position::from_cells(&parse_side(mover)?, &parse_side(opponent)?)
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng, seq::index::sample};

    use super::*;

    fn random_position(rng: &mut StdRng) -> Position {
        let cells = sample(rng, CELLS, 2 * MARKERS).into_vec();
        Position::from_cells(&cells[..MARKERS], &cells[MARKERS..]).unwrap()
    }

    #[test]
    fn test_marker_set_validation() {
        assert!(MarkerSet::from_cells(&[0, 1, 2, 3]).is_ok());
        assert!(MarkerSet::from_cells(&[0, 1, 2]).is_err());
        assert!(MarkerSet::from_cells(&[0, 1, 2, 2]).is_err());
        assert!(MarkerSet::from_cells(&[0, 1, 2, 25]).is_err());
        assert!(Position::from_cells(&[0, 1, 2, 3], &[3, 4, 5, 6]).is_err());
    }

    #[test]
    fn test_marker_set_order_is_lexicographic() {
        let sets: Vec<[usize; 4]> = vec![
            [0, 1, 5, 6],
            [0, 2, 3, 4],
            [0, 1, 2, 24],
            [3, 4, 20, 21],
            [1, 2, 3, 4],
            [0, 1, 2, 3],
        ];
        let mut by_marker_set: Vec<MarkerSet> = sets
            .iter()
            .map(|cells| MarkerSet::from_cells(cells).unwrap())
            .collect();
        by_marker_set.sort();
        let mut by_sequence = sets.clone();
        by_sequence.sort();
        let resorted: Vec<[usize; 4]> = by_marker_set.iter().map(|s| s.cells()).collect();
        assert_eq!(resorted, by_sequence);
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let canonical = random_position(&mut rng).canonical();
            assert_eq!(canonical.canonical(), canonical);
            assert!(canonical.is_canonical());
        }
    }

    #[test]
    fn test_canonical_is_orbit_invariant() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..2_000 {
            let position = random_position(&mut rng);
            let canonical = position.canonical();
            for transform in D4Transform::all() {
                assert_eq!(position.transform(&transform).canonical(), canonical);
            }
        }
    }

    #[test]
    fn test_canonical_is_smallest_image() {
        let mut rng = StdRng::seed_from_u64(13);
        for _ in 0..500 {
            let position = random_position(&mut rng);
            let canonical = position.canonical();
            for transform in D4Transform::all() {
                assert!(canonical <= position.transform(&transform));
            }
        }
    }

    #[test]
    fn test_initial_position_representative() {
        let position = Position::from_cells(&[0, 1, 23, 24], &[3, 4, 20, 21]).unwrap();
        let canonical = position.canonical();
        assert_eq!(canonical.mover().cells(), [0, 1, 23, 24]);
        assert_eq!(canonical.opponent().cells(), [3, 4, 20, 21]);
    }

    #[test]
    fn test_legality_and_terminality() {
        let square = [0, 1, 5, 6];
        let other = [10, 11, 12, 13];
        let illegal = Position::from_cells(&square, &other).unwrap();
        assert!(!illegal.is_legal());
        assert!(!illegal.is_terminal());

        let terminal = Position::from_cells(&other, &square).unwrap();
        assert!(terminal.is_legal());
        assert!(terminal.is_terminal());
    }

    #[test]
    fn test_pack_round_trip() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..200 {
            let position = random_position(&mut rng);
            assert_eq!(Position::unpack(position.pack()).unwrap(), position);
        }
        assert!(Position::unpack(0).is_err());
        assert!(Position::unpack(u64::MAX).is_err());
    }

    #[test]
    fn test_parse_position() {
        let position: Position = "0,1,23,24/3,4,20,21".parse().unwrap();
        assert_eq!(position.mover().cells(), [0, 1, 23, 24]);
        assert_eq!(position.opponent().cells(), [3, 4, 20, 21]);

        assert!("0,1,23,24".parse::<Position>().is_err());
        assert!("0,1,23/3,4,20,21".parse::<Position>().is_err());
        assert!("a,b,c,d/3,4,20,21".parse::<Position>().is_err());
    }

    #[test]
    fn test_display() {
        let position = Position::from_cells(&[0, 1, 23, 24], &[3, 4, 20, 21]).unwrap();
        let rendered = position.to_string();
        let rows: Vec<&str> = rendered.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], "X X . O O");
        assert_eq!(rows[2], ". . . . .");
        assert_eq!(rows[4], "O O . X X");
    }
}
