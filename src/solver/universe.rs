//! Dense index space over ordered (mover, opponent) marker pairs
//!
//! Mover sets are ranked lexicographically among the 4-subsets of the 25
//! cells; the opponent set is ranked among the 4-subsets of the 21 cells the
//! mover leaves free. The combined index therefore follows the `Position`
//! order, and per-position solver state lives in flat arrays.

use std::sync::LazyLock;

use crate::game::{BOARD_MASK, CELLS, MARKERS, MarkerSet, Position};

/// Cells left for the opponent once the mover is placed
const FREE_CELLS: usize = CELLS - MARKERS;

const BINOMIAL: [[usize; MARKERS + 1]; CELLS + 1] = build_binomials();

/// Number of possible mover sets, C(25, 4)
pub const MOVER_SETS: usize = BINOMIAL[CELLS][MARKERS];

/// Number of possible opponent sets for a fixed mover, C(21, 4)
pub const OPPONENT_SETS: usize = BINOMIAL[FREE_CELLS][MARKERS];

/// Size of the index space (all ordered pairs of disjoint marker sets)
pub const INDEX_SPACE: usize = MOVER_SETS * OPPONENT_SETS;

static MOVER_COMBINATIONS: LazyLock<Vec<[usize; MARKERS]>> =
    LazyLock::new(|| combinations(CELLS));

static OPPONENT_COMBINATIONS: LazyLock<Vec<[usize; MARKERS]>> =
    LazyLock::new(|| combinations(FREE_CELLS));

const fn build_binomials() -> [[usize; MARKERS + 1]; CELLS + 1] {
    let mut table = [[0; MARKERS + 1]; CELLS + 1];
    let mut n = 0;
    while n <= CELLS {
        table[n][0] = 1;
        let mut k = 1;
        while k <= MARKERS {
            if n > 0 {
                table[n][k] = table[n - 1][k - 1] + table[n - 1][k];
            }
            k += 1;
        }
        n += 1;
    }
    table
}

/// All 4-subsets of `0..n` in lexicographic order
fn combinations(n: usize) -> Vec<[usize; MARKERS]> {
    let mut result = Vec::with_capacity(BINOMIAL[n][MARKERS]);
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    result.push([a, b, c, d]);
                }
            }
        }
    }
    result
}

/// Lexicographic rank of a sorted 4-subset of `0..n`
fn rank(cells: [usize; MARKERS], n: usize) -> usize {
    let mut rank = 0;
    let mut start = 0;
    for (i, &cell) in cells.iter().enumerate() {
        let k = MARKERS - i;
        // Subsets that agree so far but pick a smaller cell here
        rank += BINOMIAL[n - start][k] - BINOMIAL[n - cell][k];
        start = cell + 1;
    }
    rank
}

/// Cells not covered by `mover`, ascending
fn free_cells(mover: u32) -> [usize; FREE_CELLS] {
    let mut free = [0; FREE_CELLS];
    for (slot, cell) in free
        .iter_mut()
        .zip(crate::game::board::cells(!mover & BOARD_MASK))
    {
        *slot = cell;
    }
    free
}

fn mask_of(cells: impl IntoIterator<Item = usize>) -> u32 {
    cells.into_iter().fold(0, |mask, cell| mask | 1 << cell)
}

/// Dense index of a position
pub fn index_of(position: Position) -> usize {
    let mover = position.mover().mask();
    let mover_rank = rank(position.mover().cells(), CELLS);
    let opponent = position
        .opponent()
        .cells()
        .map(|cell| cell - (mover & ((1 << cell) - 1)).count_ones() as usize);
    mover_rank * OPPONENT_SETS + rank(opponent, FREE_CELLS)
}

/// Position stored at a dense index
pub fn position_at(index: usize) -> Position {
    let mover = mask_of(MOVER_COMBINATIONS[index / OPPONENT_SETS]);
    let free = free_cells(mover);
    let opponent = mask_of(OPPONENT_COMBINATIONS[index % OPPONENT_SETS].map(|slot| free[slot]));
    Position::from_sets(MarkerSet::from_mask(mover), MarkerSet::from_mask(opponent))
}

/// Visit every legal canonical position in index order.
///
/// Pairs whose mover already forms a square are skipped; terminal positions
/// (opponent on a square) are included.
pub fn for_each_legal_position(mut visit: impl FnMut(usize, Position)) {
    for (mover_rank, &mover_cells) in MOVER_COMBINATIONS.iter().enumerate() {
        let mover = MarkerSet::from_mask(mask_of(mover_cells));
        if mover.is_square() {
            continue;
        }
        let free = free_cells(mover.mask());
        for (opponent_rank, &slots) in OPPONENT_COMBINATIONS.iter().enumerate() {
            let opponent = MarkerSet::from_mask(mask_of(slots.map(|slot| free[slot])));
            let position = Position::from_sets(mover, opponent);
            if position.is_canonical() {
                visit(mover_rank * OPPONENT_SETS + opponent_rank, position);
            }
        }
    }
}

/// Fixed-size set of dense indices, one bit per index
#[derive(Debug, Clone)]
pub struct IndexSet {
    words: Vec<u64>,
}

impl IndexSet {
    pub fn new(len: usize) -> Self {
        IndexSet {
            words: vec![0; len.div_ceil(64)],
        }
    }

    /// Insert an index, returning whether it was absent
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = (index / 64, 1u64 << (index % 64));
        let absent = self.words[word] & bit == 0;
        self.words[word] |= bit;
        absent
    }

    pub fn remove(&mut self, index: usize) {
        self.words[index / 64] &= !(1u64 << (index % 64));
    }

    pub fn contains(&self, index: usize) -> bool {
        self.words[index / 64] & (1u64 << (index % 64)) != 0
    }
}
