//! Structural properties of the board that need no solving

use mondrago::{
    MarkerSet, Position,
    game::{D4Transform, Topology, board::cells, moves, parents},
    solver::universe::{self, INDEX_SPACE},
};

/// Every combination of four cells, smallest first
fn marker_sets() -> impl Iterator<Item = MarkerSet> {
    (0..25usize).flat_map(|a| {
        (a + 1..25).flat_map(move |b| {
            (b + 1..25).flat_map(move |c| {
                (c + 1..25).map(move |d| MarkerSet::from_cells(&[a, b, c, d]).unwrap())
            })
        })
    })
}

#[test]
fn test_no_legal_position_is_blocked() {
    // A side can only be stuck if four opposing markers cover every empty
    // neighbor of its own markers
    let topology = Topology::get();
    let mut tightest = usize::MAX;
    for mover in marker_sets().filter(|set| !set.is_square()) {
        let reach = mover
            .iter()
            .fold(0u32, |mask, cell| mask | topology.neighbors(cell))
            & !mover.mask();
        tightest = tightest.min(cells(reach).count());
    }
    assert!(tightest > 4, "a mover with {tightest} free neighbors can be blocked");
}

#[test]
fn test_square_count() {
    assert_eq!(marker_sets().filter(|set| set.is_square()).count(), 50);
}

#[test]
fn test_legal_positions_are_canonical_and_indexed_in_order() {
    let mut previous: Option<(usize, Position)> = None;
    let mut visited = 0usize;
    universe::for_each_legal_position(|index, position| {
        visited += 1;
        if visited % 997 != 0 {
            return;
        }
        assert!(index < INDEX_SPACE);
        assert!(position.is_legal());
        assert!(position.is_canonical());
        assert_eq!(universe::index_of(position), index);
        if let Some((last_index, last)) = previous {
            assert!(last_index < index);
            assert!(last < position);
        }
        previous = Some((index, position));
    });
    assert_eq!(visited, 9_432_071);
}

#[test]
fn test_moves_of_every_symmetric_image_agree() {
    let position = Position::from_cells(&[0, 2, 11, 18], &[6, 7, 13, 22]).unwrap();
    let expected = moves(position.canonical());
    for transform in D4Transform::all() {
        let image = position.transform(&transform);
        assert_eq!(moves(image), expected);
        assert_eq!(parents(image), parents(position.canonical()));
    }
}
