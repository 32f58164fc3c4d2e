//! Whole-game properties of the solved Mondrago state space
//!
//! The game is solved once per test binary and shared between tests.

use std::sync::OnceLock;

use mondrago::{
    Entry, Error, Outcome, OutcomeCounts, Position, Solution,
    report::{Explorer, summarize, winning_moves},
    solver::universe,
};

/// Legal positions up to symmetry
const LEGAL_POSITIONS: usize = 9_432_071;

fn solution() -> &'static Solution {
    static SOLUTION: OnceLock<Solution> = OnceLock::new();
    SOLUTION.get_or_init(|| mondrago::solve().expect("solver should succeed"))
}

#[test]
fn test_solution_passes_verification() {
    mondrago::verify(solution()).expect("every position should be consistent with its children");
}

#[test]
fn test_partition_covers_every_legal_position() {
    let solution = solution();
    let counts = solution.counts();
    assert_eq!(counts.total(), LEGAL_POSITIONS);
    assert_eq!(solution.len(), LEGAL_POSITIONS);
    assert_eq!(solution.entries().count(), LEGAL_POSITIONS);

    let mut enumerated = 0usize;
    universe::for_each_legal_position(|_, position| {
        enumerated += 1;
        assert!(
            solution.depth(position).is_some(),
            "{position:?} has no depth"
        );
    });
    assert_eq!(enumerated, LEGAL_POSITIONS);
}

#[test]
fn test_terminal_positions_are_losses_at_depth_zero() {
    let mut terminals = 0usize;
    for entry in solution().entries() {
        if entry.position.is_terminal() {
            terminals += 1;
            assert_eq!(entry.depth, 0, "{:?}", entry.position);
            assert_eq!(entry.outcome(), Outcome::MoverLoses);
        } else {
            assert_ne!(entry.depth, 0, "{:?} is not terminal", entry.position);
        }
    }
    assert!(terminals > 0);
}

#[test]
fn test_depth_parity_agrees_with_classification() {
    let solution = solution();
    let mut recount = OutcomeCounts::default();
    for entry in solution.entries() {
        match entry.outcome() {
            Outcome::MoverWins => assert!(entry.depth > 0 && entry.depth % 2 == 1),
            Outcome::MoverLoses => assert!(entry.depth >= 0 && entry.depth % 2 == 0),
            Outcome::Draw => assert!(entry.depth < 0),
        }
        recount.record(entry.outcome());
    }
    // Counts recorded by the classifier, before any depth existed
    assert_eq!(recount, solution.counts());
    assert!(solution.counts().draws > 0);

    let deepest = solution.max_depth().unwrap();
    assert_eq!(Outcome::from_depth(deepest), Outcome::MoverWins);
}

#[test]
fn test_one_move_win() {
    // Sliding 7 -> 6 completes (0, 1, 5, 6)
    let position = Position::from_cells(&[0, 1, 5, 7], &[20, 21, 22, 23]).unwrap();
    let entry = solution().lookup(position).unwrap();
    assert_eq!(entry.outcome(), Outcome::MoverWins);
    assert_eq!(entry.depth, 1);

    let moves = winning_moves(solution(), position);
    assert!(
        moves
            .iter()
            .any(|next| next.opponent().cells() == [0, 1, 5, 6])
    );
}

#[test]
fn test_lookup_is_symmetry_invariant() {
    let initial = Position::from_cells(&[0, 1, 23, 24], &[3, 4, 20, 21]).unwrap();
    let mirrored = Position::from_cells(&[3, 4, 20, 21], &[0, 1, 23, 24]).unwrap();
    let a = solution().lookup(initial).unwrap();
    let b = solution().lookup(mirrored).unwrap();
    assert_eq!(a, b);

    let summary = summarize(solution(), a.position).unwrap();
    assert_eq!(summary.depth, a.depth);
}

#[test]
fn test_corrupted_solution_fails_verification() {
    let solution = solution();
    let target = solution
        .entries()
        .find(|entry| entry.outcome() == Outcome::MoverWins && entry.depth > 1)
        .unwrap();
    let corrupted = Solution::from_entries(solution.entries().map(|entry| {
        if entry == target {
            Entry {
                depth: entry.depth + 2,
                ..entry
            }
        } else {
            entry
        }
    }))
    .unwrap();
    assert!(matches!(
        mondrago::verify(&corrupted),
        Err(Error::InvariantViolation { .. })
    ));
}

#[test]
fn test_puzzles_have_a_unique_solution() {
    let solution = solution();
    let explorer = Explorer::new(solution);
    for position in explorer.puzzle_positions(3, 18).unwrap() {
        let summary = summarize(solution, position).unwrap();
        assert_eq!(summary.depth, 3);
        assert_eq!(summary.wins, 1);
        assert_eq!(summary.draws, 0);
        assert!(summary.losses > 18);
        assert!(summary.fastest_reply.unwrap() > 1);
        assert!(!winning_moves(solution, position).is_empty());
    }
}

#[test]
fn test_deepest_positions_report() {
    let report = Explorer::new(solution()).deepest_positions().unwrap();
    let deepest = solution().max_depth().unwrap();
    assert!(report.contains(&format!("d: {deepest}, W: ")));
}
