//! Move generation for Hanoi configurations.

use crate::heuristic::score;
use crate::puzzle::{Configuration, Move, Peg};

/// Peg pairs in the fixed generation order.
const MOVE_ORDER: [(Peg, Peg); 6] = [
    (Peg::A, Peg::B),
    (Peg::A, Peg::C),
    (Peg::B, Peg::A),
    (Peg::B, Peg::C),
    (Peg::C, Peg::A),
    (Peg::C, Peg::B),
];

/// Every legal successor of `config`, paired with the move producing it.
///
/// Successors come out in the fixed order A→B, A→C, B→A, B→C, C→A, C→B,
/// skipping illegal moves.
pub fn next_states(config: &Configuration, _disk_count: usize) -> Vec<(Configuration, Move)> {
    MOVE_ORDER
        .iter()
        .map(|&(from, to)| Move::new(from, to))
        .filter(|mv| config.check_move(*mv).is_ok())
        .map(|mv| (config.moved(mv), mv))
        .collect()
}

/// Same successors as [`next_states`], best-scoring first.
///
/// The sort is stable, so equally scored successors keep the generation order.
pub fn next_states_ordered(
    config: &Configuration,
    disk_count: usize,
) -> Vec<(Configuration, Move)> {
    let mut successors = next_states(config, disk_count);
    successors.sort_by(|(a, _), (b, _)| score(a, disk_count).total_cmp(&score(b, disk_count)));
    successors
}
