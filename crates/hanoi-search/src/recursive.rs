//! Closed-form recursive solver used as a baseline for the search strategies.

use crate::error::{HanoiError, Result};
use crate::puzzle::{Configuration, Move, Peg, Tower};

/// The `2^n - 1` moves that carry `disk_count` disks from A to C via B.
pub fn solve_recursive(disk_count: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    transfer(disk_count, Peg::A, Peg::B, Peg::C, &mut moves);
    moves
}

fn transfer(n: usize, source: Peg, auxiliary: Peg, destination: Peg, moves: &mut Vec<Move>) {
    if n == 0 {
        return;
    }
    transfer(n - 1, source, destination, auxiliary, moves);
    moves.push(Move::new(source, destination));
    transfer(n - 1, auxiliary, source, destination, moves);
}

/// Solve a tower that starts from the canonical configuration, playing every
/// move on it. Returns the moves played.
pub fn solve_tower(tower: &mut Tower) -> Result<Vec<Move>> {
    let disk_count = tower.disk_count();
    if tower.configuration() != &Configuration::canonical(disk_count) {
        return Err(HanoiError::invalid_configuration(
            "the recursive solver needs every disk on peg A",
        ));
    }

    let moves = solve_recursive(disk_count);
    for mv in &moves {
        tower.move_disk(*mv)?;
    }
    Ok(moves)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_counts() {
        assert!(solve_recursive(0).is_empty());
        for n in 1..=8 {
            assert_eq!(solve_recursive(n).len(), (1 << n) - 1);
        }
    }

    #[test]
    fn test_two_disks() {
        assert_eq!(
            solve_recursive(2),
            vec![
                Move::new(Peg::A, Peg::B),
                Move::new(Peg::A, Peg::C),
                Move::new(Peg::B, Peg::C),
            ]
        );
    }

    #[test]
    fn test_solve_tower() {
        let mut tower = Tower::new(4).unwrap();
        let moves = solve_tower(&mut tower).unwrap();
        assert_eq!(moves.len(), 15);
        assert_eq!(tower.move_count(), 15);
        assert!(tower.is_solved());
    }

    #[test]
    fn test_solve_tower_rejects_other_starts() {
        let config = Configuration::new([vec![2], vec![], vec![1]]).unwrap();
        let mut tower = Tower::from_configuration(config);
        assert!(solve_tower(&mut tower).is_err());
        assert_eq!(tower.move_count(), 0);
    }
}
