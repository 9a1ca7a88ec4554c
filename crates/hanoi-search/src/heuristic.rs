//! Scoring and distance estimates for Hanoi configurations.
//!
//! Both functions measure progress towards the target configuration with
//! every disk stacked on [`GOAL_PEG`]. Lower values are closer to the goal.

use crate::puzzle::{Configuration, Peg};

/// Peg that holds the full stack in the target configuration
pub const GOAL_PEG: Peg = Peg::C;

/// Number of disks already in their final place on the goal peg.
///
/// Counts the contiguous run from the bottom of the goal peg that matches
/// `disk_count, disk_count - 1, ...`.
pub fn correctly_placed(config: &Configuration, disk_count: usize) -> usize {
    config
        .peg(GOAL_PEG)
        .iter()
        .zip((1..=disk_count as u32).rev())
        .take_while(|(placed, wanted)| **placed == *wanted)
        .count()
}

/// Disks sitting on the two pegs other than the goal peg
fn off_goal(config: &Configuration) -> usize {
    Peg::ALL
        .iter()
        .filter(|peg| **peg != GOAL_PEG)
        .map(|peg| config.peg(*peg).len())
        .sum()
}

/// Move-ordering score: rewards correctly placed disks and penalises
/// disks away from the goal peg.
pub fn score(config: &Configuration, disk_count: usize) -> f64 {
    -10.0 * correctly_placed(config, disk_count) as f64 + 5.0 * off_goal(config) as f64
}

/// Lower-bound style estimate of the moves left, used as `h` by
/// branch-and-bound.
///
/// Every disk outside the correctly placed run must move at least once, so
/// the first term never overestimates. The `0.1` penalty term can push the
/// total above the true remaining count by at most a tenth of that count,
/// which still leaves every estimate below `remaining + 1` for up to nine
/// disks; with integer path costs that keeps branch-and-bound optimal there.
pub fn distance_estimate(config: &Configuration, disk_count: usize) -> f64 {
    let misplaced = disk_count.saturating_sub(correctly_placed(config, disk_count));
    misplaced as f64 + 0.1 * off_goal(config) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(a: &[u32], b: &[u32], c: &[u32]) -> Configuration {
        Configuration::new([a.to_vec(), b.to_vec(), c.to_vec()]).unwrap()
    }

    #[test]
    fn test_correctly_placed_is_contiguous_from_bottom() {
        assert_eq!(correctly_placed(&config(&[3, 2, 1], &[], &[]), 3), 0);
        assert_eq!(correctly_placed(&config(&[2, 1], &[], &[3]), 3), 1);
        assert_eq!(correctly_placed(&config(&[], &[], &[3, 2, 1]), 3), 3);
        // disk 2 at the bottom of C is not in its final place
        assert_eq!(correctly_placed(&config(&[3], &[], &[2, 1]), 3), 0);
    }

    #[test]
    fn test_score() {
        assert_eq!(score(&config(&[3, 2, 1], &[], &[]), 3), 15.0);
        assert_eq!(score(&config(&[], &[], &[3, 2, 1]), 3), -30.0);
        assert_eq!(score(&config(&[1], &[], &[3, 2]), 3), -15.0);
    }

    #[test]
    fn test_distance_estimate() {
        let start = distance_estimate(&config(&[3, 2, 1], &[], &[]), 3);
        assert!((start - 3.3).abs() < 1e-9);
        assert_eq!(distance_estimate(&config(&[], &[], &[3, 2, 1]), 3), 0.0);

        let one_left = distance_estimate(&config(&[], &[1], &[3, 2]), 3);
        assert!((one_left - 1.1).abs() < 1e-9);
    }

    #[test]
    fn test_distance_estimate_stays_below_remaining_plus_one() {
        // optimal remaining moves along the canonical 3-disk solution
        let path = [
            (config(&[3, 2, 1], &[], &[]), 7),
            (config(&[3, 2], &[], &[1]), 6),
            (config(&[3], &[2], &[1]), 5),
            (config(&[3], &[2, 1], &[]), 4),
            (config(&[], &[2, 1], &[3]), 3),
            (config(&[1], &[2], &[3]), 2),
            (config(&[1], &[], &[3, 2]), 1),
            (config(&[], &[], &[3, 2, 1]), 0),
        ];
        for (state, remaining) in &path {
            assert!(distance_estimate(state, 3) < (*remaining + 1) as f64);
        }
    }
}
