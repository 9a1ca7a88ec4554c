//! Puzzle representation: pegs, moves, configurations and the playable tower.
//!
//! A [`Configuration`] is an immutable value. Every way of building one
//! (constructor, JSON deserialization, move application) goes through the
//! same invariant checks, so holding a `Configuration` means holding a legal
//! arrangement of disks `1..=N`.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{HanoiError, IllegalMoveReason, Result};

/// Disks stacked on a single peg, bottom first.
type PegStack = SmallVec<[u32; 8]>;

/// One of the three pegs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Peg {
    A,
    B,
    C,
}

impl Peg {
    pub const ALL: [Peg; 3] = [Peg::A, Peg::B, Peg::C];

    pub fn index(self) -> usize {
        match self {
            Peg::A => 0,
            Peg::B => 1,
            Peg::C => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Peg> {
        Peg::ALL.get(index).copied()
    }
}

impl fmt::Display for Peg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Peg::A => "A",
            Peg::B => "B",
            Peg::C => "C",
        };
        f.write_str(name)
    }
}

/// Relocation of the top disk of `from` onto `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: Peg,
    pub to: Peg,
}

impl Move {
    pub fn new(from: Peg, to: Peg) -> Self {
        Self { from, to }
    }

    /// Build a move from 0-based peg indices; `None` if either index is out of range.
    pub fn from_indices(from: usize, to: usize) -> Option<Self> {
        Some(Self::new(Peg::from_index(from)?, Peg::from_index(to)?))
    }

    pub fn indices(self) -> (usize, usize) {
        (self.from.index(), self.to.index())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

/// Serialized form of a configuration: `{"pegs": [[3, 2, 1], [], []]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawConfiguration {
    pub pegs: [Vec<u32>; 3],
}

/// Complete assignment of disks to pegs.
///
/// Each peg lists its disks bottom to top and must be strictly decreasing;
/// across all pegs every disk `1..=N` occurs exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawConfiguration", into = "RawConfiguration")]
pub struct Configuration {
    pegs: [PegStack; 3],
}

impl Configuration {
    /// Build a configuration, rejecting any arrangement that breaks the
    /// ordering or uniqueness invariants.
    pub fn new(pegs: [Vec<u32>; 3]) -> Result<Self> {
        for (peg, disks) in Peg::ALL.iter().zip(pegs.iter()) {
            if disks.windows(2).any(|pair| pair[0] <= pair[1]) {
                return Err(HanoiError::invalid_configuration(format!(
                    "peg {} is not ordered largest to smallest from bottom to top: {:?}",
                    peg, disks
                )));
            }
        }

        let mut all_disks: Vec<u32> = pegs.iter().flatten().copied().collect();
        all_disks.sort_unstable();
        let expected = 1..=all_disks.len() as u32;
        if !all_disks.iter().copied().eq(expected) {
            return Err(HanoiError::invalid_configuration(format!(
                "disks must be exactly 1..={} with no duplicates, found {:?}",
                all_disks.len(),
                all_disks
            )));
        }

        let [a, b, c] = pegs;
        Ok(Self {
            pegs: [
                PegStack::from_vec(a),
                PegStack::from_vec(b),
                PegStack::from_vec(c),
            ],
        })
    }

    /// All `disk_count` disks on peg A.
    pub fn canonical(disk_count: usize) -> Self {
        Self::stacked_on(Peg::A, disk_count)
    }

    /// All `disk_count` disks on peg C.
    pub fn target(disk_count: usize) -> Self {
        Self::stacked_on(Peg::C, disk_count)
    }

    fn stacked_on(peg: Peg, disk_count: usize) -> Self {
        let mut pegs: [PegStack; 3] = Default::default();
        pegs[peg.index()] = (1..=disk_count as u32).rev().collect();
        Self { pegs }
    }

    pub fn peg(&self, peg: Peg) -> &[u32] {
        &self.pegs[peg.index()]
    }

    pub fn top(&self, peg: Peg) -> Option<u32> {
        self.pegs[peg.index()].last().copied()
    }

    pub fn disk_count(&self) -> usize {
        self.pegs.iter().map(|p| p.len()).sum()
    }

    /// Check a move against this configuration, returning the disk it would move.
    pub fn check_move(&self, mv: Move) -> std::result::Result<u32, IllegalMoveReason> {
        if mv.from == mv.to {
            return Err(IllegalMoveReason::SamePeg(mv.from));
        }
        let disk = self
            .top(mv.from)
            .ok_or(IllegalMoveReason::EmptySource(mv.from))?;
        match self.top(mv.to) {
            Some(onto) if onto < disk => Err(IllegalMoveReason::LargerOnSmaller { disk, onto }),
            _ => Ok(disk),
        }
    }

    /// Produce the configuration reached by a legal move.
    pub fn apply(&self, mv: Move) -> Result<Self> {
        self.check_move(mv)
            .map_err(|reason| HanoiError::IllegalMove { mv, reason })?;
        Ok(self.moved(mv))
    }

    /// Move without checking; callers must have validated `mv` first.
    pub(crate) fn moved(&self, mv: Move) -> Self {
        let mut next = self.clone();
        if let Some(disk) = next.pegs[mv.from.index()].pop() {
            next.pegs[mv.to.index()].push(disk);
        }
        next
    }
}

impl TryFrom<RawConfiguration> for Configuration {
    type Error = HanoiError;

    fn try_from(raw: RawConfiguration) -> Result<Self> {
        Configuration::new(raw.pegs)
    }
}

impl From<Configuration> for RawConfiguration {
    fn from(config: Configuration) -> Self {
        let [a, b, c] = config.pegs;
        RawConfiguration {
            pegs: [a.into_vec(), b.into_vec(), c.into_vec()],
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, peg) in Peg::ALL.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let disks = self.peg(*peg);
            if disks.is_empty() {
                write!(f, "{}: empty", peg)?;
            } else {
                write!(f, "{}: {:?}", peg, disks)?;
            }
        }
        Ok(())
    }
}

/// A playable tower: the current configuration plus a move counter.
///
/// Illegal moves are rejected and leave the tower untouched.
#[derive(Debug, Clone)]
pub struct Tower {
    configuration: Configuration,
    target: Configuration,
    move_count: usize,
}

impl Tower {
    /// A fresh tower with `disk_count` disks on peg A.
    pub fn new(disk_count: usize) -> Result<Self> {
        if disk_count == 0 {
            return Err(HanoiError::DiskCount { got: disk_count });
        }
        Ok(Self::from_configuration(Configuration::canonical(disk_count)))
    }

    pub fn from_configuration(configuration: Configuration) -> Self {
        let target = Configuration::target(configuration.disk_count());
        Self {
            configuration,
            target,
            move_count: 0,
        }
    }

    /// Move the top disk of `mv.from` onto `mv.to`, returning the disk moved.
    pub fn move_disk(&mut self, mv: Move) -> Result<u32> {
        let disk = self
            .configuration
            .check_move(mv)
            .map_err(|reason| HanoiError::IllegalMove { mv, reason })?;
        self.configuration = self.configuration.moved(mv);
        self.move_count += 1;
        tracing::debug!(step = self.move_count, disk, from = %mv.from, to = %mv.to, "moved disk");
        Ok(disk)
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn target(&self) -> &Configuration {
        &self.target
    }

    pub fn disk_count(&self) -> usize {
        self.configuration.disk_count()
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn is_solved(&self) -> bool {
        self.configuration == self.target
    }
}

impl fmt::Display for Tower {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.configuration, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peg_indices() {
        for (i, peg) in Peg::ALL.iter().enumerate() {
            assert_eq!(peg.index(), i);
            assert_eq!(Peg::from_index(i), Some(*peg));
        }
        assert_eq!(Peg::from_index(3), None);
        assert_eq!(Move::from_indices(0, 2), Some(Move::new(Peg::A, Peg::C)));
        assert_eq!(Move::from_indices(0, 5), None);
    }

    #[test]
    fn test_configuration_rejects_unordered_peg() {
        let result = Configuration::new([vec![1, 2], vec![], vec![3]]);
        assert!(matches!(
            result,
            Err(HanoiError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_configuration_rejects_missing_and_duplicate_disks() {
        assert!(Configuration::new([vec![3, 1], vec![], vec![]]).is_err());
        assert!(Configuration::new([vec![2, 1], vec![1], vec![]]).is_err());
        assert!(Configuration::new([vec![0], vec![], vec![]]).is_err());
        assert!(Configuration::new([vec![3], vec![2], vec![1]]).is_ok());
    }

    #[test]
    fn test_canonical_and_target() {
        let start = Configuration::canonical(3);
        assert_eq!(start.peg(Peg::A), &[3, 2, 1]);
        assert!(start.peg(Peg::C).is_empty());
        assert_eq!(start.disk_count(), 3);

        let goal = Configuration::target(3);
        assert_eq!(goal.peg(Peg::C), &[3, 2, 1]);
        assert_eq!(goal.top(Peg::C), Some(1));
        assert_eq!(goal.top(Peg::A), None);
    }

    #[test]
    fn test_check_move() {
        let config = Configuration::new([vec![3, 1], vec![2], vec![]]).unwrap();
        assert_eq!(config.check_move(Move::new(Peg::A, Peg::B)), Ok(1));
        assert_eq!(config.check_move(Move::new(Peg::B, Peg::C)), Ok(2));
        assert_eq!(
            config.check_move(Move::new(Peg::B, Peg::A)),
            Err(IllegalMoveReason::LargerOnSmaller { disk: 2, onto: 1 })
        );
        assert_eq!(
            config.check_move(Move::new(Peg::C, Peg::A)),
            Err(IllegalMoveReason::EmptySource(Peg::C))
        );
        assert_eq!(
            config.check_move(Move::new(Peg::A, Peg::A)),
            Err(IllegalMoveReason::SamePeg(Peg::A))
        );
    }

    #[test]
    fn test_apply_returns_new_configuration() {
        let start = Configuration::canonical(2);
        let next = start.apply(Move::new(Peg::A, Peg::B)).unwrap();
        assert_eq!(next.peg(Peg::A), &[2]);
        assert_eq!(next.peg(Peg::B), &[1]);
        // original untouched
        assert_eq!(start.peg(Peg::A), &[2, 1]);

        assert!(matches!(
            next.apply(Move::new(Peg::A, Peg::B)),
            Err(HanoiError::IllegalMove { .. })
        ));
    }

    #[test]
    fn test_configuration_json() {
        let config: Configuration =
            serde_json::from_str(r#"{"pegs": [[3], [2, 1], []]}"#).unwrap();
        assert_eq!(config.peg(Peg::B), &[2, 1]);
        assert_eq!(
            serde_json::to_string(&config).unwrap(),
            r#"{"pegs":[[3],[2,1],[]]}"#
        );

        let invalid = serde_json::from_str::<Configuration>(r#"{"pegs": [[1, 2], [], []]}"#);
        assert!(invalid.is_err());
    }

    #[test]
    fn test_display() {
        let config = Configuration::new([vec![3, 2], vec![], vec![1]]).unwrap();
        assert_eq!(config.to_string(), "A: [3, 2]\nB: empty\nC: [1]");
        assert_eq!(Move::new(Peg::B, Peg::C).to_string(), "B -> C");
    }

    #[test]
    fn test_tower_rejects_illegal_move_without_change() {
        let mut tower = Tower::new(3).unwrap();
        assert_eq!(tower.move_disk(Move::new(Peg::A, Peg::C)).unwrap(), 1);
        let before = tower.configuration().clone();

        let result = tower.move_disk(Move::new(Peg::A, Peg::C));
        assert!(matches!(
            result,
            Err(HanoiError::IllegalMove {
                reason: IllegalMoveReason::LargerOnSmaller { disk: 2, onto: 1 },
                ..
            })
        ));
        assert_eq!(tower.configuration(), &before);
        assert_eq!(tower.move_count(), 1);
        assert!(!tower.is_solved());
    }

    #[test]
    fn test_tower_requires_disks() {
        assert!(matches!(Tower::new(0), Err(HanoiError::DiskCount { got: 0 })));
    }
}
