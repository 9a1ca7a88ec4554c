//! Replay of move sequences against a configuration.
//!
//! Used to check solver output: every move must be legal in turn, and a
//! solution must end exactly on the goal configuration.

use serde::Serialize;

use crate::error::IllegalMoveReason;
use crate::puzzle::{Configuration, Move};

/// How a replay ended
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum ReplayStatus {
    /// Every move was applied
    Completed,
    /// The move at `index` was illegal; replay stopped before it
    IllegalMove {
        index: usize,
        mv: Move,
        reason: String,
    },
}

/// Result of replaying a move sequence
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayResult {
    pub status: ReplayStatus,
    pub moves_applied: usize,
    pub final_configuration: Configuration,
}

impl ReplayResult {
    pub fn completed(&self) -> bool {
        self.status == ReplayStatus::Completed
    }
}

/// Apply `moves` to `start` in order, stopping at the first illegal move.
pub fn replay(start: &Configuration, moves: &[Move]) -> ReplayResult {
    let mut current = start.clone();

    for (index, mv) in moves.iter().enumerate() {
        if let Err(reason) = current.check_move(*mv) {
            return illegal(index, *mv, reason, current);
        }
        current = current.moved(*mv);
    }

    ReplayResult {
        status: ReplayStatus::Completed,
        moves_applied: moves.len(),
        final_configuration: current,
    }
}

fn illegal(
    index: usize,
    mv: Move,
    reason: IllegalMoveReason,
    final_configuration: Configuration,
) -> ReplayResult {
    tracing::debug!(index, %mv, %reason, "replay hit an illegal move");
    ReplayResult {
        status: ReplayStatus::IllegalMove {
            index,
            mv,
            reason: reason.to_string(),
        },
        moves_applied: index,
        final_configuration,
    }
}

/// Does `moves` legally carry `start` to exactly `goal`?
pub fn verify_solution(start: &Configuration, goal: &Configuration, moves: &[Move]) -> bool {
    let result = replay(start, moves);
    result.completed() && result.final_configuration == *goal
}
