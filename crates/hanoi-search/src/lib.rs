//! Towers of Hanoi solved by generic state-space search.
//!
//! The [`solver`] module is independent of the puzzle: it explores any graph
//! given a start state, a goal state and a transition closure, using
//! depth-first, breadth-first or branch-and-bound search. The remaining
//! modules supply the Hanoi side: the puzzle model, its move generator and
//! heuristics, a recursive baseline, and replay for checking solutions.

pub mod error;
pub mod executor;
pub mod heuristic;
pub mod puzzle;
pub mod recursive;
pub mod solver;
pub mod transition;
pub mod tree;

// Re-export main types
pub use error::{HanoiError, IllegalMoveReason, Result};
pub use executor::{replay, verify_solution, ReplayResult, ReplayStatus};
pub use heuristic::{correctly_placed, distance_estimate, score, GOAL_PEG};
pub use puzzle::{Configuration, Move, Peg, RawConfiguration, Tower};
pub use recursive::{solve_recursive, solve_tower};
pub use solver::{
    solve_bfs, solve_branch_and_bound, solve_dfs, SearchStats, Solver, SolverConfig, SolverResult,
};
pub use transition::{next_states, next_states_ordered};
pub use tree::{NodeId, SearchNode, SearchTree};
