//! Generic state-space search over a caller-supplied transition function.
//!
//! Three strategies share one [`Solver`]:
//!
//! - **depth-first**: explicit stack, one visited set for the whole search.
//!   Neither complete under a depth bound nor shortest; a state first
//!   reached along a long branch is never expanded from a shorter one.
//! - **breadth-first**: FIFO over a [`SearchTree`]; the first goal dequeued
//!   is reached with the minimum number of moves.
//! - **branch-and-bound**: best-first on `f = g + h`, keeps searching after
//!   the first goal and prunes anything whose `f` cannot beat the best
//!   solution so far. Optimal when `h` never overestimates the moves left.
//!
//! States only need `Clone + Eq + Hash`. Every call owns its frontier,
//! visited bookkeeping and tree, and runs to completion on the calling thread.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::Hash;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::tree::{NodeId, SearchTree};

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum number of moves along any explored path
    pub max_depth: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self { max_depth: 7 }
    }
}

impl SolverConfig {
    /// Depth bound equal to the optimal move count `2^n - 1` for `n` disks.
    pub fn for_disks(disk_count: usize) -> Self {
        let max_depth = u32::try_from(disk_count)
            .ok()
            .and_then(|n| 1usize.checked_shl(n))
            .map_or(usize::MAX, |moves| moves - 1);
        Self { max_depth }
    }
}

/// Counters collected during one search
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchStats {
    /// States whose successors were enumerated
    pub nodes_expanded: usize,
    /// Successors admitted to the frontier
    pub nodes_generated: usize,
    /// Largest frontier size observed
    pub max_frontier: usize,
    pub time_elapsed_ms: u64,
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult<M> {
    /// Moves from start to goal, or `None` when the bounded search exhausted
    pub moves: Option<Vec<M>>,
    pub stats: SearchStats,
}

impl<M> SolverResult<M> {
    pub fn is_solved(&self) -> bool {
        self.moves.is_some()
    }

    pub fn search_exhausted(&self) -> bool {
        self.moves.is_none()
    }
}

/// Branch-and-bound frontier entry, ordered so the heap pops the lowest
/// `(f, g, node)` first.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    f: f64,
    g: usize,
    node: NodeId,
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.g.cmp(&self.g))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

#[derive(Debug, Clone, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Depth-first search with a global visited set.
    ///
    /// Children are pushed in reverse generation order, so the first
    /// generated successor is explored first.
    pub fn depth_first<S, M, F>(&self, start: &S, goal: &S, mut transition: F) -> SolverResult<M>
    where
        S: Clone + Eq + Hash,
        M: Clone,
        F: FnMut(&S) -> Vec<(S, M)>,
    {
        let max_depth = self.config.max_depth;
        let _span = debug_span!("depth_first", max_depth).entered();
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let mut stack: Vec<(S, Vec<M>, usize)> = vec![(start.clone(), Vec::new(), 0)];
        let mut visited: HashSet<S> = HashSet::new();
        visited.insert(start.clone());

        while let Some((state, path, depth)) = stack.pop() {
            if state == *goal {
                return finish(stats, started, Some(path));
            }

            if depth >= max_depth {
                continue;
            }

            stats.nodes_expanded += 1;
            let successors = transition(&state);
            trace!(depth, successors = successors.len(), "expanding");

            let mut children = Vec::with_capacity(successors.len());
            for (next, mv) in successors {
                if visited.contains(&next) {
                    continue;
                }
                visited.insert(next.clone());
                let mut next_path = path.clone();
                next_path.push(mv);
                children.push((next, next_path, depth + 1));
            }

            stats.nodes_generated += children.len();
            stack.extend(children.into_iter().rev());
            stats.max_frontier = stats.max_frontier.max(stack.len());
        }

        finish(stats, started, None)
    }

    /// Breadth-first search; returns a minimum-length path when one exists
    /// within the depth bound.
    pub fn breadth_first<S, M, F>(&self, start: &S, goal: &S, mut transition: F) -> SolverResult<M>
    where
        S: Clone + Eq + Hash,
        M: Clone,
        F: FnMut(&S) -> Vec<(S, M)>,
    {
        let max_depth = self.config.max_depth;
        let _span = debug_span!("breadth_first", max_depth).entered();
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let mut tree = SearchTree::new(start.clone());
        let mut queue: VecDeque<NodeId> = VecDeque::new();
        queue.push_back(tree.root());
        let mut visited: HashSet<S> = HashSet::new();
        visited.insert(start.clone());

        while let Some(id) = queue.pop_front() {
            let node = tree.node(id);
            if node.state == *goal {
                let path = tree.path_to(id);
                return finish(stats, started, Some(path));
            }

            if node.depth >= max_depth {
                continue;
            }

            stats.nodes_expanded += 1;
            let depth = node.depth;
            let successors = transition(&node.state);
            trace!(depth, successors = successors.len(), "expanding");

            for (next, mv) in successors {
                if visited.contains(&next) {
                    continue;
                }
                visited.insert(next.clone());
                let child = tree.attach_child(id, next, mv);
                queue.push_back(child);
                stats.nodes_generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(queue.len());
        }

        finish(stats, started, None)
    }

    /// Best-first branch-and-bound on `f = g + heuristic(state)`.
    ///
    /// The search does not stop at the first goal: it keeps the cheapest
    /// goal found and runs until the frontier is empty, discarding entries
    /// that are stale or whose `f` reaches the best known cost.
    pub fn branch_and_bound<S, M, F, H>(
        &self,
        start: &S,
        goal: &S,
        mut transition: F,
        mut heuristic: H,
    ) -> SolverResult<M>
    where
        S: Clone + Eq + Hash,
        M: Clone,
        F: FnMut(&S) -> Vec<(S, M)>,
        H: FnMut(&S) -> f64,
    {
        let max_depth = self.config.max_depth;
        let _span = debug_span!("branch_and_bound", max_depth).entered();
        let started = Instant::now();
        let mut stats = SearchStats::default();

        let mut tree = SearchTree::new(start.clone());
        let mut heap = BinaryHeap::new();
        heap.push(Frontier {
            f: heuristic(start),
            g: 0,
            node: tree.root(),
        });

        // lowest g at which each state was enqueued
        let mut best_seen: HashMap<S, usize> = HashMap::new();
        best_seen.insert(start.clone(), 0);
        let mut best_cost: Option<usize> = None;
        let mut best_goal: Option<NodeId> = None;

        while let Some(Frontier { f, g, node: id }) = heap.pop() {
            let state = &tree.node(id).state;

            if best_seen.get(state).is_some_and(|&seen| g > seen) {
                continue;
            }

            if state == goal {
                if best_cost.map_or(true, |best| g < best) {
                    debug!(cost = g, "improved solution");
                    best_cost = Some(g);
                    best_goal = Some(id);
                }
                continue;
            }

            if best_cost.is_some_and(|best| f >= best as f64) {
                continue;
            }

            if g >= max_depth {
                continue;
            }

            stats.nodes_expanded += 1;
            let successors = transition(state);
            trace!(g, f, successors = successors.len(), "expanding");

            for (next, mv) in successors {
                let new_g = g + 1;
                if best_seen.get(&next).is_some_and(|&seen| seen <= new_g) {
                    continue;
                }
                best_seen.insert(next.clone(), new_g);

                let h = heuristic(&next);
                let child = tree.attach_child(id, next, mv);
                let f_new = new_g as f64 + h;
                if best_cost.is_some_and(|best| f_new >= best as f64) {
                    continue;
                }

                heap.push(Frontier {
                    f: f_new,
                    g: new_g,
                    node: child,
                });
                stats.nodes_generated += 1;
            }
            stats.max_frontier = stats.max_frontier.max(heap.len());
        }

        let path = best_goal.map(|id| tree.path_to(id));
        finish(stats, started, path)
    }
}

fn finish<M>(mut stats: SearchStats, started: Instant, moves: Option<Vec<M>>) -> SolverResult<M> {
    stats.time_elapsed_ms = started.elapsed().as_millis() as u64;
    match &moves {
        Some(path) => debug!(
            moves = path.len(),
            expanded = stats.nodes_expanded,
            generated = stats.nodes_generated,
            "goal reached"
        ),
        None => debug!(
            expanded = stats.nodes_expanded,
            generated = stats.nodes_generated,
            "search exhausted"
        ),
    }
    SolverResult { moves, stats }
}

/// Depth-first search from `start` to `goal`, at most `max_depth` moves deep.
pub fn solve_dfs<S, M, F>(start: &S, goal: &S, transition: F, max_depth: usize) -> Option<Vec<M>>
where
    S: Clone + Eq + Hash,
    M: Clone,
    F: FnMut(&S) -> Vec<(S, M)>,
{
    Solver::new(SolverConfig { max_depth })
        .depth_first(start, goal, transition)
        .moves
}

/// Breadth-first search from `start` to `goal`, at most `max_depth` moves deep.
pub fn solve_bfs<S, M, F>(start: &S, goal: &S, transition: F, max_depth: usize) -> Option<Vec<M>>
where
    S: Clone + Eq + Hash,
    M: Clone,
    F: FnMut(&S) -> Vec<(S, M)>,
{
    Solver::new(SolverConfig { max_depth })
        .breadth_first(start, goal, transition)
        .moves
}

/// Branch-and-bound search from `start` to `goal` guided by `heuristic`.
pub fn solve_branch_and_bound<S, M, F, H>(
    start: &S,
    goal: &S,
    transition: F,
    heuristic: H,
    max_depth: usize,
) -> Option<Vec<M>>
where
    S: Clone + Eq + Hash,
    M: Clone,
    F: FnMut(&S) -> Vec<(S, M)>,
    H: FnMut(&S) -> f64,
{
    Solver::new(SolverConfig { max_depth })
        .branch_and_bound(start, goal, transition, heuristic)
        .moves
}
