//! CLI entry point for the Hanoi solver.
//!
//! Usage:
//!   hanoi-search solve [options]
//!   hanoi-search verify --moves <moves.json> [options]
//!
//! Start options (both commands):
//!   --disks <n>        Disks on peg A for the canonical start (default: 3)
//!   --start <file>     JSON start configuration, e.g. {"pegs": [[3, 2, 1], [], []]}
//!   --stdin            Read the JSON start configuration from stdin
//!
//! Solve options:
//!   --strategy <s>     dfs | bfs | branch-and-bound | recursive (default: bfs)
//!   --max-depth <n>    Depth bound; 0 or absent means 2^n - 1
//!   --ordered          Explore best-scoring moves first
//!   --format <f>       json | text (default: json)
//!
//! The goal is always every disk on peg C. Exit code is 0 when solved
//! (or, for `verify`, when the moves reach the goal) and 1 otherwise.

mod logging;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;

use hanoi_search::{
    distance_estimate, next_states, next_states_ordered, replay, solve_tower, verify_solution,
    Configuration, HanoiError, Move, ReplayResult, Result, SearchStats, Solver, SolverConfig,
    Tower,
};

#[derive(Parser)]
#[command(name = "hanoi-search")]
#[command(about = "Towers of Hanoi solver using state-space search")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search for a move sequence from the start configuration to the goal
    Solve {
        #[command(flatten)]
        start: StartArgs,

        /// Search strategy
        #[arg(long, value_enum, default_value = "bfs")]
        strategy: Strategy,

        /// Maximum solution length; 0 means 2^n - 1
        #[arg(long)]
        max_depth: Option<usize>,

        /// Order successors by score, best first
        #[arg(long)]
        ordered: bool,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
    },
    /// Replay a JSON list of moves and check that it reaches the goal
    Verify {
        #[command(flatten)]
        start: StartArgs,

        /// Path to a JSON array of moves, e.g. [{"from": "A", "to": "C"}]
        #[arg(long, value_name = "FILE")]
        moves: PathBuf,
    },
}

#[derive(Args)]
struct StartArgs {
    /// Number of disks for the canonical start
    #[arg(long, default_value = "3")]
    disks: usize,

    /// Path to a JSON start configuration
    #[arg(long, value_name = "FILE", conflicts_with = "stdin")]
    start: Option<PathBuf>,

    /// Read the start configuration from stdin
    #[arg(long)]
    stdin: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
enum Strategy {
    Dfs,
    Bfs,
    BranchAndBound,
    Recursive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Output of the `solve` command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SolveOutput {
    solved: bool,
    strategy: Strategy,
    disk_count: usize,
    max_depth: usize,
    ordered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    move_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<Move>>,
    search_exhausted: bool,
    verified: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    stats: Option<SearchStats>,
}

/// Output of the `verify` command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyOutput {
    valid: bool,
    replay: ReplayResult,
}

fn main() -> ExitCode {
    logging::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Solve {
            start,
            strategy,
            max_depth,
            ordered,
            format,
        } => solve(&start, strategy, max_depth, ordered, format),
        Commands::Verify { start, moves } => verify(&start, &moves),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn solve(
    start_args: &StartArgs,
    strategy: Strategy,
    max_depth: Option<usize>,
    ordered: bool,
    format: OutputFormat,
) -> Result<ExitCode> {
    let start = load_start(start_args)?;
    let disk_count = start.disk_count();
    let goal = Configuration::target(disk_count);

    let config = match max_depth {
        Some(depth) if depth > 0 => SolverConfig { max_depth: depth },
        _ => SolverConfig::for_disks(disk_count),
    };
    let max_depth = config.max_depth;
    let solver = Solver::new(config);

    let transition = |c: &Configuration| {
        if ordered {
            next_states_ordered(c, disk_count)
        } else {
            next_states(c, disk_count)
        }
    };

    tracing::info!(?strategy, disk_count, max_depth, ordered, "solving");
    if !optimality_guaranteed(strategy, disk_count) {
        tracing::warn!(
            disk_count,
            "branch-and-bound is only guaranteed shortest up to {} disks",
            MAX_OPTIMAL_BRANCH_AND_BOUND_DISKS
        );
    }
    let (moves, stats) = match strategy {
        Strategy::Dfs => {
            let result = solver.depth_first(&start, &goal, transition);
            (result.moves, Some(result.stats))
        }
        Strategy::Bfs => {
            let result = solver.breadth_first(&start, &goal, transition);
            (result.moves, Some(result.stats))
        }
        Strategy::BranchAndBound => {
            let result = solver.branch_and_bound(&start, &goal, transition, |c| {
                distance_estimate(c, disk_count)
            });
            (result.moves, Some(result.stats))
        }
        Strategy::Recursive => {
            let mut tower = Tower::from_configuration(start.clone());
            (Some(solve_tower(&mut tower)?), None)
        }
    };

    let verified = moves
        .as_ref()
        .is_some_and(|moves| verify_solution(&start, &goal, moves));
    if moves.is_some() && !verified {
        tracing::warn!(?strategy, "solver returned a move sequence that does not reach the goal");
    }

    match format {
        OutputFormat::Json => {
            let output = SolveOutput {
                solved: moves.is_some(),
                strategy,
                disk_count,
                max_depth,
                ordered,
                move_count: moves.as_ref().map(Vec::len),
                search_exhausted: moves.is_none(),
                moves: moves.clone(),
                verified,
                stats,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_replay(&start, moves.as_deref(), max_depth)?,
    }

    Ok(if verified {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Largest disk count for which `distance_estimate` stays below the moves
/// left plus one, so branch-and-bound still returns a shortest solution.
const MAX_OPTIMAL_BRANCH_AND_BOUND_DISKS: usize = 9;

fn optimality_guaranteed(strategy: Strategy, disk_count: usize) -> bool {
    strategy != Strategy::BranchAndBound || disk_count <= MAX_OPTIMAL_BRANCH_AND_BOUND_DISKS
}

/// Play the solution on a tower, printing every step.
fn print_replay(start: &Configuration, moves: Option<&[Move]>, max_depth: usize) -> Result<()> {
    let separator = "-".repeat(30);
    println!("Initial situation:");
    println!("{}", start);
    println!("{}", separator);

    let Some(moves) = moves else {
        println!("No solution within {} moves.", max_depth);
        return Ok(());
    };

    let mut tower = Tower::from_configuration(start.clone());
    for mv in moves {
        let disk = tower.move_disk(*mv)?;
        println!(
            "Step {}: move disk {} from {} to {}",
            tower.move_count(),
            disk,
            mv.from,
            mv.to
        );
        println!("{}", tower);
        println!("{}", separator);
    }
    println!("Solved in {} moves.", tower.move_count());
    Ok(())
}

fn verify(start_args: &StartArgs, moves_path: &Path) -> Result<ExitCode> {
    let start = load_start(start_args)?;
    let goal = Configuration::target(start.disk_count());
    let moves: Vec<Move> = serde_json::from_str(&read_file(moves_path)?)?;

    let result = replay(&start, &moves);
    let valid = result.completed() && result.final_configuration == goal;
    let output = VerifyOutput {
        valid,
        replay: result,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(if valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn load_start(args: &StartArgs) -> Result<Configuration> {
    let json = if args.stdin {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .map_err(|e| HanoiError::io("read from stdin", e))?;
        buffer
    } else if let Some(path) = &args.start {
        read_file(path)?
    } else {
        return with_disks(Configuration::canonical(args.disks));
    };

    parse_start(&json)
}

fn parse_start(json: &str) -> Result<Configuration> {
    with_disks(serde_json::from_str(json)?)
}

/// Both commands need at least one disk to have a goal worth reaching.
fn with_disks(start: Configuration) -> Result<Configuration> {
    match start.disk_count() {
        0 => Err(HanoiError::DiskCount { got: 0 }),
        _ => Ok(start),
    }
}

fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| HanoiError::io(format!("read {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_start() {
        let start = parse_start(r#"{"pegs": [[2], [], [1]]}"#).unwrap();
        assert_eq!(start.disk_count(), 2);
    }

    #[test]
    fn test_empty_start_is_rejected() {
        let result = parse_start(r#"{"pegs": [[], [], []]}"#);
        assert!(matches!(result, Err(HanoiError::DiskCount { got: 0 })));
    }

    #[test]
    fn test_zero_disk_canonical_start_is_rejected() {
        let args = StartArgs {
            disks: 0,
            start: None,
            stdin: false,
        };
        assert!(matches!(
            load_start(&args),
            Err(HanoiError::DiskCount { got: 0 })
        ));
    }

    #[test]
    fn test_optimality_guaranteed() {
        assert!(optimality_guaranteed(Strategy::BranchAndBound, 9));
        assert!(!optimality_guaranteed(Strategy::BranchAndBound, 10));
        assert!(optimality_guaranteed(Strategy::Bfs, 12));
        assert!(optimality_guaranteed(Strategy::Dfs, 12));
    }
}
