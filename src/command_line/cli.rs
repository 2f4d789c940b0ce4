#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use sudoku_solver::sudoku::board::Board;
use sudoku_solver::sudoku::engine::{SolveOutcome, Solver};
use sudoku_solver::sudoku::parse::parse_board_file;
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the sudoku solver application.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(name = "sudoku_solver", version, about = "A generalized sudoku solver")]
pub(crate) struct Cli {
    /// An optional global path argument. If provided without a subcommand,
    /// it's treated as the path to a puzzle file to solve.
    #[arg(global = true)]
    pub(crate) path: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `dir`).
    #[clap(subcommand)]
    pub(crate) command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub(crate) common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a single puzzle file. The format is defined by
    /// `sudoku::parse::parse_board`.
    File {
        /// Path to the puzzle file.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `.sudoku` file under a directory, recursively.
    Dir {
        /// Path to the directory to scan.
        #[arg(long)]
        path: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable printing of search statistics after solving.
    #[arg(short, long, default_value_t = true)]
    stats: bool,

    /// Verify that a produced solution is fully assigned and consistent.
    #[arg(short, long, default_value_t = true)]
    verify: bool,

    /// Print the parsed puzzle before solving.
    #[arg(short, long, default_value_t = false)]
    print_puzzle: bool,

    /// Abort the search after this many expansion steps.
    #[arg(long)]
    max_steps: Option<u64>,
}

/// Dispatches the parsed command line.
pub(crate) fn run(cli: Cli) -> Result<(), String> {
    if let Some(path) = &cli.path {
        if cli.command.is_none() {
            return solve_file(path, &cli.common);
        }
    }

    match cli.command {
        Some(Commands::File { path, common }) => solve_file(&path, &common),
        Some(Commands::Dir { path, common }) => solve_dir(&path, &common),
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "sudoku_solver",
                &mut std::io::stdout(),
            );
            Ok(())
        }
        None => Err("No command provided. Use --help for more information.".to_owned()),
    }
}

/// Parses, solves, and reports a single puzzle file.
fn solve_file(path: &Path, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let board =
        parse_board_file(path).map_err(|e| format!("Error parsing {}: {e}", path.display()))?;
    let parse_time = time.elapsed();

    println!("Solving: {}", path.display());
    if common.print_puzzle {
        println!("{board}");
    }

    epoch::advance().unwrap();
    let time = Instant::now();

    let mut solver = Solver::new(&board);
    if let Some(max) = common.max_steps {
        solver = solver.with_step_limit(max);
    }
    let outcome = solver.solve();

    let elapsed = time.elapsed();
    epoch::advance().unwrap();

    let allocated_bytes = stats::allocated::mib().unwrap().read().unwrap();
    let resident_bytes = stats::resident::mib().unwrap().read().unwrap();
    let allocated_mib = allocated_bytes as f64 / (1024.0 * 1024.0);
    let resident_mib = resident_bytes as f64 / (1024.0 * 1024.0);

    if common.verify {
        verify_outcome(&outcome);
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            &board,
            &solver,
            allocated_mib,
            resident_mib,
        );
    }

    match outcome {
        SolveOutcome::Solved(solution) => println!("Solution:\n{solution}"),
        SolveOutcome::Exhausted => println!("No solution exists"),
        SolveOutcome::BudgetExhausted => {
            println!("Step budget exhausted after {} steps", solver.steps());
        }
    }
    Ok(())
}

/// Solves a directory of puzzle files.
///
/// Iterates over all `.sudoku` files under the directory (recursively),
/// solving and reporting each in turn.
fn solve_dir(path: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() {
            continue;
        }
        if file_path.extension().is_none_or(|ext| ext != "sudoku") {
            eprintln!("Skipping non-puzzle file: {}", file_path.display());
            continue;
        }
        solve_file(file_path, common)?;
    }
    Ok(())
}

/// Checks a solved board against the full-assignment and uniqueness
/// requirements.
///
/// # Panics
///
/// Panics if the solver produced a board that fails verification; that is a
/// solver bug, not bad input.
fn verify_outcome(outcome: &SolveOutcome) {
    match outcome {
        SolveOutcome::Solved(board) => {
            let ok = board.is_consistent() && board.first_empty().is_none();
            println!("Verified: {ok:?}");
            assert!(ok, "Solution failed verification!");
        }
        SolveOutcome::Exhausted => println!("EXHAUSTED"),
        SolveOutcome::BudgetExhausted => println!("BUDGET EXHAUSTED"),
    }
}

/// Helper function to print a single statistic line in a formatted table row.
fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate
/// (value/second).
fn stat_line_with_rate(label: &str, value: u64, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of puzzle and search statistics.
fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    board: &Board,
    solver: &Solver,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let side = board.side();
    let givens = (1..=side)
        .flat_map(|r| (1..=side).map(move |c| (r, c)))
        .filter(|&(r, c)| board.get(r, c).unwrap_or(0) != 0)
        .count();

    println!("\n=======================[ Puzzle Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Grid side", side);
    stat_line("Box dimensions", format!("{}x{}", board.rows(), board.cols()));
    stat_line("Given cells", givens);

    println!("========================[ Search Statistics ]========================");
    stat_line_with_rate("Steps", solver.steps(), elapsed_secs);
    stat_line_with_rate("Nodes created", solver.nodes_created(), elapsed_secs);
    stat_line("Frontier high-water", solver.frontier_high_water());
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}
