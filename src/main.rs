#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Binary entry point for the sudoku solver.

mod command_line;

use clap::Parser;
use command_line::cli::{Cli, run};

#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
