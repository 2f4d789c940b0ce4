#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A generalized sudoku solver.
//!
//! Boards are `rows * cols` cells on a side, partitioned into `rows x cols`
//! boxes (the classic 9x9 grid is `rows = cols = 3`). Solving is exhaustive
//! depth-first search over candidate placements, driven by an explicit
//! frontier rather than the call stack, so a search can be stepped,
//! inspected, and bounded.

/// The `sudoku` module contains the board model, the search tree, and the
/// solving engine.
pub mod sudoku;
