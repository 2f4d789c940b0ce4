#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! Generalized sudoku: board model, search tree, and the solving engine.

/// The `board` module implements the mutable grid with bounds-checked
/// mutation and per-cell candidate computation.
pub mod board;

/// The `engine` module drives the frontier-based depth-first search.
pub mod engine;

/// The `frontier` module holds the explicit search tree: an arena of nodes
/// threaded by an intrusive frontier list.
pub mod frontier;

/// The `parse` module reads puzzle files into [`board::Board`] values.
pub mod parse;
