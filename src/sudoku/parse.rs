#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! A parser for the plain-text puzzle format.
//!
//! The format is line-oriented:
//! - Lines starting with `#` are comments; blank lines are ignored. Both may
//!   appear anywhere.
//! - The first significant line holds the box dimensions: `rows cols`
//!   (so `3 3` is a classic 9x9 grid).
//! - Exactly `rows * cols` significant lines follow, each with
//!   `rows * cols` whitespace-separated cell tokens. A cell token is a
//!   value, or one of `.`, `_`, `0` for an empty cell.
//!
//! Example:
//!
//! ```text
//! # 4x4 puzzle, 2x2 boxes
//! 2 2
//! 1 . . 4
//! . . 1 .
//! . 3 . .
//! 2 . . 3
//! ```
//!
//! Seeding goes through [`Board::insert`], so a puzzle whose given cells
//! conflict is rejected here, before any search starts.

use crate::sudoku::board::{Board, BoardError};
use itertools::Itertools;
use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead};
use std::path::Path;

/// A failure while reading a puzzle file.
#[derive(Debug)]
pub enum ParseError {
    /// The underlying reader failed.
    Io(io::Error),
    /// The input ended before the `rows cols` dimension line.
    MissingDimensions,
    /// A token could not be read as a dimension or cell value.
    BadToken { line: usize, token: String },
    /// The grid did not have exactly `side` rows.
    WrongRowCount { expected: usize, found: usize },
    /// A grid line did not have exactly `side` cells.
    WrongColumnCount {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// The given cells violate the row/column/box uniqueness constraint, or
    /// the dimensions are invalid.
    Board(BoardError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "i/o error: {e}"),
            Self::MissingDimensions => write!(f, "missing `rows cols` dimension line"),
            Self::BadToken { line, token } => {
                write!(f, "line {line}: cannot read token {token:?}")
            }
            Self::WrongRowCount { expected, found } => {
                write!(f, "expected {expected} grid rows, found {found}")
            }
            Self::WrongColumnCount {
                line,
                expected,
                found,
            } => {
                write!(f, "line {line}: expected {expected} cells, found {found}")
            }
            Self::Board(e) => write!(f, "inconsistent puzzle: {e}"),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Board(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ParseError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<BoardError> for ParseError {
    fn from(e: BoardError) -> Self {
        Self::Board(e)
    }
}

fn parse_cell(token: &str) -> Option<usize> {
    match token {
        "." | "_" => Some(0),
        _ => token.parse().ok(),
    }
}

/// Parses a puzzle from a `BufRead` source into a seeded [`Board`].
///
/// # Errors
///
/// Returns a [`ParseError`] for I/O failures, malformed input, or a seed
/// that violates the board constraints.
pub fn parse_board<R: BufRead>(reader: R) -> Result<Board, ParseError> {
    let mut significant = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        significant.push((index + 1, trimmed.to_owned()));
    }

    let mut lines = significant.into_iter();
    let (dims_line, dims) = lines.next().ok_or(ParseError::MissingDimensions)?;
    let (rows, cols) = match dims
        .split_whitespace()
        .map(str::parse::<usize>)
        .collect_tuple::<(_, _)>()
    {
        Some((Ok(rows), Ok(cols))) => (rows, cols),
        _ => {
            return Err(ParseError::BadToken {
                line: dims_line,
                token: dims.clone(),
            });
        }
    };

    let mut board = Board::new(rows, cols)?;
    let side = board.side();

    let mut row = 0;
    for (line_number, line) in lines {
        row += 1;
        if row > side {
            return Err(ParseError::WrongRowCount {
                expected: side,
                found: row,
            });
        }
        let tokens = line.split_whitespace().collect_vec();
        if tokens.len() != side {
            return Err(ParseError::WrongColumnCount {
                line: line_number,
                expected: side,
                found: tokens.len(),
            });
        }
        for (c, token) in tokens.iter().enumerate() {
            let value = parse_cell(token).ok_or_else(|| ParseError::BadToken {
                line: line_number,
                token: (*token).to_owned(),
            })?;
            if value != 0 {
                board.insert(value, row, c + 1)?;
            }
        }
    }
    if row != side {
        return Err(ParseError::WrongRowCount {
            expected: side,
            found: row,
        });
    }
    Ok(board)
}

/// Parses the puzzle file at `path`.
///
/// Convenience wrapper over [`parse_board`] that opens the file and buffers
/// it.
///
/// # Errors
///
/// Returns [`ParseError::Io`] if the file cannot be opened or read, plus
/// every [`parse_board`] failure.
pub fn parse_board_file(path: impl AsRef<Path>) -> Result<Board, ParseError> {
    let file = std::fs::File::open(path)?;
    parse_board(io::BufReader::new(file))
}
