#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The mutable sudoku grid.
//!
//! A [`Board`] is a square grid of `side = rows * cols` cells holding values
//! in `[1, side]`, with `0` marking an empty cell. The grid is partitioned
//! into `rows x cols` boxes; a value may appear at most once in its row, its
//! column, and its box. That invariant is enforced at insertion time:
//! [`Board::insert`] rejects any placement that is not currently a legal
//! candidate, while [`Board::remove`] clears unconditionally because the
//! search engine must always be able to undo its own commits.
//!
//! The public API is 1-indexed in both coordinates, matching how puzzles are
//! written down. All operations are bounds-checked and fail fast with a
//! [`BoardError`]; nothing is silently clamped or corrected.

use bit_vec::BitVec;
use smallvec::SmallVec;
use std::fmt::{self, Display, Formatter, Write as _};

/// Candidate values for a single cell, ascending. Grids up to 16x16 stay on
/// the stack.
pub type Candidates = SmallVec<[usize; 16]>;

/// A single candidate placement: `value` at (`row`, `col`), 1-indexed.
///
/// `value == 0` marks a position with no value attached yet, as returned by
/// [`Board::first_empty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    /// The value to place, in `[1, side]` (`0` for "position only").
    pub value: usize,
    /// 1-indexed row.
    pub row: usize,
    /// 1-indexed column.
    pub col: usize,
}

impl Assignment {
    /// Creates a new assignment.
    #[must_use]
    pub const fn new(value: usize, row: usize, col: usize) -> Self {
        Self { value, row, col }
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}@({},{})", self.value, self.row, self.col)
    }
}

/// A precondition violation on a [`Board`] operation.
///
/// Every variant is a caller bug: the call that triggered it fails
/// synchronously and the board is left unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardError {
    /// Box dimensions must both be at least 1.
    InvalidDimensions { rows: usize, cols: usize },
    /// Row or column outside `[1, side]`.
    OutOfRange { row: usize, col: usize, side: usize },
    /// Value outside `[1, side]`.
    ValueOutOfRange { value: usize, side: usize },
    /// Insert into an already occupied cell.
    CellOccupied { row: usize, col: usize },
    /// The value already appears in the cell's row, column, or box.
    ValueNotCandidate { value: usize, row: usize, col: usize },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { rows, cols } => {
                write!(f, "box dimensions must be at least 1x1, got {rows}x{cols}")
            }
            Self::OutOfRange { row, col, side } => {
                write!(f, "position ({row},{col}) outside [1, {side}]")
            }
            Self::ValueOutOfRange { value, side } => {
                write!(f, "value {value} outside [1, {side}]")
            }
            Self::CellOccupied { row, col } => {
                write!(f, "cell ({row},{col}) is already occupied")
            }
            Self::ValueNotCandidate { value, row, col } => {
                write!(f, "value {value} is not a legal candidate for ({row},{col})")
            }
        }
    }
}

impl std::error::Error for BoardError {}

/// A generalized sudoku grid with `rows x cols` boxes.
///
/// Cloning produces an independent deep snapshot; the solver works on a
/// private clone so the caller's board is never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    side: usize,
    /// Row-major, `side * side` entries, `0` = empty.
    cells: Vec<usize>,
}

impl Board {
    /// Creates an empty board with the given box dimensions.
    ///
    /// The grid side is `rows * cols`: `new(3, 3)` is the classic 9x9 grid,
    /// `new(2, 2)` the 4x4 variant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] if either dimension is 0.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        if rows < 1 || cols < 1 {
            return Err(BoardError::InvalidDimensions { rows, cols });
        }
        let side = rows * cols;
        Ok(Self {
            rows,
            cols,
            side,
            cells: vec![0; side * side],
        })
    }

    /// Creates a board seeded from a `side x side` grid of values, `0` for
    /// empty cells.
    ///
    /// Seeding goes through [`Board::insert`], so an inconsistent grid is
    /// rejected at the first conflicting cell.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::InvalidDimensions`] for bad box dimensions,
    /// [`BoardError::OutOfRange`] if the grid is not `side x side`, and any
    /// [`Board::insert`] error for a conflicting or out-of-range value.
    pub fn from_grid(rows: usize, cols: usize, grid: &[Vec<usize>]) -> Result<Self, BoardError> {
        let mut board = Self::new(rows, cols)?;
        let side = board.side;
        if grid.len() != side {
            return Err(BoardError::OutOfRange {
                row: grid.len(),
                col: 1,
                side,
            });
        }
        for (r, row) in grid.iter().enumerate() {
            if row.len() != side {
                return Err(BoardError::OutOfRange {
                    row: r + 1,
                    col: row.len(),
                    side,
                });
            }
            for (c, &value) in row.iter().enumerate() {
                if value != 0 {
                    board.insert(value, r + 1, c + 1)?;
                }
            }
        }
        Ok(board)
    }

    /// Box height (rows per box).
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Box width (columns per box).
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Grid side length, `rows * cols`.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Resets every cell to empty.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    fn check_position(&self, row: usize, col: usize) -> Result<(), BoardError> {
        if row < 1 || row > self.side || col < 1 || col > self.side {
            return Err(BoardError::OutOfRange {
                row,
                col,
                side: self.side,
            });
        }
        Ok(())
    }

    const fn index(&self, row: usize, col: usize) -> usize {
        (row - 1) * self.side + (col - 1)
    }

    /// Reads the value at (`row`, `col`), `0` if the cell is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] for coordinates outside
    /// `[1, side]`.
    pub fn get(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        self.check_position(row, col)?;
        Ok(self.cells[self.index(row, col)])
    }

    /// Places `value` at (`row`, `col`).
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] or [`BoardError::ValueOutOfRange`]
    /// for arguments outside `[1, side]`, [`BoardError::CellOccupied`] if the
    /// cell is non-empty, and [`BoardError::ValueNotCandidate`] if the value
    /// already appears in the cell's row, column, or box.
    pub fn insert(&mut self, value: usize, row: usize, col: usize) -> Result<(), BoardError> {
        self.check_position(row, col)?;
        if value < 1 || value > self.side {
            return Err(BoardError::ValueOutOfRange {
                value,
                side: self.side,
            });
        }
        if self.cells[self.index(row, col)] != 0 {
            return Err(BoardError::CellOccupied { row, col });
        }
        if self.used_values(row, col).get(value).unwrap_or(true) {
            return Err(BoardError::ValueNotCandidate { value, row, col });
        }
        let index = self.index(row, col);
        self.cells[index] = value;
        Ok(())
    }

    /// Clears the cell at (`row`, `col`).
    ///
    /// Removal is always allowed, even for empty cells: the search engine
    /// relies on it to undo its own commits during backtracking.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] for coordinates outside
    /// `[1, side]`.
    pub fn remove(&mut self, row: usize, col: usize) -> Result<(), BoardError> {
        self.check_position(row, col)?;
        let index = self.index(row, col);
        self.cells[index] = 0;
        Ok(())
    }

    /// Bitmask of values already used in the cell's row, column, and box.
    /// Bit `v` is set iff `v` appears in one of the three scopes.
    fn used_values(&self, row: usize, col: usize) -> BitVec {
        let mut used = BitVec::from_elem(self.side + 1, false);

        for c in 1..=self.side {
            let value = self.cells[self.index(row, c)];
            if value != 0 {
                used.set(value, true);
            }
        }
        for r in 1..=self.side {
            let value = self.cells[self.index(r, col)];
            if value != 0 {
                used.set(value, true);
            }
        }

        // Box bands: integer division of the zero-based coordinates by the
        // box dimensions.
        let band_row = ((row - 1) / self.rows) * self.rows;
        let band_col = ((col - 1) / self.cols) * self.cols;
        for r in band_row + 1..=band_row + self.rows {
            for c in band_col + 1..=band_col + self.cols {
                let value = self.cells[self.index(r, c)];
                if value != 0 {
                    used.set(value, true);
                }
            }
        }

        used
    }

    /// Values that can legally be placed at (`row`, `col`), ascending.
    ///
    /// An occupied cell has no candidates: the returned list is empty.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfRange`] for coordinates outside
    /// `[1, side]`.
    pub fn possible_values(&self, row: usize, col: usize) -> Result<Candidates, BoardError> {
        self.check_position(row, col)?;
        if self.cells[self.index(row, col)] != 0 {
            return Ok(Candidates::new());
        }
        let used = self.used_values(row, col);
        Ok((1..=self.side)
            .filter(|&value| !used.get(value).unwrap_or(false))
            .collect())
    }

    /// The first empty cell in row-major order (top-to-bottom,
    /// left-to-right), as an [`Assignment`] with value `0`, or `None` if the
    /// board is full.
    #[must_use]
    pub fn first_empty(&self) -> Option<Assignment> {
        self.cells
            .iter()
            .position(|&value| value == 0)
            .map(|index| Assignment::new(0, index / self.side + 1, index % self.side + 1))
    }

    /// Checks the global uniqueness invariant: no non-zero value appears
    /// twice in any row, column, or box.
    ///
    /// Always true for boards mutated only through [`Board::insert`] and
    /// [`Board::remove`]; exposed for verification of solver output.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut scope_ok = |positions: &mut dyn Iterator<Item = (usize, usize)>| -> bool {
            let mut seen = BitVec::from_elem(self.side + 1, false);
            for (row, col) in positions {
                let value = self.cells[self.index(row, col)];
                if value != 0 {
                    if seen.get(value).unwrap_or(false) {
                        return false;
                    }
                    seen.set(value, true);
                }
            }
            true
        };

        for r in 1..=self.side {
            if !scope_ok(&mut (1..=self.side).map(|c| (r, c))) {
                return false;
            }
        }
        for c in 1..=self.side {
            if !scope_ok(&mut (1..=self.side).map(|r| (r, c))) {
                return false;
            }
        }
        for band_row in (0..self.side).step_by(self.rows) {
            for band_col in (0..self.side).step_by(self.cols) {
                let rows = self.rows;
                let cols = self.cols;
                let mut positions = (band_row + 1..=band_row + rows)
                    .flat_map(|r| (band_col + 1..=band_col + cols).map(move |c| (r, c)));
                if !scope_ok(&mut positions) {
                    return false;
                }
            }
        }
        true
    }
}

impl Display for Board {
    /// Renders the grid with box-separating delimiters: a horizontal rule
    /// every `rows` rows, a `|` every `cols` columns, `.` for empty cells.
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let width = self.side.to_string().len();

        let mut rule = String::new();
        for c in 0..self.side {
            if c % self.cols == 0 {
                rule.push_str("+-");
            }
            for _ in 0..=width {
                rule.push('-');
            }
        }
        rule.push('+');

        for r in 1..=self.side {
            if (r - 1) % self.rows == 0 {
                writeln!(f, "{rule}")?;
            }
            for c in 1..=self.side {
                if (c - 1) % self.cols == 0 {
                    f.write_str("| ")?;
                }
                let value = self.cells[self.index(r, c)];
                if value == 0 {
                    write!(f, "{:>width$} ", ".")?;
                } else {
                    write!(f, "{value:>width$} ")?;
                }
            }
            f.write_char('|')?;
            f.write_char('\n')?;
        }
        write!(f, "{rule}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nine() -> Board {
        Board::new(3, 3).unwrap()
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(
            Board::new(0, 3),
            Err(BoardError::InvalidDimensions { rows: 0, cols: 3 })
        );
        assert_eq!(
            Board::new(2, 0),
            Err(BoardError::InvalidDimensions { rows: 2, cols: 0 })
        );
    }

    #[test]
    fn side_is_product_of_box_dimensions() {
        assert_eq!(nine().side(), 9);
        assert_eq!(Board::new(2, 3).unwrap().side(), 6);
        assert_eq!(Board::new(1, 1).unwrap().side(), 1);
    }

    #[test]
    fn insert_then_get_round_trips() {
        let mut board = nine();
        board.insert(5, 1, 1).unwrap();
        assert_eq!(board.get(1, 1), Ok(5));
        assert_eq!(board.get(1, 2), Ok(0));
    }

    #[test]
    fn insert_rejects_out_of_range_arguments() {
        let mut board = nine();
        assert_eq!(
            board.insert(5, 0, 1),
            Err(BoardError::OutOfRange {
                row: 0,
                col: 1,
                side: 9
            })
        );
        assert_eq!(
            board.insert(5, 1, 10),
            Err(BoardError::OutOfRange {
                row: 1,
                col: 10,
                side: 9
            })
        );
        assert_eq!(
            board.insert(10, 1, 1),
            Err(BoardError::ValueOutOfRange { value: 10, side: 9 })
        );
        assert_eq!(
            board.insert(0, 1, 1),
            Err(BoardError::ValueOutOfRange { value: 0, side: 9 })
        );
    }

    #[test]
    fn insert_rejects_occupied_cell() {
        let mut board = nine();
        board.insert(5, 1, 1).unwrap();
        assert_eq!(
            board.insert(6, 1, 1),
            Err(BoardError::CellOccupied { row: 1, col: 1 })
        );
        // the failed insert must not have changed the cell
        assert_eq!(board.get(1, 1), Ok(5));
    }

    #[test]
    fn insert_rejects_row_column_and_box_conflicts() {
        let mut board = nine();
        board.insert(5, 1, 1).unwrap();
        assert_eq!(
            board.insert(5, 1, 2),
            Err(BoardError::ValueNotCandidate {
                value: 5,
                row: 1,
                col: 2
            })
        );
        assert_eq!(
            board.insert(5, 9, 1),
            Err(BoardError::ValueNotCandidate {
                value: 5,
                row: 9,
                col: 1
            })
        );
        // same box, different row and column
        assert_eq!(
            board.insert(5, 3, 3),
            Err(BoardError::ValueNotCandidate {
                value: 5,
                row: 3,
                col: 3
            })
        );
        // outside all three scopes is fine
        board.insert(5, 4, 4).unwrap();
    }

    #[test]
    fn remove_clears_unconditionally() {
        let mut board = nine();
        board.insert(5, 2, 2).unwrap();
        board.remove(2, 2).unwrap();
        assert_eq!(board.get(2, 2), Ok(0));
        // removing an already-empty cell is allowed
        board.remove(2, 2).unwrap();
        assert_eq!(
            board.remove(0, 2),
            Err(BoardError::OutOfRange {
                row: 0,
                col: 2,
                side: 9
            })
        );
    }

    #[test]
    fn possible_values_is_empty_for_occupied_cell() {
        let mut board = nine();
        board.insert(5, 1, 1).unwrap();
        assert!(board.possible_values(1, 1).unwrap().is_empty());
    }

    #[test]
    fn possible_values_excludes_row_column_and_box() {
        let mut board = nine();
        board.insert(1, 1, 2).unwrap(); // row of (1,1)
        board.insert(2, 5, 1).unwrap(); // column of (1,1)
        board.insert(3, 2, 3).unwrap(); // box of (1,1)
        let candidates = board.possible_values(1, 1).unwrap();
        assert_eq!(candidates.as_slice(), &[4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn possible_values_are_full_range_on_empty_board() {
        let board = Board::new(2, 2).unwrap();
        let candidates = board.possible_values(3, 2).unwrap();
        assert_eq!(candidates.as_slice(), &[1, 2, 3, 4]);
    }

    #[test]
    fn possible_values_checks_bounds() {
        let board = nine();
        assert_eq!(
            board.possible_values(10, 1),
            Err(BoardError::OutOfRange {
                row: 10,
                col: 1,
                side: 9
            })
        );
    }

    #[test]
    fn first_empty_scans_row_major() {
        let mut board = Board::new(1, 2).unwrap();
        assert_eq!(board.first_empty(), Some(Assignment::new(0, 1, 1)));
        board.insert(1, 1, 1).unwrap();
        assert_eq!(board.first_empty(), Some(Assignment::new(0, 1, 2)));
        board.insert(2, 1, 2).unwrap();
        assert_eq!(board.first_empty(), Some(Assignment::new(0, 2, 1)));
    }

    #[test]
    fn first_empty_is_none_on_full_board() {
        let board = Board::from_grid(1, 2, &[vec![1, 2], vec![2, 1]]).unwrap();
        assert_eq!(board.first_empty(), None);
    }

    #[test]
    fn clear_empties_every_cell() {
        let mut board = Board::from_grid(1, 2, &[vec![1, 2], vec![2, 1]]).unwrap();
        board.clear();
        assert_eq!(board.first_empty(), Some(Assignment::new(0, 1, 1)));
        assert_eq!(board.get(2, 2), Ok(0));
    }

    #[test]
    fn clone_is_an_independent_snapshot() {
        let mut original = nine();
        original.insert(7, 4, 4).unwrap();
        let mut copy = original.clone();
        copy.insert(3, 1, 1).unwrap();
        copy.remove(4, 4).unwrap();
        assert_eq!(original.get(1, 1), Ok(0));
        assert_eq!(original.get(4, 4), Ok(7));
        assert_eq!(copy.get(4, 4), Ok(0));
    }

    #[test]
    fn insert_preserves_consistency() {
        let mut board = nine();
        for (value, row, col) in [(5, 1, 1), (3, 1, 2), (6, 2, 1), (9, 3, 2)] {
            board.insert(value, row, col).unwrap();
            assert!(board.is_consistent());
        }
    }

    #[test]
    fn is_consistent_detects_duplicates() {
        // bypass insert to plant a row duplicate
        let mut board = nine();
        board.cells[0] = 4;
        board.cells[5] = 4;
        assert!(!board.is_consistent());
    }

    #[test]
    fn from_grid_rejects_misshapen_grids() {
        assert!(Board::from_grid(1, 2, &[vec![0, 0]]).is_err());
        assert!(Board::from_grid(1, 2, &[vec![0], vec![0]]).is_err());
    }

    #[test]
    fn from_grid_rejects_conflicting_seed() {
        let result = Board::from_grid(2, 2, &[
            vec![1, 0, 0, 1],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 0],
        ]);
        assert_eq!(
            result,
            Err(BoardError::ValueNotCandidate {
                value: 1,
                row: 1,
                col: 4
            })
        );
    }

    #[test]
    fn display_draws_box_separators() {
        let board = Board::from_grid(2, 2, &[
            vec![1, 2, 3, 4],
            vec![3, 4, 1, 2],
            vec![2, 1, 4, 3],
            vec![4, 3, 2, 0],
        ])
        .unwrap();
        let rendered = board.to_string();
        let expected = "\
+-----+-----+
| 1 2 | 3 4 |
| 3 4 | 1 2 |
+-----+-----+
| 2 1 | 4 3 |
| 4 3 | 2 . |
+-----+-----+";
        assert_eq!(rendered, expected);
    }
}
