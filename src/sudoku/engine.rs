#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
//! The frontier-driven depth-first search engine.
//!
//! The engine replaces recursive backtracking with an explicit loop over an
//! ordered frontier of pending candidate placements (see
//! [`crate::sudoku::frontier`]). Each iteration takes the frontier's leading
//! node and *expands* it:
//!
//! 1. Commit the node's assignment to the board (skipped for the root
//!    sentinel). The commit is always legal: the value was drawn from
//!    [`Board::possible_values`] when the node was created, and everything
//!    committed since has been undone on the path back to this node.
//! 2. Locate the first empty cell. If none exists, the board is a complete,
//!    consistent assignment: the search terminates with a solution.
//! 3. Otherwise compute that cell's candidates. An empty candidate set is a
//!    dead end: the node stays in the frontier and the engine *contracts*
//!    it, undoing its commit and walking up the tree removing ancestors
//!    whose live-child count has reached zero. A non-empty set branches into
//!    one child per candidate, spliced in at the node's frontier position.
//!
//! The board therefore always reflects exactly the assignments of the
//! ancestors on the path from the root to the frontier head. The search is
//! exhaustive: an empty frontier means no solution exists.
//!
//! Worst-case running time is exponential in the grid size, so the engine
//! accepts an optional step budget checked at the top of the loop.

use crate::sudoku::board::{Assignment, Board};
use crate::sudoku::frontier::{NodeId, SearchTree};

/// Outcome of expanding a single frontier node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expansion {
    /// No empty cell remains: the board is fully and validly assigned.
    Solved,
    /// The next empty cell has no candidates; the node must be contracted.
    DeadEnd,
    /// Children were spliced into the frontier in the node's place.
    Branched,
}

/// Terminal result of a solve run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A fully assigned, constraint-consistent board.
    Solved(Board),
    /// The frontier emptied without reaching a full assignment: the puzzle
    /// has no solution. An expected result, not an error.
    Exhausted,
    /// The configured step budget ran out before the search terminated.
    BudgetExhausted,
}

/// An exhaustive sudoku solver over a private board copy.
///
/// The solver clones the caller's board at construction and owns the clone
/// exclusively for the duration of the search; the original is never
/// mutated. Pre-seeded cells are trusted to be constraint-consistent; they
/// were validated by [`Board::insert`] when they were placed.
#[derive(Debug)]
pub struct Solver {
    board: Board,
    tree: SearchTree,
    steps: u64,
    max_steps: Option<u64>,
}

impl Solver {
    /// Creates a solver over a private copy of `board`.
    #[must_use]
    pub fn new(board: &Board) -> Self {
        Self {
            board: board.clone(),
            tree: SearchTree::new(),
            steps: 0,
            max_steps: None,
        }
    }

    /// Bounds the search to at most `max_steps` expansion steps.
    ///
    /// The budget is checked at the top of each loop iteration; an exceeded
    /// budget terminates with [`SolveOutcome::BudgetExhausted`].
    #[must_use]
    pub const fn with_step_limit(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    /// Number of completed (non-terminal) expansion steps so far.
    ///
    /// A board with no empty cells solves in zero steps.
    #[must_use]
    pub const fn steps(&self) -> u64 {
        self.steps
    }

    /// Total search nodes allocated, including the root sentinel.
    #[must_use]
    pub const fn nodes_created(&self) -> u64 {
        self.tree.created()
    }

    /// Largest frontier size observed during the search.
    #[must_use]
    pub const fn frontier_high_water(&self) -> usize {
        self.tree.high_water()
    }

    /// Runs the search to a terminal state.
    ///
    /// Returns [`SolveOutcome::Solved`] with an independent copy of the
    /// solved board, [`SolveOutcome::Exhausted`] if no solution exists, or
    /// [`SolveOutcome::BudgetExhausted`] if a step limit was hit first.
    pub fn solve(&mut self) -> SolveOutcome {
        while let Some(node) = self.tree.head() {
            if self.max_steps.is_some_and(|max| self.steps >= max) {
                return SolveOutcome::BudgetExhausted;
            }
            match self.expand(node) {
                Expansion::Solved => return SolveOutcome::Solved(self.board.clone()),
                Expansion::DeadEnd => {
                    self.steps += 1;
                    self.contract(node);
                }
                Expansion::Branched => self.steps += 1,
            }
        }
        SolveOutcome::Exhausted
    }

    /// Expands a frontier node: commits its assignment and either terminates
    /// (solved), leaves it as a dead-end leaf, or branches into children.
    ///
    /// # Panics
    ///
    /// Panics if `node` is not currently in the frontier (caller bug).
    fn expand(&mut self, node: NodeId) -> Expansion {
        assert!(
            self.tree.contains(node),
            "expand called on a node outside the frontier"
        );

        if let Some(assignment) = self.tree.assignment(node) {
            self.board
                .insert(assignment.value, assignment.row, assignment.col)
                .expect("node assignments are legal by construction");
        }

        let Some(cell) = self.board.first_empty() else {
            return Expansion::Solved;
        };

        let candidates = self
            .board
            .possible_values(cell.row, cell.col)
            .expect("first_empty returns in-range coordinates");

        if candidates.is_empty() {
            // the commit above is deliberately left in place; contraction
            // owns the undo
            return Expansion::DeadEnd;
        }

        self.tree.branch(
            node,
            candidates
                .into_iter()
                .map(|value| Assignment::new(value, cell.row, cell.col)),
        );
        Expansion::Branched
    }

    /// Contracts a dead-end leaf: undoes its board commit, removes it from
    /// the frontier, and walks upward releasing every ancestor whose
    /// live-child count reaches zero.
    ///
    /// The walk stops at the root sentinel: an absent parent ends the loop
    /// independently of the zero-children condition, so the unwind can never
    /// step past the root. A root that dead-ends is simply unlinked from the
    /// frontier, which empties it and terminates the search as exhausted.
    fn contract(&mut self, node: NodeId) {
        debug_assert!(self.tree.contains(node));
        debug_assert_eq!(self.tree.live_children(node), 0);

        let mut current = Some(node);
        while let Some(id) = current {
            if self.tree.live_children(id) != 0 {
                break;
            }
            if let Some(assignment) = self.tree.assignment(id) {
                // the cell holds this node's own commit (or is already
                // empty for a never-expanded leaf); removal is unconditional
                self.board
                    .remove(assignment.row, assignment.col)
                    .expect("node coordinates are in range");
            }
            self.tree.unlink(id);
            let parent = self.tree.parent(id);
            if let Some(p) = parent {
                self.tree.decrement_children(p);
                self.tree.release(id);
            }
            current = parent;
        }
    }
}
