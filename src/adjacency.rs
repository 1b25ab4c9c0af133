//! Adjacency - the eight neighbour checks and the Q-rule.
//!
//! Relative positions around the CURRENT cell:
//!
//! ```text
//!     UpLeft   | Up      | UpRight
//!     Left     | CURRENT | Right
//!     DownLeft | Down    | DownRight
//! ```
//!
//! A candidate is valid when its row exists, its column exists *in that
//! row* (jagged boards), and it has not been visited on the current path.

use arrayvec::ArrayVec;
use rustc_hash::FxHashSet;

use crate::board::{Board, Position};

/// Cells already used by the current path.
pub type VisitedSet = FxHashSet<Position>;

/// Valid next steps from a cell (at most eight).
pub type Neighbors = ArrayVec<Position, 8>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    UpLeft,
    Left,
}

impl Direction {
    /// Fixed check order, so neighbour lists are reproducible.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::UpRight,
        Direction::Right,
        Direction::DownRight,
        Direction::Down,
        Direction::DownLeft,
        Direction::UpLeft,
        Direction::Left,
    ];

    /// (row delta, column delta)
    #[inline]
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::UpRight => (-1, 1),
            Direction::Right => (0, 1),
            Direction::DownRight => (1, 1),
            Direction::Down => (1, 0),
            Direction::DownLeft => (1, -1),
            Direction::UpLeft => (-1, -1),
            Direction::Left => (0, -1),
        }
    }

    /// The cell one step away, if it lies on the board.
    #[inline]
    pub fn step(self, board: &Board, (row, col): Position) -> Option<Position> {
        let (dr, dc) = self.offset();
        let row = row.checked_add_signed(dr)?;
        let col = col.checked_add_signed(dc)?;

        // Column bound is per row: rows may differ in length
        (row < board.row_count() && col < board.row_len(row)).then_some((row, col))
    }
}

/// Check one direction from `pos`, pushing the neighbour onto
/// `neighbors` if it is on the board and unvisited.
#[inline]
pub fn check_direction(
    board: &Board,
    pos: Position,
    direction: Direction,
    visited: &VisitedSet,
    neighbors: &mut Neighbors,
) {
    if let Some(next) = direction.step(board, pos) {
        if !visited.contains(&next) {
            neighbors.push(next);
        }
    }
}

/// All valid unvisited neighbours of `pos`, in [`Direction::ALL`] order.
pub fn valid_neighbors(board: &Board, pos: Position, visited: &VisitedSet) -> Neighbors {
    let mut neighbors = Neighbors::new();
    for direction in Direction::ALL {
        check_direction(board, pos, direction, visited, &mut neighbors);
    }
    neighbors
}

/// Letters a cell contributes to a word: 'q' reads as "qu".
///
/// Returns `None` for anything outside `a..=z`.
#[inline]
pub fn letters_for(cell: u8) -> Option<&'static str> {
    const LETTERS: [&str; 26] = [
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "qu",
        "r", "s", "t", "u", "v", "w", "x", "y", "z",
    ];
    LETTERS.get(cell.checked_sub(b'a')? as usize).copied()
}
