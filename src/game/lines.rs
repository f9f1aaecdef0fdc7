//! Four-in-a-row detection over the whole board.
//!
//! Every call scans the full grid rather than just the last placed piece.
//! Scanners run in a fixed order (vertical, diagonal down-right, diagonal
//! down-left, horizontal) and the first hit is reported. Draw detection is
//! separate and only meaningful once no line was found.

use super::board::{Board, Cell, COLS, ROWS};

const RUN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Vertical,
    /// Row and column both increasing
    DiagonalDownRight,
    /// Row increasing, column decreasing
    DiagonalDownLeft,
    Horizontal,
}

impl Orientation {
    /// Scan order used by [`evaluate`].
    pub const SCAN_ORDER: [Orientation; 4] = [
        Orientation::Vertical,
        Orientation::DiagonalDownRight,
        Orientation::DiagonalDownLeft,
        Orientation::Horizontal,
    ];

    /// (row step, column step)
    fn step(self) -> (isize, isize) {
        match self {
            Orientation::Vertical => (1, 0),
            Orientation::DiagonalDownRight => (1, 1),
            Orientation::DiagonalDownLeft => (1, -1),
            Orientation::Horizontal => (0, 1),
        }
    }
}

/// A completed four-in-a-row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WinningLine {
    pub mark: Cell,
    pub orientation: Orientation,
    /// (row, col) of each cell, in scan direction
    pub cells: [(usize, usize); RUN],
}

impl WinningLine {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.cells.contains(&(row, col))
    }
}

/// Winning mark, if any run of four identical non-empty cells exists.
pub fn evaluate(board: &Board) -> Option<Cell> {
    winning_line(board).map(|line| line.mark)
}

/// First complete line found, scanning orientations in [`Orientation::SCAN_ORDER`].
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    Orientation::SCAN_ORDER
        .iter()
        .find_map(|&orientation| scan(board, orientation))
}

/// True iff no empty cell remains. Callers check for a winner first.
pub fn check_draw(board: &Board) -> bool {
    board.is_full()
}

pub fn check_vertical(board: &Board) -> Option<Cell> {
    scan(board, Orientation::Vertical).map(|line| line.mark)
}

pub fn check_horizontal(board: &Board) -> Option<Cell> {
    scan(board, Orientation::Horizontal).map(|line| line.mark)
}

pub fn check_diagonal_down_right(board: &Board) -> Option<Cell> {
    scan(board, Orientation::DiagonalDownRight).map(|line| line.mark)
}

pub fn check_diagonal_down_left(board: &Board) -> Option<Cell> {
    scan(board, Orientation::DiagonalDownLeft).map(|line| line.mark)
}

/// Try every start cell for one orientation, row-major.
fn scan(board: &Board, orientation: Orientation) -> Option<WinningLine> {
    for row in 0..ROWS {
        for col in 0..COLS {
            if let Some(cells) = run_from(board, row, col, orientation) {
                return Some(WinningLine {
                    mark: board.get(row, col),
                    orientation,
                    cells,
                });
            }
        }
    }
    None
}

/// Coordinates of a run of four starting at (row, col), if it fits on the
/// board and all four cells hold the same non-empty mark.
fn run_from(
    board: &Board,
    row: usize,
    col: usize,
    orientation: Orientation,
) -> Option<[(usize, usize); RUN]> {
    let first = board.get(row, col);
    if first.is_empty() {
        return None;
    }

    let (dr, dc) = orientation.step();
    let mut cells = [(row, col); RUN];
    for (i, slot) in cells.iter_mut().enumerate().skip(1) {
        let r = row as isize + dr * i as isize;
        let c = col as isize + dc * i as isize;
        if r < 0 || c < 0 || r >= ROWS as isize || c >= COLS as isize {
            return None;
        }
        let (r, c) = (r as usize, c as usize);
        if board.get(r, c) != first {
            return None;
        }
        *slot = (r, c);
    }
    Some(cells)
}
