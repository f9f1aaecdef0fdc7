pub const ROWS: usize = 4;
pub const COLS: usize = 4;

/// A read-only copy of the grid, row 0 at the top.
pub type Snapshot = [[Cell; COLS]; ROWS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: Snapshot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("column {0} is out of range")]
    InvalidColumn(usize),
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 3 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Copy of the whole grid for the line detector and the UI.
    pub fn snapshot(&self) -> Snapshot {
        self.cells
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Number of pieces stacked in a column
    pub fn column_height(&self, col: usize) -> usize {
        (0..ROWS)
            .filter(|&row| !self.cells[row][col].is_empty())
            .count()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, cell: Cell) -> Result<usize, BoardError> {
        if col >= COLS {
            return Err(BoardError::InvalidColumn(col));
        }

        // Lowest empty row wins
        for row in (0..ROWS).rev() {
            if self.cells[row][col] == Cell::Empty {
                self.cells[row][col] = cell;
                return Ok(row);
            }
        }

        Err(BoardError::ColumnFull(col))
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Count of non-empty cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|cell| !cell.is_empty())
            .count()
    }

    /// True when no column has an empty cell below a filled one.
    pub fn respects_gravity(&self) -> bool {
        (0..COLS).all(|col| {
            let mut seen_piece = false;
            for row in 0..ROWS {
                match self.cells[row][col] {
                    Cell::Empty if seen_piece => return false,
                    Cell::Empty => {}
                    _ => seen_piece = true,
                }
            }
            true
        })
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_drop_piece() {
        let mut board = Board::new();

        let row = board.drop_piece(2, Cell::PlayerOne).unwrap();
        assert_eq!(row, 3); // Bottom row
        assert_eq!(board.get(3, 2), Cell::PlayerOne);

        let row = board.drop_piece(2, Cell::PlayerTwo).unwrap();
        assert_eq!(row, 2); // On top of the first piece
        assert_eq!(board.get(2, 2), Cell::PlayerTwo);
        assert_eq!(board.column_height(2), 2);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();

        for _ in 0..ROWS {
            board.drop_piece(0, Cell::PlayerOne).unwrap();
        }

        assert!(board.is_column_full(0));
        let before = board.snapshot();
        assert_eq!(
            board.drop_piece(0, Cell::PlayerTwo),
            Err(BoardError::ColumnFull(0))
        );
        assert_eq!(board.snapshot(), before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.drop_piece(4, Cell::PlayerOne),
            Err(BoardError::InvalidColumn(4))
        );
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Cell::PlayerOne).unwrap();
            }
        }
        assert!(board.is_full());
        assert_eq!(board.filled_count(), ROWS * COLS);
    }

    #[test]
    fn test_gravity_holds_after_drops() {
        let mut board = Board::new();
        for (i, col) in [1, 1, 3, 0, 1, 2, 3].into_iter().enumerate() {
            let cell = if i % 2 == 0 { Cell::PlayerOne } else { Cell::PlayerTwo };
            board.drop_piece(col, cell).unwrap();
            assert!(board.respects_gravity());
        }
    }

    #[test]
    fn test_snapshot_is_a_copy() {
        let mut board = Board::new();
        let snap = board.snapshot();
        board.drop_piece(0, Cell::PlayerOne).unwrap();
        assert_eq!(snap[3][0], Cell::Empty);
        assert_eq!(board.snapshot()[3][0], Cell::PlayerOne);
    }
}
