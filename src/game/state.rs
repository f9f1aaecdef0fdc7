use tracing::debug;

use super::board::{BoardError, Snapshot, COLS};
use super::lines::{self, WinningLine};
use super::{Board, Cell, MoveLog, Player};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    InProgress,
    PlayerOneWins,
    PlayerTwoWins,
    Draw,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        self != GameStatus::InProgress
    }

    /// Winning player, if the game ended in a win
    pub fn winner(self) -> Option<Player> {
        match self {
            GameStatus::PlayerOneWins => Some(Player::One),
            GameStatus::PlayerTwoWins => Some(Player::Two),
            GameStatus::InProgress | GameStatus::Draw => None,
        }
    }

    fn won_by(player: Player) -> Self {
        match player {
            Player::One => GameStatus::PlayerOneWins,
            Player::Two => GameStatus::PlayerTwoWins,
        }
    }

    /// Result line for display, `None` while the game is running
    pub fn message(self) -> Option<&'static str> {
        match self {
            GameStatus::InProgress => None,
            GameStatus::PlayerOneWins => Some("Player 1 wins"),
            GameStatus::PlayerTwoWins => Some("Player 2 wins"),
            GameStatus::Draw => Some("Game is a draw"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {0} is out of range")]
    InvalidColumn(usize),
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("game is over, start a new game")]
    GameAlreadyOver,
}

impl From<BoardError> for MoveError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::ColumnFull(col) => MoveError::ColumnFull(col),
            BoardError::InvalidColumn(col) => MoveError::InvalidColumn(col),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_turn: Player,
    status: GameStatus,
    moves: MoveLog,
}

impl GameState {
    /// Create initial game state
    pub fn new() -> Self {
        GameState {
            board: Board::new(),
            current_turn: Player::One,
            status: GameStatus::InProgress,
            moves: MoveLog::new(),
        }
    }

    /// Build a state by playing `moves` from the initial position.
    pub fn replay<I>(moves: I) -> Result<Self, MoveError>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut state = GameState::new();
        for column in moves {
            state.play(column)?;
        }
        Ok(state)
    }

    /// Back to an empty board with Player 1 to move
    pub fn reset(&mut self) {
        *self = GameState::new();
    }

    /// Get current player
    pub fn current_turn(&self) -> Player {
        self.current_turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot()
    }

    pub fn move_log(&self) -> &MoveLog {
        &self.moves
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// The completed line, once the game has been won
    pub fn winning_line(&self) -> Option<WinningLine> {
        match self.status {
            GameStatus::PlayerOneWins | GameStatus::PlayerTwoWins => {
                lines::winning_line(&self.board)
            }
            _ => None,
        }
    }

    /// Status line for display
    pub fn message(&self) -> String {
        match self.status.message() {
            Some(msg) => msg.to_string(),
            None => format!("{} to move", self.current_turn.name()),
        }
    }

    /// Drop a piece for the player to move. Returns the status after the move.
    ///
    /// A rejected move leaves board, log, turn and status untouched.
    pub fn play(&mut self, column: usize) -> Result<GameStatus, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn(column));
        }

        let mover = self.current_turn;
        let row = self.board.drop_piece(column, mover.to_cell())?;
        self.moves.push(column);
        debug!(player = mover.name(), column, row, "piece dropped");

        // Draw is only considered once no line was found
        if let Some(mark) = lines::evaluate(&self.board) {
            let winner = Player::from_cell(mark).unwrap_or(mover);
            self.status = GameStatus::won_by(winner);
        } else if lines::check_draw(&self.board) {
            self.status = GameStatus::Draw;
        } else {
            self.current_turn = mover.other();
        }

        Ok(self.status)
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.play(column)?;
        Ok(next)
    }

    /// Cell contents for the UI, row 0 at the top
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, ROWS};

    /// Full board, no four-in-a-row, Player 1 moving first.
    const DRAW_SEQUENCE: [usize; 16] = [0, 2, 1, 3, 2, 0, 3, 1, 0, 2, 1, 3, 2, 0, 3, 1];

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.current_turn(), Player::One);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert!(state.move_log().is_empty());
        assert_eq!(state.legal_columns(), vec![0, 1, 2, 3]);
        assert_eq!(state.message(), "Player 1 to move");
    }

    #[test]
    fn test_play_flips_turn_and_logs() {
        let mut state = GameState::new();
        let status = state.play(3).unwrap();

        assert_eq!(status, GameStatus::InProgress);
        assert_eq!(state.current_turn(), Player::Two);
        assert_eq!(state.cell(ROWS - 1, 3), Cell::PlayerOne);
        assert_eq!(state.move_log().as_slice(), &[3]);
    }

    #[test]
    fn test_vertical_win() {
        // Player 2 answers in column 1 each time
        let state = GameState::replay([0, 1, 0, 1, 0, 1, 0]).unwrap();
        assert_eq!(state.status(), GameStatus::PlayerOneWins);
        assert_eq!(state.message(), "Player 1 wins");
        // Turn stays with the winner
        assert_eq!(state.current_turn(), Player::One);
    }

    #[test]
    fn test_horizontal_win() {
        // Player 2 stacks on Player 1's pieces in the row above
        let state = GameState::replay([0, 0, 1, 1, 2, 2, 3]).unwrap();
        assert_eq!(state.status(), GameStatus::PlayerOneWins);
        let line = state.winning_line().unwrap();
        assert_eq!(line.cells, [(3, 0), (3, 1), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_player_two_win() {
        let state = GameState::replay([0, 1, 2, 1, 3, 1, 0, 1]).unwrap();
        assert_eq!(state.status(), GameStatus::PlayerTwoWins);
        assert_eq!(state.status().winner(), Some(Player::Two));
    }

    #[test]
    fn test_column_full_leaves_state_unchanged() {
        let mut state = GameState::replay([0, 0, 0, 0]).unwrap();
        let before = state.clone();

        assert_eq!(state.play(0), Err(MoveError::ColumnFull(0)));
        assert_eq!(state, before);
        assert_eq!(state.move_log().len(), 4);
    }

    #[test]
    fn test_invalid_column_leaves_state_unchanged() {
        let mut state = GameState::new();
        assert_eq!(state.play(4), Err(MoveError::InvalidColumn(4)));
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_play_after_win_is_rejected() {
        let mut state = GameState::replay([0, 1, 0, 1, 0, 1, 0]).unwrap();
        let before = state.clone();

        assert_eq!(state.play(2), Err(MoveError::GameAlreadyOver));
        assert_eq!(state, before);
        assert!(state.legal_columns().is_empty());
    }

    #[test]
    fn test_draw() {
        let state = GameState::replay(DRAW_SEQUENCE).unwrap();
        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.message(), "Game is a draw");
        assert!(state.board().is_full());
    }

    #[test]
    fn test_win_on_last_cell_beats_draw() {
        // Last drop fills the board and completes column 3 for Player 2
        let moves = [0, 3, 1, 3, 2, 3, 0, 2, 1, 0, 2, 1, 0, 1, 2, 3];
        let mut state = GameState::new();
        for (i, &col) in moves.iter().enumerate() {
            let status = state.play(col).unwrap();
            if i + 1 < moves.len() {
                assert_eq!(status, GameStatus::InProgress, "move {}", i);
            }
        }
        assert!(state.board().is_full());
        assert_eq!(state.status(), GameStatus::PlayerTwoWins);
    }

    #[test]
    fn test_reset() {
        let mut state = GameState::replay([0, 1, 2]).unwrap();
        state.reset();
        assert_eq!(state, GameState::new());
    }

    #[test]
    fn test_replay_is_deterministic() {
        let moves = [1, 2, 1, 0, 3, 3, 2];
        let a = GameState::replay(moves).unwrap();
        let b = GameState::replay(moves).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.move_log().as_slice(), &moves);
    }

    #[test]
    fn test_log_length_matches_filled_cells() {
        let mut state = GameState::new();
        let mut accepted = 0;
        for col in [0, 0, 0, 0, 0, 1, 4, 2, 1, 3] {
            if state.play(col).is_ok() {
                accepted += 1;
            }
            assert_eq!(state.move_log().len(), accepted);
            assert_eq!(state.board().filled_count(), accepted);
            assert!(state.board().respects_gravity());
        }
    }

    #[test]
    fn test_apply_move_is_immutable() {
        let state = GameState::new();
        let next = state.apply_move(2).unwrap();
        assert!(state.move_log().is_empty());
        assert_eq!(next.move_log().as_slice(), &[2]);
    }
}
