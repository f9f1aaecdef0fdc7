//! Core Connect Four game logic on a fixed 4x4 grid: board representation,
//! line detection, player types, and the game state machine.

mod board;
pub mod lines;
mod move_log;
mod player;
mod state;

pub use board::{Board, BoardError, Cell, Snapshot, COLS, ROWS};
pub use lines::{Orientation, WinningLine};
pub use move_log::MoveLog;
pub use player::Player;
pub use state::{GameState, GameStatus, MoveError};
