//! One game against the remote player.
//!
//! A [`Session`] wraps a [`GameState`] and sequences the human's moves with
//! the remote player's replies. The remote fetch is split in two halves so
//! the caller can run it anywhere: [`Session::begin_remote_turn`] hands out a
//! [`RemoteTicket`] and [`Session::complete_remote_turn`] applies the reply.
//! While a ticket is outstanding the session refuses other moves. Each ticket
//! carries the generation it was issued in; [`Session::reset`] bumps the
//! generation, so a reply for an abandoned game is dropped.

use tracing::{debug, info, warn};

use crate::error::{RemoteError, SessionError};
use crate::game::{GameState, GameStatus, MoveLog, Player, Snapshot, COLS};
use crate::remote::MoveSource;

/// Result of a human move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    pub status: GameStatus,
    /// The remote player must move next
    pub remote_move_due: bool,
}

/// Permission to apply one remote reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTicket {
    generation: u64,
    moves: MoveLog,
}

impl RemoteTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Move log to send to the move source
    pub fn moves(&self) -> &MoveLog {
        &self.moves
    }
}

/// What became of a remote reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteResolution {
    Applied { column: usize, status: GameStatus },
    /// The game was reset while the reply was in flight
    Discarded,
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    state: GameState,
    generation: u64,
    pending: Option<u64>,
}

impl Session {
    pub fn new() -> Self {
        Session::default()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> GameStatus {
        self.state.status()
    }

    pub fn current_turn(&self) -> Player {
        self.state.current_turn()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn move_log(&self) -> &MoveLog {
        self.state.move_log()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// A remote fetch is outstanding
    pub fn is_waiting(&self) -> bool {
        self.pending.is_some()
    }

    /// The remote player is to move and nobody has asked for the move yet.
    pub fn remote_move_due(&self) -> bool {
        !self.is_waiting() && !self.state.is_terminal() && self.current_turn().is_remote()
    }

    /// Status line for display
    pub fn message(&self) -> String {
        if self.is_waiting() {
            format!("Waiting for {}...", Player::Two.name())
        } else {
            self.state.message()
        }
    }

    /// Start a new game. Any outstanding remote reply becomes stale.
    pub fn reset(&mut self) {
        self.state.reset();
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
        info!(generation = self.generation, "new game");
    }

    /// Play the human's move.
    pub fn play(&mut self, column: usize) -> Result<PlayOutcome, SessionError> {
        if self.is_waiting() {
            return Err(SessionError::RemoteMovePending);
        }
        if !self.state.is_terminal() && self.current_turn().is_remote() {
            return Err(SessionError::NotYourTurn);
        }

        let status = self.state.play(column)?;
        log_result(status);
        Ok(PlayOutcome {
            status,
            remote_move_due: self.remote_move_due(),
        })
    }

    /// Mark the remote fetch as in flight and return the request to send.
    pub fn begin_remote_turn(&mut self) -> Result<RemoteTicket, SessionError> {
        if self.is_waiting() {
            return Err(SessionError::RemoteMovePending);
        }
        if self.state.is_terminal() {
            return Err(crate::game::MoveError::GameAlreadyOver.into());
        }
        if !self.current_turn().is_remote() {
            return Err(SessionError::NoRemoteTurn);
        }

        self.pending = Some(self.generation);
        debug!(generation = self.generation, moves = %self.move_log(), "remote turn started");
        Ok(RemoteTicket {
            generation: self.generation,
            moves: self.move_log().clone(),
        })
    }

    /// Apply the reply for `ticket`.
    ///
    /// Any failure leaves the game as it was and clears the in-flight flag,
    /// so the caller can retry with [`Session::begin_remote_turn`].
    pub fn complete_remote_turn(
        &mut self,
        ticket: RemoteTicket,
        reply: Result<MoveLog, RemoteError>,
    ) -> Result<RemoteResolution, SessionError> {
        if ticket.generation != self.generation || self.pending != Some(ticket.generation) {
            warn!(
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale remote reply"
            );
            return Ok(RemoteResolution::Discarded);
        }
        self.pending = None;

        let reply = reply.map_err(|e| {
            warn!(error = %e, "remote move failed");
            e
        })?;
        let column = reply
            .last()
            .ok_or_else(|| RemoteError::MalformedMoveResponse("empty move list".into()))?;
        if column >= COLS {
            warn!(column, "remote move out of range");
            return Err(RemoteError::MalformedMoveResponse(format!(
                "column {} is out of range",
                column
            ))
            .into());
        }
        if !reply.starts_with(&ticket.moves) {
            // Our own log stays authoritative; only the last entry is used.
            warn!(sent = %ticket.moves, received = %reply, "move service rewrote history");
        }

        if self.state.board().is_column_full(column) {
            warn!(column, "remote move into a full column");
            return Err(RemoteError::MalformedMoveResponse(format!(
                "suggested column {} is full",
                column
            ))
            .into());
        }

        let status = self.state.play(column)?;
        log_result(status);
        Ok(RemoteResolution::Applied { column, status })
    }

    /// Fetch and apply the remote player's move in one go.
    pub async fn run_remote_turn(
        &mut self,
        source: &dyn MoveSource,
    ) -> Result<RemoteResolution, SessionError> {
        let ticket = self.begin_remote_turn()?;
        let reply = source.fetch_move(ticket.moves().clone()).await;
        self.complete_remote_turn(ticket, reply)
    }

    /// Play the human's move, then let the remote player answer if due.
    pub async fn play_and_respond(
        &mut self,
        column: usize,
        source: &dyn MoveSource,
    ) -> Result<GameStatus, SessionError> {
        let outcome = self.play(column)?;
        if !outcome.remote_move_due {
            return Ok(outcome.status);
        }
        match self.run_remote_turn(source).await? {
            RemoteResolution::Applied { status, .. } => Ok(status),
            RemoteResolution::Discarded => Ok(self.status()),
        }
    }
}

fn log_result(status: GameStatus) {
    if let Some(msg) = status.message() {
        info!(?status, "{}", msg);
    }
}
