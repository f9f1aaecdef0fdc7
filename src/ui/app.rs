use std::io;
use std::sync::{mpsc, Arc};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};
use tokio::runtime::Handle;
use tracing::debug;

use crate::error::{RemoteError, SessionError};
use crate::game::{MoveLog, COLS};
use crate::remote::MoveSource;
use crate::session::{RemoteResolution, RemoteTicket, Session};

/// A finished fetch, sent back from the runtime to the UI loop.
struct RemoteReply {
    ticket: RemoteTicket,
    result: Result<MoveLog, RemoteError>,
}

pub struct App {
    session: Session,
    selected_column: usize,
    should_quit: bool,
    message: Option<String>,
    source: Arc<dyn MoveSource>,
    runtime: Handle,
    replies_tx: mpsc::Sender<RemoteReply>,
    replies_rx: mpsc::Receiver<RemoteReply>,
    poll_interval: Duration,
}

impl App {
    pub fn new(source: Arc<dyn MoveSource>, runtime: Handle, poll_interval: Duration) -> Self {
        let (replies_tx, replies_rx) = mpsc::channel();
        App {
            session: Session::new(),
            selected_column: 0,
            should_quit: false,
            message: None,
            source,
            runtime,
            replies_tx,
            replies_rx,
            poll_interval,
        }
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.drain_remote_replies();
            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.poll_interval)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => {
                self.selected_column = self.selected_column.saturating_sub(1);
            }
            KeyCode::Right => {
                if self.selected_column + 1 < COLS {
                    self.selected_column += 1;
                }
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.selected_column = c as usize - '1' as usize;
                self.drop_piece();
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.drop_piece();
            }
            KeyCode::Char('t') => {
                self.request_remote_move();
            }
            KeyCode::Char('n') | KeyCode::Char('r') => {
                self.session.reset();
                self.selected_column = 0;
                self.message = Some("New game started!".to_string());
            }
            _ => {}
        }
    }

    /// Drop piece in selected column
    fn drop_piece(&mut self) {
        match self.session.play(self.selected_column) {
            Ok(outcome) => {
                self.message = outcome.status.message().map(str::to_string);
                if outcome.remote_move_due {
                    self.request_remote_move();
                }
            }
            Err(err) => {
                self.message = Some(describe(&err));
            }
        }
    }

    /// Start fetching the remote player's move in the background
    fn request_remote_move(&mut self) {
        let ticket = match self.session.begin_remote_turn() {
            Ok(ticket) => ticket,
            Err(err) => {
                self.message = Some(describe(&err));
                return;
            }
        };

        let source = Arc::clone(&self.source);
        let tx = self.replies_tx.clone();
        let moves = ticket.moves().clone();
        debug!(source = source.name(), generation = ticket.generation(), "spawning remote fetch");
        self.runtime.spawn(async move {
            let result = source.fetch_move(moves).await;
            // The receiver lives as long as the app; a closed channel means we quit.
            let _ = tx.send(RemoteReply { ticket, result });
        });
        self.message = None;
    }

    /// Apply any replies that arrived since the last frame
    fn drain_remote_replies(&mut self) {
        while let Ok(reply) = self.replies_rx.try_recv() {
            match self.session.complete_remote_turn(reply.ticket, reply.result) {
                Ok(RemoteResolution::Applied { status, .. }) => {
                    self.message = status.message().map(str::to_string);
                }
                Ok(RemoteResolution::Discarded) => {}
                Err(err) => {
                    self.message = Some(describe(&err));
                }
            }
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        super::game_view::render(frame, &self.session, self.selected_column, &self.message);
    }
}

/// User-facing text for a rejected action
fn describe(err: &SessionError) -> String {
    match err {
        SessionError::Move(crate::game::MoveError::GameAlreadyOver) => {
            "Game is over, start a new game".to_string()
        }
        SessionError::Move(crate::game::MoveError::ColumnFull(_)) => "Column is full!".to_string(),
        err if err.is_retryable() => format!("{}. Press 't' to retry.", err),
        err => format!("{}", err),
    }
}
