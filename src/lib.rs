//! # Remote Connect Four
//!
//! Connect Four on a fixed 4x4 grid. Player 1 is the local human; Player 2's
//! moves come from a remote move-suggestion service over HTTP.
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, line detection, player, state machine
//! - [`remote`] — Move sources for Player 2: HTTP service, scripted, random
//! - [`session`] — Turn sequencing between the human and the remote player
//! - [`ui`] — Terminal UI and headless line mode
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod error;
pub mod game;
pub mod remote;
pub mod session;
pub mod ui;
