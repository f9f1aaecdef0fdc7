//! Terminal UI: an interactive ratatui game view and a line-oriented headless
//! mode. Neither holds game rules; both drive a [`crate::session::Session`].

mod app;
mod game_view;
pub mod headless;

pub use app::App;
