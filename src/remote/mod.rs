//! Move sources for the remote player: the HTTP move-suggestion service plus
//! scripted and random stand-ins for tests and offline play.

mod http;
mod random;
mod scripted;
mod source;
pub mod wire;

pub use http::HttpMoveSource;
pub use random::RandomMoveSource;
pub use scripted::{ScriptedMoveSource, ScriptedReply};
pub use source::MoveSource;
