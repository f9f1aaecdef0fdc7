use async_trait::async_trait;

use crate::error::RemoteError;
use crate::game::MoveLog;

/// Supplies the remote player's moves.
///
/// Implementations receive the full move history and answer with the updated
/// history, whose last entry is the column the remote player picks.
#[async_trait]
pub trait MoveSource: Send + Sync {
    /// Ask for the next move given every column played so far.
    async fn fetch_move(&self, moves: MoveLog) -> Result<MoveLog, RemoteError>;

    /// Return the source's display name.
    fn name(&self) -> &str;
}
