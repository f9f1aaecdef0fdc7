use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use super::source::MoveSource;
use crate::error::RemoteError;
use crate::game::{GameState, MoveLog};

/// Offline stand-in for the move service: picks a legal column uniformly at
/// random after replaying the received history.
pub struct RandomMoveSource {
    rng: Mutex<StdRng>,
}

impl RandomMoveSource {
    pub fn new() -> Self {
        RandomMoveSource {
            rng: Mutex::new(StdRng::from_os_rng()),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        RandomMoveSource {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl Default for RandomMoveSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MoveSource for RandomMoveSource {
    async fn fetch_move(&self, moves: MoveLog) -> Result<MoveLog, RemoteError> {
        let state = GameState::replay(moves.iter()).map_err(|e| {
            RemoteError::MoveServiceUnavailable(format!("cannot replay move log: {}", e))
        })?;

        let legal = state.legal_columns();
        if legal.is_empty() {
            return Err(RemoteError::MoveServiceUnavailable(
                "no legal moves left".into(),
            ));
        }

        let idx = self.rng.lock().await.random_range(0..legal.len());
        let mut moves = moves;
        moves.push(legal[idx]);
        Ok(moves)
    }

    fn name(&self) -> &str {
        "Random"
    }
}
