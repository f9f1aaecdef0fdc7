use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::source::MoveSource;
use crate::error::RemoteError;
use crate::game::MoveLog;

/// One canned answer from a [`ScriptedMoveSource`].
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// Append this column to the request and return it
    Column(usize),
    /// Return this log verbatim, ignoring the request
    Log(MoveLog),
    Fail(RemoteError),
}

/// Deterministic move source that plays back a fixed script of replies.
pub struct ScriptedMoveSource {
    replies: Mutex<VecDeque<ScriptedReply>>,
    requests: Mutex<Vec<MoveLog>>,
}

impl ScriptedMoveSource {
    pub fn new<I>(replies: I) -> Self
    where
        I: IntoIterator<Item = ScriptedReply>,
    {
        ScriptedMoveSource {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Script that answers with each column in turn.
    pub fn columns<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        Self::new(columns.into_iter().map(ScriptedReply::Column))
    }

    /// Every move log received so far, oldest first.
    pub async fn requests(&self) -> Vec<MoveLog> {
        self.requests.lock().await.clone()
    }

    pub async fn remaining(&self) -> usize {
        self.replies.lock().await.len()
    }
}

#[async_trait]
impl MoveSource for ScriptedMoveSource {
    async fn fetch_move(&self, moves: MoveLog) -> Result<MoveLog, RemoteError> {
        self.requests.lock().await.push(moves.clone());

        let reply = self.replies.lock().await.pop_front().ok_or_else(|| {
            RemoteError::MoveServiceUnavailable("script exhausted".into())
        })?;

        match reply {
            ScriptedReply::Column(column) => {
                let mut moves = moves;
                moves.push(column);
                Ok(moves)
            }
            ScriptedReply::Log(log) => Ok(log),
            ScriptedReply::Fail(err) => Err(err),
        }
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_columns_are_appended_in_order() {
        let source = ScriptedMoveSource::columns([3, 1]);

        let first = source.fetch_move(MoveLog::from(vec![0])).await.unwrap();
        assert_eq!(first.as_slice(), &[0, 3]);

        let second = source.fetch_move(MoveLog::from(vec![0, 3, 2])).await.unwrap();
        assert_eq!(second.as_slice(), &[0, 3, 2, 1]);

        assert_eq!(source.requests().await.len(), 2);
        assert_eq!(source.remaining().await, 0);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let source = ScriptedMoveSource::columns(Vec::new());
        let err = source.fetch_move(MoveLog::new()).await.unwrap_err();
        assert!(matches!(err, RemoteError::MoveServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn test_verbatim_and_failure_replies() {
        let source = ScriptedMoveSource::new([
            ScriptedReply::Log(MoveLog::new()),
            ScriptedReply::Fail(RemoteError::MalformedMoveResponse("bad".into())),
        ]);
        assert!(source.fetch_move(MoveLog::from(vec![1])).await.unwrap().is_empty());
        assert!(source.fetch_move(MoveLog::from(vec![1])).await.is_err());
    }
}
