use std::path::PathBuf;

use crate::game::MoveError;

/// Failures talking to the move-suggestion service. All are retryable and
/// never change the game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RemoteError {
    #[error("move service unavailable: {0}")]
    MoveServiceUnavailable(String),

    #[error("malformed move response: {0}")]
    MalformedMoveResponse(String),
}

/// Errors surfaced by a game session to the UI.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Move(#[from] MoveError),

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("waiting for the remote player's move")]
    RemoteMovePending,

    #[error("it is the remote player's turn")]
    NotYourTurn,

    #[error("no remote move is due")]
    NoRemoteTurn,
}

impl SessionError {
    /// True when asking the move service again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::Remote(_))
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::MalformedMoveResponse("empty move list".to_string());
        assert_eq!(err.to_string(), "malformed move response: empty move list");
    }

    #[test]
    fn test_session_error_wraps_move_error() {
        let err: SessionError = MoveError::GameAlreadyOver.into();
        assert_eq!(err.to_string(), "game is over, start a new game");
        assert!(!err.is_retryable());
        assert!(!SessionError::Move(MoveError::ColumnFull(2)).is_retryable());
    }

    #[test]
    fn test_remote_failures_are_retryable() {
        let err: SessionError = RemoteError::MoveServiceUnavailable("timeout".into()).into();
        assert!(err.is_retryable());
        assert!(!SessionError::RemoteMovePending.is_retryable());
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Validation("remote.timeout_ms must be > 0".to_string());
        assert_eq!(
            err.to_string(),
            "config validation error: remote.timeout_ms must be > 0"
        );
    }
}
