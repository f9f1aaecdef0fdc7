//! Move-log encoding used on the wire: a bracketed, comma-separated list of
//! column indices in the request, a JSON array of integers in the response.

use crate::error::RemoteError;
use crate::game::MoveLog;

/// Query value for the `moves` parameter, e.g. `[0,3,1]`.
pub fn encode_moves(moves: &MoveLog) -> String {
    moves.to_string()
}

/// Parse a service reply. An empty list is rejected since it carries no move.
pub fn decode_moves(body: &str) -> Result<MoveLog, RemoteError> {
    let body = body.trim();
    if body.is_empty() {
        return Err(RemoteError::MalformedMoveResponse("empty body".into()));
    }

    let columns: Vec<usize> = serde_json::from_str(body)
        .map_err(|e| RemoteError::MalformedMoveResponse(e.to_string()))?;
    if columns.is_empty() {
        return Err(RemoteError::MalformedMoveResponse("empty move list".into()));
    }
    Ok(MoveLog::from(columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_moves() {
        assert_eq!(encode_moves(&MoveLog::new()), "[]");
        assert_eq!(encode_moves(&MoveLog::from(vec![2, 0])), "[2,0]");
    }

    #[test]
    fn test_decode_moves() {
        let log = decode_moves(" [0, 1, 3]\n").unwrap();
        assert_eq!(log.as_slice(), &[0, 1, 3]);
        assert_eq!(log.last(), Some(3));
    }

    #[test]
    fn test_decode_rejects_empty_list() {
        assert_eq!(
            decode_moves("[]"),
            Err(RemoteError::MalformedMoveResponse("empty move list".into()))
        );
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for body in ["", "null", "{\"move\": 2}", "[1, -1]", "[0, \"2\"]", "<html>"] {
            assert!(
                matches!(decode_moves(body), Err(RemoteError::MalformedMoveResponse(_))),
                "body {:?} should be rejected",
                body
            );
        }
    }
}
