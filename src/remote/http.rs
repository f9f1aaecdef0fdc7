use async_trait::async_trait;
use tracing::{debug, warn};

use super::source::MoveSource;
use super::wire::{decode_moves, encode_moves};
use crate::config::RemoteConfig;
use crate::error::RemoteError;
use crate::game::MoveLog;

/// Move source backed by the HTTP move-suggestion service.
///
/// Sends `GET <endpoint>?moves=[c0,c1,...]` and expects a JSON array back.
pub struct HttpMoveSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMoveSource {
    pub fn new(config: &RemoteConfig) -> Result<Self, RemoteError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| RemoteError::MoveServiceUnavailable(e.to_string()))?;
        Ok(HttpMoveSource {
            client,
            endpoint: config.endpoint(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MoveSource for HttpMoveSource {
    async fn fetch_move(&self, moves: MoveLog) -> Result<MoveLog, RemoteError> {
        let query = encode_moves(&moves);
        debug!(endpoint = %self.endpoint, moves = %query, "requesting remote move");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("moves", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "move service request failed");
                RemoteError::MoveServiceUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "move service returned an error status");
            return Err(RemoteError::MoveServiceUnavailable(format!(
                "HTTP status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| RemoteError::MoveServiceUnavailable(e.to_string()))?;
        decode_moves(&body)
    }

    fn name(&self) -> &str {
        "HTTP"
    }
}
