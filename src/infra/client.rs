//! HTTP connection to the arena server.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::infra::Position;
use crate::infra::protocol::{JoinParams, JoinResponse, StatusResponse};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("failed to decode {endpoint} response: {source}. Raw response: {body}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
        body: String,
    },
    #[error("server rejected {action} to {position} (status {status})")]
    Rejected {
        action: &'static str,
        position: Position,
        status: StatusCode,
    },
}

/// Server operations the turn loop relies on.
pub trait ArenaApi {
    fn base_url(&self) -> &str;

    fn join(&self, params: JoinParams) -> impl Future<Output = Result<u64, ClientError>> + Send;

    fn status(
        &self,
        robot_id: u64,
    ) -> impl Future<Output = Result<StatusResponse, ClientError>> + Send;

    /// Fails with [`ClientError::Rejected`] when the server refuses the step.
    fn move_to(
        &self,
        robot_id: u64,
        position: Position,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Fails with [`ClientError::Rejected`] when the server refuses the shot.
    fn shoot(
        &self,
        robot_id: u64,
        position: Position,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    fn end_turn(&self, robot_id: u64) -> impl Future<Output = Result<(), ClientError>> + Send;
}

pub struct ArenaClient {
    base_url: String,
    http_client: reqwest::Client,
}

impl ArenaClient {
    /// `host` is `address:port`, without scheme.
    pub fn new(host: &str) -> Self {
        Self {
            base_url: format!("http://{}/", host),
            http_client: reqwest::Client::new(),
        }
    }

    async fn act(
        &self,
        action: &'static str,
        robot_id: u64,
        position: Position,
    ) -> Result<(), ClientError> {
        let query = [
            ("robot_id", robot_id.to_string()),
            ("x", position.x.to_string()),
            ("y", position.y.to_string()),
        ];
        let response = self.send(action, &query).await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ClientError::Rejected {
                action,
                position,
                status,
            });
        }
        Ok(())
    }

    async fn send<Q: serde::Serialize + ?Sized>(
        &self,
        endpoint: &'static str,
        query: &Q,
    ) -> Result<reqwest::Response, ClientError> {
        tracing::trace!(endpoint, "Sending request");
        self.http_client
            .get(format!("{}{}", self.base_url, endpoint))
            .query(query)
            .send()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })
    }

    async fn get_json<T, Q>(&self, endpoint: &'static str, query: &Q) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let response = self.send(endpoint, query).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| ClientError::Decode {
            endpoint,
            source,
            body,
        })
    }
}

impl ArenaApi for ArenaClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn join(&self, params: JoinParams) -> Result<u64, ClientError> {
        let response: JoinResponse = self.get_json("join", &params).await?;
        Ok(response.robot_id)
    }

    async fn status(&self, robot_id: u64) -> Result<StatusResponse, ClientError> {
        self.get_json("status", &[("robot_id", robot_id)]).await
    }

    async fn move_to(&self, robot_id: u64, position: Position) -> Result<(), ClientError> {
        self.act("move", robot_id, position).await
    }

    async fn shoot(&self, robot_id: u64, position: Position) -> Result<(), ClientError> {
        self.act("shoot", robot_id, position).await
    }

    async fn end_turn(&self, robot_id: u64) -> Result<(), ClientError> {
        let endpoint = "endturn";
        let response = self.send(endpoint, &[("robot_id", robot_id)]).await?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|source| ClientError::Transport { endpoint, source })?;

        if !status.is_success() {
            return Err(ClientError::Status {
                endpoint,
                status,
                body,
            });
        }
        Ok(())
    }
}
