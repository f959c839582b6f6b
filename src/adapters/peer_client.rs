//! One-shot JSON-RPC client for calling a peer agent

use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

use crate::adapters::jsonrpc::{JsonRpcRequest, JsonRpcResponse, METHOD_MESSAGE_SEND};
use crate::domain::{AgentCard, Message};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from a peer agent round trip
#[derive(Debug, Error)]
pub enum PeerError {
    /// Request never completed
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Peer answered with a JSON-RPC error
    #[error("peer returned protocol error {code}: {message}")]
    Protocol { code: i64, message: String },
}

/// Reply shapes a peer call can produce
#[derive(Debug)]
pub enum PeerReply {
    /// A well-formed protocol message
    Message(Message),
    /// Any other result shape, e.g. a bare acknowledgement
    Other(Value),
}

/// Thin request/response client for peer agents.
///
/// One round trip per call, no retries. The underlying connection is
/// not pooled across routing decisions beyond what reqwest itself does.
#[derive(Clone)]
pub struct PeerClient {
    client: reqwest::Client,
}

impl PeerClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Send `text` to the agent addressed by `card` and return its reply.
    pub async fn send_text(&self, card: &AgentCard, text: &str) -> Result<PeerReply, PeerError> {
        let request = JsonRpcRequest::call(
            METHOD_MESSAGE_SEND,
            json!({ "message": Message::user(text) }),
        );

        let envelope: JsonRpcResponse = self
            .client
            .post(&card.url)
            .timeout(REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(error) = envelope.error {
            return Err(PeerError::Protocol {
                code: error.code,
                message: error.message,
            });
        }

        let result = envelope.result.unwrap_or(Value::Null);
        match serde_json::from_value::<Message>(result.clone()) {
            Ok(message) => Ok(PeerReply::Message(message)),
            Err(_) => Ok(PeerReply::Other(result)),
        }
    }
}

impl Default for PeerClient {
    fn default() -> Self {
        Self::new()
    }
}
