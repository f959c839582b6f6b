//! Error types for agent request handling

use thiserror::Error;

use crate::adapters::peer_client::PeerError;
use crate::persistence::PersistenceError;

/// Errors surfaced from a request handler operation
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Operation is on the protocol surface but deliberately not implemented
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Request log write failed
    #[error("storage error: {0}")]
    Storage(#[from] PersistenceError),

    /// Downstream agent call failed
    #[error("peer call failed: {0}")]
    PeerCall(#[from] PeerError),

    /// Parameters did not decode for the requested operation
    #[error("invalid params: {0}")]
    InvalidParams(String),
}

/// Errors from building a routing table
#[derive(Debug, Error)]
pub enum RoutingError {
    /// A route key normalized to the empty string
    #[error("empty route key")]
    EmptyKey,

    /// Two targets normalized to the same key
    #[error("duplicate route key: {0}")]
    DuplicateKey(String),

    /// A target url points back at this agent
    #[error("route '{0}' points back at this agent")]
    SelfRoute(String),
}

/// Errors specific to LLM backend calls
#[derive(Debug, Error)]
pub enum LlmError {
    /// API error
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Authentication error
    #[error("authentication error: {0}")]
    Authentication(String),

    /// Network error
    #[error("network error: {0}")]
    Network(String),

    /// Parse error
    #[error("parse error: {0}")]
    Parse(String),

    /// Timeout
    #[error("request timed out")]
    Timeout,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else if err.is_connect() {
            LlmError::Network(format!("connection error: {}", err))
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

/// Result type alias for handler operations
pub type HandlerResult<T> = Result<T, HandlerError>;

/// Result type alias for LLM backend calls
pub type LlmResult<T> = Result<T, LlmError>;
