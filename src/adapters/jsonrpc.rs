//! JSON-RPC 2.0 envelope types and protocol error codes

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const METHOD_MESSAGE_SEND: &str = "message/send";
pub const METHOD_MESSAGE_STREAM: &str = "message/stream";
pub const METHOD_TASKS_GET: &str = "tasks/get";
pub const METHOD_TASKS_CANCEL: &str = "tasks/cancel";
pub const METHOD_PUSH_CONFIG_SET: &str = "tasks/pushNotificationConfig/set";
pub const METHOD_PUSH_CONFIG_GET: &str = "tasks/pushNotificationConfig/get";
pub const METHOD_PUSH_CONFIG_LIST: &str = "tasks/pushNotificationConfig/list";
pub const METHOD_PUSH_CONFIG_DELETE: &str = "tasks/pushNotificationConfig/delete";
pub const METHOD_TASKS_RESUBSCRIBE: &str = "tasks/resubscribe";

pub const PARSE_ERROR: i64 = -32700;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;
/// Operation is on the protocol surface but not supported by this agent
pub const UNSUPPORTED_OPERATION: i64 = -32004;

/// One JSON-RPC request envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build an outbound call with a fresh request id
    pub fn call(method: &str, params: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Value::String(uuid::Uuid::new_v4().to_string()),
            method: method.to_string(),
            params: Some(params),
        }
    }
}

/// Error member of a response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
}

/// One JSON-RPC response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}
