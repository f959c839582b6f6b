//! Axum endpoints exposing a request handler over JSON-RPC

use axum::extract::State;
use axum::Json;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;

use super::jsonrpc::{self, JsonRpcRequest, JsonRpcResponse};
use crate::agents::error::HandlerError;
use crate::agents::handler::RequestHandler;
use crate::domain::AgentCard;

/// Shared state for one agent process
pub struct RpcState {
    pub handler: Arc<dyn RequestHandler>,
    pub card: AgentCard,
}

/// POST / - the protocol endpoint.
///
/// The body is parsed by hand so a malformed envelope yields a JSON-RPC
/// parse error instead of a bare transport rejection.
pub async fn handle_rpc(State(state): State<Arc<RpcState>>, body: String) -> Json<JsonRpcResponse> {
    let request: JsonRpcRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            return Json(JsonRpcResponse::error(
                Value::Null,
                jsonrpc::PARSE_ERROR,
                format!("invalid request body: {}", e),
            ))
        }
    };

    let id = request.id.clone();
    let method = request.method.clone();
    let response = match dispatch(state.handler.as_ref(), request).await {
        Ok(result) => JsonRpcResponse::ok(id, result),
        Err(DispatchError::UnknownMethod) => JsonRpcResponse::error(
            id,
            jsonrpc::METHOD_NOT_FOUND,
            format!("unknown method: {}", method),
        ),
        Err(DispatchError::Params(message)) => {
            JsonRpcResponse::error(id, jsonrpc::INVALID_PARAMS, message)
        }
        Err(DispatchError::Handler(e)) => {
            match e {
                HandlerError::UnsupportedOperation(_) => {
                    tracing::debug!(method = %method, "refusing unsupported operation")
                }
                _ => tracing::error!(method = %method, error = %e, "request failed"),
            }
            JsonRpcResponse::error(id, error_code(&e), e.to_string())
        }
    };
    Json(response)
}

/// GET /.well-known/agent.json - capability discovery
pub async fn agent_card(State(state): State<Arc<RpcState>>) -> Json<AgentCard> {
    Json(state.card.clone())
}

enum DispatchError {
    UnknownMethod,
    Params(String),
    Handler(HandlerError),
}

impl From<HandlerError> for DispatchError {
    fn from(error: HandlerError) -> Self {
        DispatchError::Handler(error)
    }
}

async fn dispatch(
    handler: &dyn RequestHandler,
    request: JsonRpcRequest,
) -> Result<Value, DispatchError> {
    let params = request.params.unwrap_or(Value::Null);
    match request.method.as_str() {
        jsonrpc::METHOD_MESSAGE_SEND => {
            let message = handler.on_message_send(decode(params)?).await?;
            Ok(encode(&message))
        }
        jsonrpc::METHOD_MESSAGE_STREAM => {
            handler.on_message_send_stream(decode(params)?).await?;
            // No handler here ever yields a stream, and this transport
            // could not carry one.
            Err(HandlerError::UnsupportedOperation(jsonrpc::METHOD_MESSAGE_STREAM).into())
        }
        jsonrpc::METHOD_TASKS_GET => {
            let task = handler.on_get_task(decode(params)?).await?;
            Ok(encode(&task))
        }
        jsonrpc::METHOD_TASKS_CANCEL => {
            let task = handler.on_cancel_task(decode(params)?).await?;
            Ok(encode(&task))
        }
        jsonrpc::METHOD_PUSH_CONFIG_SET => {
            let config = handler
                .on_set_task_push_notification_config(decode(params)?)
                .await?;
            Ok(encode(&config))
        }
        jsonrpc::METHOD_PUSH_CONFIG_GET => {
            let config = handler
                .on_get_task_push_notification_config(decode(params)?)
                .await?;
            Ok(encode(&config))
        }
        jsonrpc::METHOD_PUSH_CONFIG_LIST => {
            let configs = handler
                .on_list_task_push_notification_config(decode(params)?)
                .await?;
            Ok(encode(&configs))
        }
        jsonrpc::METHOD_PUSH_CONFIG_DELETE => {
            handler
                .on_delete_task_push_notification_config(decode(params)?)
                .await?;
            Ok(Value::Null)
        }
        jsonrpc::METHOD_TASKS_RESUBSCRIBE => {
            handler.on_resubscribe_to_task(decode(params)?).await?;
            Err(HandlerError::UnsupportedOperation(jsonrpc::METHOD_TASKS_RESUBSCRIBE).into())
        }
        _ => Err(DispatchError::UnknownMethod),
    }
}

fn decode<T: DeserializeOwned>(params: Value) -> Result<T, DispatchError> {
    serde_json::from_value(params).map_err(|e| DispatchError::Params(e.to_string()))
}

fn encode<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn error_code(error: &HandlerError) -> i64 {
    match error {
        HandlerError::UnsupportedOperation(_) => jsonrpc::UNSUPPORTED_OPERATION,
        HandlerError::InvalidParams(_) => jsonrpc::INVALID_PARAMS,
        HandlerError::Storage(_) | HandlerError::PeerCall(_) => jsonrpc::INTERNAL_ERROR,
    }
}
