//! # Courier - multi-agent message router
//!
//! Courier runs a fleet of small agent services speaking a JSON-RPC
//! request/response protocol. Leaf agents log each request and answer
//! via a best-effort LLM completion chain; the orchestrator agent
//! resolves a downstream agent for each message (explicit prefix or
//! classifier) and relays its reply to the original caller.
//!
//! ## Architecture
//!
//! - `domain/` - protocol wire types (Message, AgentCard, task params)
//! - `agents/` - the handler contract, leaf and router handlers, LLM chain
//! - `persistence/` - append-only SQLite request log
//! - `adapters/` - JSON-RPC transport, peer client, health endpoint
//! - `config/` - settings loading and validation

pub mod adapters;
pub mod agents;
pub mod cli;
pub mod config;
pub mod domain;
pub mod persistence;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::adapters::health_handler::HealthHandler;
use crate::adapters::rpc_handler::{self, RpcState};
use crate::agents::handler::RequestHandler;
use crate::domain::AgentCard;

/// Create the axum application for one agent process.
///
/// Exposes the JSON-RPC protocol endpoint at `/`, the agent card at the
/// well-known discovery path, and a health check.
pub fn create_app(handler: Arc<dyn RequestHandler>, card: AgentCard) -> Router {
    let state = Arc::new(RpcState { handler, card });
    let health = Arc::new(HealthHandler::new());

    Router::new()
        .route("/", post(rpc_handler::handle_rpc))
        .route("/.well-known/agent.json", get(rpc_handler::agent_card))
        .route(
            "/health",
            get({
                let handler = health.clone();
                move || {
                    let h = handler.clone();
                    async move { h.health().await }
                }
            }),
        )
        .with_state(state)
        .layer(CorsLayer::permissive())
}
