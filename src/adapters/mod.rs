//! External integrations: the JSON-RPC transport, the peer client, and
//! the health endpoint.

pub mod health_handler;
pub mod jsonrpc;
pub mod peer_client;
pub mod rpc_handler;
