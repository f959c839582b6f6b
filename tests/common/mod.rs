//! Shared helpers for integration tests

use serde_json::{json, Value};
use std::sync::Arc;

use courier::agents::handler::RequestHandler;
use courier::agents::leaf::LeafAgent;
use courier::agents::llm::CompletionChain;
use courier::domain::AgentCard;
use courier::persistence::SqliteRequestLog;

/// Serve an agent app on an ephemeral port; returns its base url.
pub async fn spawn_agent(handler: Arc<dyn RequestHandler>, name: &str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    let card = AgentCard::advertised(url.clone(), name, name);
    let app = courier::create_app(handler, card);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    url
}

/// Build a leaf agent over a fresh database in `dir`, returning the
/// handler and its log for assertions.
pub async fn leaf_agent(
    dir: &tempfile::TempDir,
    prefix: &str,
    chain: CompletionChain,
) -> (Arc<dyn RequestHandler>, Arc<SqliteRequestLog>) {
    let db = dir.path().join(format!("{}.db", prefix.replace(' ', "_")));
    let url = format!("sqlite://{}", db.display());
    let log = Arc::new(SqliteRequestLog::connect(&url).await.unwrap());
    let handler = Arc::new(LeafAgent::new(log.clone(), chain, prefix));
    (handler, log)
}

/// One `message/send` round trip; returns the response envelope.
pub async fn rpc_send(client: &reqwest::Client, url: &str, text: &str) -> Value {
    rpc_call(
        client,
        url,
        "message/send",
        json!({"message": {
            "messageId": uuid_like(text),
            "role": "user",
            "parts": [{"kind": "text", "text": text}],
        }}),
    )
    .await
}

/// One JSON-RPC round trip; returns the response envelope.
pub async fn rpc_call(client: &reqwest::Client, url: &str, method: &str, params: Value) -> Value {
    let response = client
        .post(url)
        .json(&json!({"jsonrpc": "2.0", "id": 1, "method": method, "params": params}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    response.json().await.unwrap()
}

/// Text of the reply message inside a response envelope.
pub fn reply_text(envelope: &Value) -> &str {
    envelope["result"]["parts"][0]["text"].as_str().unwrap()
}

fn uuid_like(seed: &str) -> String {
    format!("test-{}", seed.len())
}
