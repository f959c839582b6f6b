//! Terminal agent: log the request, answer via the completion chain

use async_trait::async_trait;
use std::sync::Arc;

use crate::agents::error::HandlerResult;
use crate::agents::handler::RequestHandler;
use crate::agents::llm::CompletionChain;
use crate::domain::{Message, MessageSendParams};
use crate::persistence::RequestLog;

/// Leaf agent with no routing responsibility.
///
/// Records every inbound text, then replies with the completion chain's
/// answer, falling back to `"<prefix>: <text>"`. A storage failure is
/// the only abort condition on this path.
pub struct LeafAgent {
    log: Arc<dyn RequestLog>,
    chain: CompletionChain,
    reply_prefix: String,
}

impl LeafAgent {
    pub fn new(
        log: Arc<dyn RequestLog>,
        chain: CompletionChain,
        reply_prefix: impl Into<String>,
    ) -> Self {
        Self {
            log,
            chain,
            reply_prefix: reply_prefix.into(),
        }
    }
}

#[async_trait]
impl RequestHandler for LeafAgent {
    async fn on_message_send(&self, params: MessageSendParams) -> HandlerResult<Message> {
        let text = params.message.first_text().to_string();
        self.log.record(&text).await?;

        let fallback = format!("{}: {}", self.reply_prefix, text);
        let reply = self.chain.complete(&text, &fallback).await;
        Ok(Message::agent(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use crate::persistence::SqliteRequestLog;

    async fn leaf(dir: &tempfile::TempDir, prefix: &str) -> (LeafAgent, Arc<SqliteRequestLog>) {
        let url = format!("sqlite://{}", dir.path().join("leaf.db").display());
        let log = Arc::new(SqliteRequestLog::connect(&url).await.unwrap());
        (
            LeafAgent::new(log.clone(), CompletionChain::empty(), prefix),
            log,
        )
    }

    #[tokio::test]
    async fn test_reply_uses_prefix_fallback_without_backends() {
        let dir = tempfile::tempdir().unwrap();
        let (agent, log) = leaf(&dir, "vehicle stored").await;

        let reply = agent
            .on_message_send(MessageSendParams::new(Message::user("3 pallets to dock B")))
            .await
            .unwrap();

        assert_eq!(reply.role, Role::Agent);
        assert_eq!(reply.first_text(), "vehicle stored: 3 pallets to dock B");
        assert_eq!(log.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_message_without_text_is_handled_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (agent, log) = leaf(&dir, "intake logged").await;

        let message = Message {
            message_id: "m1".to_string(),
            role: Role::User,
            parts: vec![],
        };
        let reply = agent
            .on_message_send(MessageSendParams::new(message))
            .await
            .unwrap();

        assert_eq!(reply.first_text(), "intake logged: ");
        assert_eq!(log.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_every_request_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let (agent, log) = leaf(&dir, "delivery noted").await;

        for text in ["first", "second", "third"] {
            agent
                .on_message_send(MessageSendParams::new(Message::user(text)))
                .await
                .unwrap();
        }
        assert_eq!(log.count().await.unwrap(), 3);
    }
}
