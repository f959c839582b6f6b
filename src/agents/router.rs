//! Orchestration handler: resolve a target agent and relay its reply

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::adapters::peer_client::{PeerClient, PeerReply};
use crate::agents::error::{HandlerResult, RoutingError};
use crate::agents::handler::RequestHandler;
use crate::agents::llm::CompletionChain;
use crate::config::RouteTarget;
use crate::domain::{AgentCard, Message, MessageSendParams};

/// Reply for prefix-policy input without a `key: content` shape
const REPLY_FORMAT_HINT: &str = "format: agent: message";
/// Reply when the classifier produces no registered key
const REPLY_UNROUTABLE: &str = "unable to route request";
/// Sentinel the classifier is asked to answer for unroutable input
const CLASSIFIER_MISS: &str = "unknown";

/// How the router maps message text to a route key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutePolicy {
    /// `<agent-key>: <content>` prefix syntax
    Prefix,
    /// Ask the completion chain to classify the message
    #[default]
    Classifier,
}

/// Registered downstream agents, keyed by normalized route key
pub struct RoutingTable {
    routes: BTreeMap<String, AgentCard>,
}

impl RoutingTable {
    /// Build the table from configuration.
    ///
    /// Keys are trimmed and lowercased. Construction fails on an empty
    /// or duplicate key and on a target that points back at `own_url`;
    /// a self-route would loop a message straight back into this
    /// handler.
    pub fn from_targets(targets: &[RouteTarget], own_url: &str) -> Result<Self, RoutingError> {
        let mut routes = BTreeMap::new();
        for target in targets {
            let key = normalize(&target.key);
            if key.is_empty() {
                return Err(RoutingError::EmptyKey);
            }
            if target.url.trim_end_matches('/') == own_url.trim_end_matches('/') {
                return Err(RoutingError::SelfRoute(key));
            }
            let card = AgentCard::peer(&target.url, &target.name, &target.description);
            if routes.insert(key.clone(), card).is_some() {
                return Err(RoutingError::DuplicateKey(key));
            }
        }
        Ok(Self { routes })
    }

    /// Look up a target by (normalized) key
    pub fn resolve(&self, key: &str) -> Option<&AgentCard> {
        self.routes.get(&normalize(key))
    }

    /// Keys and descriptions in key order, for the classifier prompt
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.routes
            .iter()
            .map(|(key, card)| (key.as_str(), card.description.as_str()))
    }
}

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Routing decision for one inbound message
enum Resolution {
    /// Forward `content` to the agent registered under `key`
    Forward {
        key: String,
        card: AgentCard,
        content: String,
    },
    /// Answer with a fixed reply, attempting no delivery
    Reply(String),
}

/// Agent whose `send` resolves a downstream agent and relays its reply.
///
/// The routing policy is the only variable part: prefix syntax or a
/// classification step. Forwarding and reply unwrapping are shared.
pub struct RouterAgent {
    table: RoutingTable,
    policy: RoutePolicy,
    chain: CompletionChain,
    client: PeerClient,
}

impl RouterAgent {
    pub fn new(
        table: RoutingTable,
        policy: RoutePolicy,
        chain: CompletionChain,
        client: PeerClient,
    ) -> Self {
        Self {
            table,
            policy,
            chain,
            client,
        }
    }

    async fn resolve(&self, text: &str) -> Resolution {
        match self.policy {
            RoutePolicy::Prefix => self.resolve_prefix(text),
            RoutePolicy::Classifier => self.resolve_classifier(text).await,
        }
    }

    /// Split `key: content` on the first colon; forward the trimmed
    /// content.
    fn resolve_prefix(&self, text: &str) -> Resolution {
        let Some((key, content)) = text.split_once(':') else {
            return Resolution::Reply(REPLY_FORMAT_HINT.to_string());
        };
        let key = normalize(key);
        match self.table.resolve(&key) {
            Some(card) => Resolution::Forward {
                card: card.clone(),
                key,
                content: content.trim().to_string(),
            },
            None => Resolution::Reply(format!("unknown agent: {}", key)),
        }
    }

    /// Ask the chain to pick a key; forward the original text untouched.
    async fn resolve_classifier(&self, text: &str) -> Resolution {
        let prompt = self.classifier_prompt(text);
        let choice = self.chain.complete(&prompt, CLASSIFIER_MISS).await;
        let key = normalize(&choice);
        match self.table.resolve(&key) {
            Some(card) => Resolution::Forward {
                card: card.clone(),
                key,
                content: text.to_string(),
            },
            None => Resolution::Reply(REPLY_UNROUTABLE.to_string()),
        }
    }

    fn classifier_prompt(&self, text: &str) -> String {
        let mut lines = vec![
            "You are a router that chooses the best agent for a request.".to_string(),
            "Agents:".to_string(),
        ];
        for (key, description) in self.table.entries() {
            lines.push(format!("- {}: {}", key, description));
        }
        lines.push(format!("User message: {}", text));
        lines.push(format!("Return only the agent name or '{}'.", CLASSIFIER_MISS));
        lines.join("\n")
    }
}

#[async_trait]
impl RequestHandler for RouterAgent {
    async fn on_message_send(&self, params: MessageSendParams) -> HandlerResult<Message> {
        let text = params.message.first_text();
        match self.resolve(text).await {
            Resolution::Reply(reply) => Ok(Message::agent(reply)),
            Resolution::Forward { key, card, content } => {
                tracing::info!(agent = %key, "forwarding message");
                let reply = match self.client.send_text(&card, &content).await {
                    Ok(PeerReply::Message(message)) => message.first_text().to_string(),
                    Ok(PeerReply::Other(_)) => "ok".to_string(),
                    Err(e) => {
                        tracing::warn!(agent = %key, error = %e, "peer call failed");
                        return Err(e.into());
                    }
                };
                Ok(Message::agent(reply))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;

    fn targets() -> Vec<RouteTarget> {
        vec![
            RouteTarget {
                key: "dispatch".to_string(),
                url: "http://localhost:8001".to_string(),
                name: "Dispatch Agent".to_string(),
                description: "Manages vehicle assignments".to_string(),
            },
            RouteTarget {
                key: "delivery".to_string(),
                url: "http://localhost:8002".to_string(),
                name: "Delivery Agent".to_string(),
                description: "Tracks shipment status".to_string(),
            },
        ]
    }

    fn router(policy: RoutePolicy) -> RouterAgent {
        let table = RoutingTable::from_targets(&targets(), "http://localhost:8000").unwrap();
        RouterAgent::new(table, policy, CompletionChain::empty(), PeerClient::new())
    }

    #[test]
    fn test_routing_table_normalizes_keys() {
        let table = RoutingTable::from_targets(&targets(), "http://localhost:8000").unwrap();
        assert!(table.resolve(" Dispatch ").is_some());
        assert!(table.resolve("DELIVERY").is_some());
        assert!(table.resolve("inbound").is_none());
    }

    #[test]
    fn test_routing_table_rejects_self_route() {
        let result = RoutingTable::from_targets(&targets(), "http://localhost:8001/");
        assert!(matches!(result, Err(RoutingError::SelfRoute(_))));
    }

    #[test]
    fn test_routing_table_rejects_duplicate_key() {
        let mut targets = targets();
        targets.push(RouteTarget {
            key: " DISPATCH".to_string(),
            url: "http://localhost:8004".to_string(),
            name: "Other".to_string(),
            description: String::new(),
        });
        let result = RoutingTable::from_targets(&targets, "http://localhost:8000");
        assert!(matches!(result, Err(RoutingError::DuplicateKey(_))));
    }

    #[tokio::test]
    async fn test_prefix_input_without_colon_yields_format_hint() {
        let reply = router(RoutePolicy::Prefix)
            .on_message_send(MessageSendParams::new(Message::user("hello")))
            .await
            .unwrap();
        assert_eq!(reply.first_text(), "format: agent: message");
        assert_eq!(reply.role, Role::Agent);
    }

    #[tokio::test]
    async fn test_prefix_unknown_key_names_the_key() {
        let reply = router(RoutePolicy::Prefix)
            .on_message_send(MessageSendParams::new(Message::user("unknownkey: test")))
            .await
            .unwrap();
        assert_eq!(reply.first_text(), "unknown agent: unknownkey");
    }

    #[tokio::test]
    async fn test_classifier_without_backends_is_unroutable() {
        // An empty chain answers the classifier prompt with "unknown".
        let reply = router(RoutePolicy::Classifier)
            .on_message_send(MessageSendParams::new(Message::user(
                "what is the meaning of life?",
            )))
            .await
            .unwrap();
        assert_eq!(reply.first_text(), "unable to route request");
    }

    #[test]
    fn test_classifier_prompt_enumerates_targets() {
        let router = router(RoutePolicy::Classifier);
        let prompt = router.classifier_prompt("where is my parcel?");
        assert!(prompt.contains("- dispatch: Manages vehicle assignments"));
        assert!(prompt.contains("- delivery: Tracks shipment status"));
        assert!(prompt.contains("User message: where is my parcel?"));
        assert!(prompt.ends_with("Return only the agent name or 'unknown'."));
    }

    #[tokio::test]
    async fn test_prefix_resolution_trims_content() {
        let router = router(RoutePolicy::Prefix);
        match router.resolve("dispatch:   load truck 7  ").await {
            Resolution::Forward { key, content, .. } => {
                assert_eq!(key, "dispatch");
                assert_eq!(content, "load truck 7");
            }
            Resolution::Reply(reply) => panic!("expected forward, got reply {:?}", reply),
        }
    }
}
