//! Message types for the agent-to-agent protocol

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Role of a message sender on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The original caller
    User,
    /// An agent reply
    Agent,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Agent => write!(f, "agent"),
        }
    }
}

/// One content part of a message.
///
/// Only text parts carry content this system consults; data and file
/// parts are accepted on the wire and skipped.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    /// Plain text content
    Text { text: String },
    /// Structured data content
    Data { data: Value },
    /// File reference content
    File { file: Value },
}

/// A protocol message exchanged between agents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    /// Unique message identifier
    pub message_id: String,
    /// Role of the sender
    pub role: Role,
    /// Ordered content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Message {
    /// Create a user message with a single text part and a fresh id
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role(Role::User, text)
    }

    /// Create an agent reply with a single text part and a fresh id
    pub fn agent(text: impl Into<String>) -> Self {
        Self::with_role(Role::Agent, text)
    }

    fn with_role(role: Role, text: impl Into<String>) -> Self {
        Self {
            message_id: uuid::Uuid::new_v4().to_string(),
            role,
            parts: vec![Part::Text { text: text.into() }],
        }
    }

    /// Content of the first text part, or the empty string when none exists
    pub fn first_text(&self) -> &str {
        self.parts
            .iter()
            .find_map(|part| match part {
                Part::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .unwrap_or("")
    }
}

/// Parameters for the `message/send` and `message/stream` operations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSendParams {
    /// The message to handle
    pub message: Message,
    /// Arbitrary caller metadata, ignored by every handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl MessageSendParams {
    /// Wrap a message with no metadata
    pub fn new(message: Message) -> Self {
        Self {
            message,
            metadata: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_text_empty_parts() {
        let message = Message {
            message_id: "m1".to_string(),
            role: Role::User,
            parts: vec![],
        };
        assert_eq!(message.first_text(), "");
    }

    #[test]
    fn test_first_text_skips_non_text_parts() {
        let message = Message {
            message_id: "m2".to_string(),
            role: Role::User,
            parts: vec![
                Part::Data {
                    data: json!({"k": "v"}),
                },
                Part::Text {
                    text: "hello".to_string(),
                },
            ],
        };
        assert_eq!(message.first_text(), "hello");
    }

    #[test]
    fn test_constructors_generate_distinct_ids() {
        let a = Message::agent("one");
        let b = Message::agent("two");
        assert_ne!(a.message_id, b.message_id);
        assert_eq!(a.role, Role::Agent);
        assert_eq!(a.first_text(), "one");
    }

    #[test]
    fn test_wire_shape() {
        let value = serde_json::to_value(Message::user("hi")).unwrap();
        assert!(value["messageId"].is_string());
        assert_eq!(value["role"], "user");
        assert_eq!(value["parts"][0]["kind"], "text");
        assert_eq!(value["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_deserialize_tolerates_missing_parts() {
        let message: Message =
            serde_json::from_value(json!({"messageId": "m3", "role": "agent"})).unwrap();
        assert_eq!(message.first_text(), "");
    }
}
