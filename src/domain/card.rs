//! Agent descriptor served at the discovery endpoint.
//!
//! A card identifies a callable agent: its network address plus display
//! metadata. It carries no behavior; routers use it only to address a
//! peer call.

use serde::{Deserialize, Serialize};

/// Capability flags advertised by an agent
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCapabilities {
    /// Whether the agent produces streaming replies
    #[serde(default)]
    pub streaming: bool,
    /// Whether the agent delivers push notifications
    #[serde(default)]
    pub push_notifications: bool,
}

/// One advertised skill of an agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSkill {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Descriptor identifying a callable agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCard {
    /// Base url of the agent's protocol endpoint
    pub url: String,
    /// Display name
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Advertised version
    pub version: String,
    #[serde(default)]
    pub capabilities: AgentCapabilities,
    #[serde(default)]
    pub skills: Vec<AgentSkill>,
    /// Accepted content types
    #[serde(default)]
    pub default_input_modes: Vec<String>,
    /// Produced content types
    #[serde(default)]
    pub default_output_modes: Vec<String>,
    /// Transport the endpoint speaks
    pub preferred_transport: String,
}

impl AgentCard {
    /// Card this process advertises at its own discovery endpoint
    pub fn advertised(
        url: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let name = name.into();
        let description = description.into();
        Self {
            url: url.into(),
            name: name.clone(),
            description: description.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: AgentCapabilities::default(),
            skills: vec![AgentSkill {
                id: "default".to_string(),
                name,
                description,
                tags: vec!["llm".to_string()],
            }],
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
            preferred_transport: "JSONRPC".to_string(),
        }
    }

    /// Minimal card used only to address a peer call
    pub fn peer(
        url: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            name: name.into(),
            description: description.into(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            capabilities: AgentCapabilities::default(),
            skills: vec![],
            default_input_modes: vec!["text/plain".to_string()],
            default_output_modes: vec!["text/plain".to_string()],
            preferred_transport: "JSONRPC".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advertised_card_carries_default_skill() {
        let card = AgentCard::advertised("http://localhost:8001", "Dispatch Agent", "Dispatch");
        assert_eq!(card.skills.len(), 1);
        assert_eq!(card.skills[0].id, "default");
        assert_eq!(card.default_input_modes, vec!["text/plain"]);
    }

    #[test]
    fn test_peer_card_has_no_skills() {
        let card = AgentCard::peer("http://localhost:8002", "Delivery Agent", "Delivery");
        assert!(card.skills.is_empty());
    }
}
