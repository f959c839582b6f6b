//! Configuration loading and validation

use config::{Config, File};
use serde::{Deserialize, Serialize};

use crate::agents::router::RoutePolicy;
use crate::cli::Cli;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub agent: AgentSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub routing: RoutingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Identity and role of this agent process
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AgentSettings {
    pub name: String,
    pub description: String,
    /// Leaf agents answer directly; routers forward to targets
    #[serde(default)]
    pub mode: AgentMode,
    /// Fallback reply prefix for leaf agents
    #[serde(default = "default_reply_prefix")]
    pub reply_prefix: String,
    /// Externally reachable base url; defaults to `http://{host}:{port}`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentMode {
    #[default]
    Leaf,
    Router,
}

fn default_reply_prefix() -> String {
    "received".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseSettings {
    /// SQLite connection url, e.g. `sqlite://courier.db`
    pub url: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://courier.db".to_string(),
        }
    }
}

/// Completion chain settings; a tier is enabled only when configured
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    /// Env var holding the OpenAI API key; unset at runtime disables the
    /// cloud tier
    #[serde(default = "default_openai_api_key_env")]
    pub openai_api_key_env: String,
    #[serde(default = "default_openai_model")]
    pub openai_model: String,
    /// Locally hosted model; absent disables the local tier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ollama_model: Option<String>,
    #[serde(default = "default_ollama_base_url")]
    pub ollama_base_url: String,
}

fn default_openai_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            openai_api_key_env: default_openai_api_key_env(),
            openai_model: default_openai_model(),
            ollama_model: None,
            ollama_base_url: default_ollama_base_url(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RoutingSettings {
    #[serde(default)]
    pub policy: RoutePolicy,
    #[serde(default)]
    pub targets: Vec<RouteTarget>,
}

/// One registered downstream agent
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteTarget {
    pub key: String,
    pub url: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Settings {
    /// Load settings from the config file named by the CLI, apply CLI
    /// overrides, and validate.
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let s = Config::builder()
            .add_source(File::from(cli.config.clone()).required(false))
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("agent.name", "Courier Agent")?
            .set_default("agent.description", "General-purpose courier agent")?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;
        settings.apply_cli_overrides(cli);
        settings.validate()?;
        Ok(settings)
    }

    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(host) = &cli.host {
            self.server.host = host.clone();
        }
        if let Some(port) = cli.port {
            self.server.port = port;
        }
        if let Some(url) = &cli.database_url {
            self.database.url = url.clone();
        }
    }

    /// Externally reachable base url for this agent
    pub fn advertised_url(&self) -> String {
        self.agent
            .url
            .clone()
            .unwrap_or_else(|| format!("http://{}:{}", self.server.host, self.server.port))
    }

    fn validate(&self) -> Result<(), anyhow::Error> {
        match self.agent.mode {
            AgentMode::Router if self.routing.targets.is_empty() => {
                anyhow::bail!("router mode requires at least one routing target")
            }
            AgentMode::Leaf if !self.routing.targets.is_empty() => {
                anyhow::bail!("routing targets are only valid in router mode")
            }
            _ => Ok(()),
        }
    }
}
