//! Best-effort completion chain over pluggable LLM backends.
//!
//! Backends are tried in configuration order; every failure degrades to
//! the next tier, and an exhausted chain returns the caller's fallback
//! verbatim. The chain itself never fails.

mod ollama;
mod openai;

pub use ollama::OllamaBackend;
pub use openai::OpenAiBackend;

use async_trait::async_trait;
use std::sync::Arc;

use crate::agents::error::LlmResult;
use crate::config::LlmSettings;

/// One tier of the completion chain
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Backend name used in logs
    fn name(&self) -> &'static str;

    /// Produce a completion for a single-turn prompt
    async fn complete(&self, prompt: &str) -> LlmResult<String>;
}

/// Ordered best-effort chain of completion backends
#[derive(Clone)]
pub struct CompletionChain {
    backends: Vec<Arc<dyn CompletionBackend>>,
}

impl CompletionChain {
    pub fn new(backends: Vec<Arc<dyn CompletionBackend>>) -> Self {
        Self { backends }
    }

    /// Chain with no backends; every completion returns the fallback
    pub fn empty() -> Self {
        Self {
            backends: Vec::new(),
        }
    }

    /// Build the chain from settings: OpenAI when its API key env var is
    /// set, then Ollama when a model is configured.
    pub fn from_settings(settings: &LlmSettings) -> Self {
        let mut backends: Vec<Arc<dyn CompletionBackend>> = Vec::new();
        if let Some(backend) = OpenAiBackend::from_settings(settings) {
            backends.push(Arc::new(backend));
        }
        if let Some(backend) = OllamaBackend::from_settings(settings) {
            backends.push(Arc::new(backend));
        }
        if backends.is_empty() {
            tracing::info!("no completion backend configured, replies fall back to echoes");
        }
        Self { backends }
    }

    /// Complete `prompt`, returning `fallback` when every backend fails
    /// or none is configured. Never fails.
    pub async fn complete(&self, prompt: &str, fallback: &str) -> String {
        for backend in &self.backends {
            match backend.complete(prompt).await {
                Ok(text) => return text,
                Err(e) => {
                    tracing::debug!(
                        backend = backend.name(),
                        error = %e,
                        "completion backend failed, degrading to next tier"
                    );
                }
            }
        }
        fallback.to_string()
    }
}
