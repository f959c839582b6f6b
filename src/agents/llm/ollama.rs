//! Ollama backend for locally hosted models (secondary tier)

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

use super::CompletionBackend;
use crate::agents::error::{LlmError, LlmResult};
use crate::config::LlmSettings;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Locally hosted chat backend
pub struct OllamaBackend {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaBackend {
    /// Build the backend when a model is configured; `None` disables the
    /// tier.
    pub fn from_settings(settings: &LlmSettings) -> Option<Self> {
        let model = settings.ollama_model.clone()?;
        Some(Self {
            client: reqwest::Client::new(),
            base_url: settings.ollama_base_url.clone(),
            model,
        })
    }
}

#[async_trait]
impl CompletionBackend for OllamaBackend {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn complete(&self, prompt: &str) -> LlmResult<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
        });

        let response = self
            .client
            .post(format!("{}/api/chat", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::Parse(format!("failed to parse response: {}", e)))?;

        chat.message
            .and_then(|message| message.content)
            .ok_or_else(|| LlmError::Parse("response carried no message content".to_string()))
    }
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    #[serde(default)]
    message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    #[serde(default)]
    content: Option<String>,
}
