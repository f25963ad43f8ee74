// crates/engine/src/backend/ollama.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{CompletionRequest, TextGenerator};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "qwen3:0.6b";

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    raw: bool,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Serialize)]
struct GenerateOptions {
    num_predict: u32,
    temperature: f32,
    repeat_penalty: f32,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    #[serde(default)]
    eval_count: Option<u64>,
}

/// Talks to an Ollama-compatible `/api/generate` endpoint.
#[derive(Debug, Clone)]
pub struct OllamaBackend {
    client: Client,
    base_url: String,
    model: String,
}

impl Default for OllamaBackend {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, DEFAULT_MODEL)
    }
}

impl OllamaBackend {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    async fn post(&self, request: &GenerateRequest<'_>) -> Result<GenerateResponse> {
        let response = self.client
            .post(self.url())
            .json(request)
            .send()
            .await
            .with_context(|| format!("Failed to reach model backend at {}", self.base_url))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Model backend returned {}: {}", status, body.trim());
        }

        let response = response.json::<GenerateResponse>().await?;
        Ok(response)
    }
}

#[async_trait]
impl TextGenerator for OllamaBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn warm_up(&self) -> Result<()> {
        info!(model = %self.model, "Loading model");

        // An empty prompt loads the model without generating.
        let request = GenerateRequest {
            model: &self.model,
            prompt: "",
            raw: false,
            stream: false,
            options: None,
        };
        self.post(&request).await?;

        info!(model = %self.model, "Model loaded");
        Ok(())
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: &request.prompt,
            raw: true,
            stream: false,
            options: Some(GenerateOptions {
                num_predict: request.max_tokens,
                temperature: request.temperature,
                repeat_penalty: request.repeat_penalty,
            }),
        };

        let response = self.post(&body).await?;
        debug!(
            tokens = response.eval_count,
            chars = response.response.len(),
            "Completion received"
        );

        Ok(response.response)
    }
}
