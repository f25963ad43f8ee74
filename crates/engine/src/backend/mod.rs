pub mod ollama;
#[cfg(test)]
pub(crate) mod scripted;

use anyhow::Result;
use async_trait::async_trait;

pub use ollama::OllamaBackend;

pub const DEFAULT_REPEAT_PENALTY: f32 = 1.1;

#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Upper bound on tokens generated past the end of the prompt.
    pub max_tokens: u32,
    /// Passed to the sampler as-is.
    pub temperature: f32,
    pub repeat_penalty: f32,
}

impl CompletionRequest {
    pub fn new(prompt: String, max_tokens: u32, temperature: f32) -> Self {
        Self {
            prompt,
            max_tokens,
            temperature,
            repeat_penalty: DEFAULT_REPEAT_PENALTY,
        }
    }
}

/// A causal language model that continues a raw prompt.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn model(&self) -> &str;

    /// Makes the model resident so the first real request does not pay for loading it.
    async fn warm_up(&self) -> Result<()>;

    /// Returns only the newly generated continuation, without the prompt.
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
