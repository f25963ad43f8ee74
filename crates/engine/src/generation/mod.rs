pub mod system_prompt;

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use relay_shared::{extract, RawToolCall};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::backend::{CompletionRequest, TextGenerator};

static CONTROL_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\|[^|>]*\|>").expect("control token pattern is valid")
});

/// Wraps one model handle. Created once at startup, shared read-only by every
/// request; generations run one at a time.
pub struct GenerationService {
    backend: Arc<dyn TextGenerator>,
    gate: Mutex<()>,
    system_prompt: String,
}

impl GenerationService {
    pub fn new(backend: Arc<dyn TextGenerator>) -> Self {
        Self {
            backend,
            gate: Mutex::new(()),
            system_prompt: system_prompt::build(),
        }
    }

    pub fn model(&self) -> &str {
        self.backend.model()
    }

    pub async fn generate(&self, prompt: &str, max_tokens: u32, temperature: f32) -> Result<String> {
        let request = CompletionRequest::new(
            system_prompt::frame(&self.system_prompt, prompt),
            max_tokens,
            temperature,
        );

        let raw = {
            let _turn = self.gate.lock().await;
            self.backend.complete(&request).await?
        };

        let text = strip_control_tokens(&raw);
        debug!(max_tokens, temperature, chars = text.len(), "Generated completion");
        Ok(text)
    }

    pub fn parse_tool_call(&self, completion: &str) -> Option<RawToolCall> {
        extract(completion)
    }
}

fn strip_control_tokens(text: &str) -> String {
    CONTROL_TOKEN.replace_all(text, "").trim().to_string()
}
