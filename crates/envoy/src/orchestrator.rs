use anyhow::Result;
use relay_shared::events::TurnEvent;
use relay_shared::tools;
use relay_shared::types::GenerateRequest;
use relay_shared::ToolCall;
use tracing::{info, warn};

use crate::client::ApiClient;

/// Everything that happened for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct Turn {
    pub prompt: String,
    pub response: String,
    pub tool_call: Option<ToolCall>,
    pub tool_result: Option<String>,
    pub follow_up: Option<String>,
    /// Set when the tool ran but the follow-up generation failed.
    pub follow_up_error: Option<String>,
}

pub struct Orchestrator {
    client: ApiClient,
    max_length: u32,
    temperature: f32,
    follow_up: bool,
}

impl Orchestrator {
    pub fn new(client: ApiClient) -> Self {
        let defaults = GenerateRequest::new("");
        Self {
            client,
            max_length: defaults.max_length,
            temperature: defaults.temperature,
            follow_up: true,
        }
    }

    pub fn with_sampling(mut self, max_length: u32, temperature: f32) -> Self {
        self.max_length = max_length;
        self.temperature = temperature;
        self
    }

    pub fn with_follow_up(mut self, follow_up: bool) -> Self {
        self.follow_up = follow_up;
        self
    }

    fn request(&self, prompt: &str) -> GenerateRequest {
        GenerateRequest {
            prompt: prompt.to_string(),
            max_length: self.max_length,
            temperature: self.temperature,
        }
    }

    /// One prompt through the service. A tool call in the reply is executed
    /// locally and, if enabled, answered by exactly one follow-up generation
    /// whose reply is taken as final.
    pub async fn run_turn(&self, prompt: &str, mut on_event: impl FnMut(TurnEvent)) -> Result<Turn> {
        let first = self.client.generate(&self.request(prompt)).await?;
        on_event(TurnEvent::Response { content: first.response.clone() });

        let mut turn = Turn {
            prompt: prompt.to_string(),
            response: first.response,
            tool_call: None,
            tool_result: None,
            follow_up: None,
            follow_up_error: None,
        };

        let Some(call) = first.tool_call.as_ref().and_then(|raw| raw.resolve()) else {
            return Ok(turn);
        };

        info!(tool = %call.name, "Executing tool call");
        on_event(TurnEvent::ToolCall {
            name: call.name.clone(),
            parameters: call.arguments(),
        });

        let result = tools::use_tool(&call.name, &call.arguments());
        on_event(TurnEvent::ToolResult {
            name: call.name.clone(),
            result: result.clone(),
        });

        if self.follow_up {
            let follow_up_prompt = follow_up_prompt(&call.name, &result, prompt);
            match self.client.generate(&self.request(&follow_up_prompt)).await {
                Ok(second) => {
                    on_event(TurnEvent::FollowUp { content: second.response.clone() });
                    turn.follow_up = Some(second.response);
                }
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Follow-up generation failed");
                    on_event(TurnEvent::Error { message: e.to_string() });
                    turn.follow_up_error = Some(e.to_string());
                }
            }
        }

        turn.tool_call = Some(call);
        turn.tool_result = Some(result);
        Ok(turn)
    }

    /// Runs prompts in order. A failed prompt is reported and skipped; the batch carries on.
    pub async fn run_batch(
        &self,
        prompts: &[&str],
        mut on_event: impl FnMut(&str, TurnEvent),
    ) -> Vec<Result<Turn>> {
        let mut results = Vec::with_capacity(prompts.len());

        for &prompt in prompts {
            let outcome = self.run_turn(prompt, |event| on_event(prompt, event)).await;
            if let Err(e) = &outcome {
                warn!(prompt, error = %e, "Prompt failed");
                on_event(prompt, TurnEvent::Error { message: e.to_string() });
            }
            results.push(outcome);
        }

        results
    }
}

pub fn follow_up_prompt(tool: &str, result: &str, original: &str) -> String {
    format!(
        "The tool {} returned: \"{}\". Using this information, answer the user's original \
         question in a natural sentence: {}",
        tool, result, original
    )
}
