//! Tool-call extraction from free-text model completions.
//!
//! The model is asked to embed a JSON envelope in its reply:
//!
//! ```text
//! {"tool_call": {"name": "get_favorite_number", "parameters": {"user_id": "alice"}}}
//! ```
//!
//! [`extract`] finds that object and decodes it without interpreting it.
//! Interpretation happens on the caller's side through [`RawToolCall::resolve`],
//! which accepts both the enveloped shape above and a bare
//! `{"name": ..., "parameters": ...}` object.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Greedy on purpose: the span runs from the first `{` that precedes a
/// `"tool_call"` key to the last `}` in the text, so anything brace-shaped
/// after the object is swallowed too and makes decoding fail.
static TOOL_CALL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\{.*"tool_call".*\}"#).expect("tool call pattern is valid")
});

/// A decoded tool-call object exactly as the model emitted it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(transparent)]
pub struct RawToolCall(pub Value);

/// A tool invocation resolved from either accepted shape.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// Finds and decodes the embedded tool-call object, if any.
pub fn extract(text: &str) -> Option<RawToolCall> {
    let span = TOOL_CALL_PATTERN.find(text)?.as_str();

    match serde_json::from_str::<Value>(span) {
        Ok(value) => Some(RawToolCall(value)),
        Err(e) => {
            debug!(error = %e, len = span.len(), "Tool call candidate did not decode");
            None
        }
    }
}

impl RawToolCall {
    /// Interprets the object as a call. A nested `tool_call` key wins;
    /// otherwise the object itself is treated as the call.
    pub fn resolve(&self) -> Option<ToolCall> {
        let call = match self.0.get("tool_call") {
            Some(inner) => inner,
            None => &self.0,
        };

        let name = call.get("name")?.as_str()?.to_string();
        let parameters = call
            .get("parameters")
            .and_then(|p| p.as_object())
            .cloned()
            .unwrap_or_default();

        Some(ToolCall { name, parameters })
    }
}

impl ToolCall {
    pub fn arguments(&self) -> Value {
        Value::Object(self.parameters.clone())
    }
}
