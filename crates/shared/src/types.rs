use serde::{Deserialize, Serialize};

use crate::extract::RawToolCall;

pub const DEFAULT_MAX_LENGTH: u32 = 512;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

// Generation endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_length() -> u32 {
    DEFAULT_MAX_LENGTH
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GenerateResponse {
    pub response: String,
    pub tool_call: Option<RawToolCall>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
}

// Health endpoint
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self { status: "healthy".to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_defaults_apply() {
        let req: GenerateRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(req, GenerateRequest::new(""));

        let req: GenerateRequest =
            serde_json::from_value(json!({ "prompt": "hi", "max_length": 16 })).unwrap();
        assert_eq!(req.prompt, "hi");
        assert_eq!(req.max_length, 16);
        assert_eq!(req.temperature, DEFAULT_TEMPERATURE);
    }

    #[test]
    fn absent_tool_call_serializes_as_null() {
        let resp = GenerateResponse { response: "hello".to_string(), tool_call: None };
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            json!({ "response": "hello", "tool_call": null })
        );
    }

    #[test]
    fn tool_call_is_passed_through_untouched() {
        let body = json!({
            "response": "...",
            "tool_call": { "tool_call": { "name": "x", "parameters": {} } }
        });
        let resp: GenerateResponse = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(serde_json::to_value(&resp).unwrap(), body);
    }
}
