use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    Response {
        content: String,
    },
    ToolCall {
        name: String,
        parameters: serde_json::Value,
    },
    ToolResult {
        name: String,
        result: String,
    },
    FollowUp {
        content: String,
    },
    Error {
        message: String,
    },
}
