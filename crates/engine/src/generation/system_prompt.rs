use relay_shared::tools;

const PREAMBLE: &str = "You are a helpful assistant that can use tools. When you need information that \
requires a tool call, respond with a JSON object containing:
{
  \"tool_call\": {
    \"name\": \"tool_name\",
    \"parameters\": {...}
  }
}";

/// Tools advertised to the model. Everything else in the registry is reachable
/// through the tool server only.
const MODEL_TOOLS: &[&str] = &["get_favorite_number"];

const GUIDANCE: &str = "If the user asks about their favorite number, use the get_favorite_number tool.";

/// The fixed instruction prepended to every prompt: the envelope format and the advertised tools.
pub fn build() -> String {
    let tool_lines: Vec<String> = MODEL_TOOLS
        .iter()
        .filter_map(|name| tools::get_tool_schema(name).ok())
        .map(|schema| format!("- {}", schema.describe()))
        .collect();

    format!(
        "{}\n\nAvailable tools:\n{}\n\n{}\n",
        PREAMBLE,
        tool_lines.join("\n"),
        GUIDANCE
    )
}

/// Lays out system instruction and user prompt as the model sees them.
pub fn frame(system: &str, prompt: &str) -> String {
    format!("System: {}\n\nUser: {}\n\nAssistant:", system, prompt)
}
