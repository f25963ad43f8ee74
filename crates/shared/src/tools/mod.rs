use once_cell::sync::Lazy;
use std::collections::HashMap;
use anyhow::Result;
use serde_json::Value;
use tracing::{debug, warn};

use crate::schemas::{Tool, ToolHandler, ToolSchema, Toolbelt};

pub mod toolbelts;

static TOOL_REGISTRY: Lazy<HashMap<&'static str, ToolHandler>> = Lazy::new(|| {
    let mut map = HashMap::new();

    for (name, handler) in toolbelts::favorites::TOOL_ENTRIES { map.insert(*name, *handler); }
    map
});

static TOOL_SCHEMAS: Lazy<Vec<ToolSchema>> = Lazy::new(|| {
    let mut schemas = Vec::new();
    schemas.extend(toolbelts::favorites::TOOL_SCHEMAS.iter().cloned());
    schemas
});

static TOOLBELTS: &[&Toolbelt] = &[&toolbelts::favorites::TOOLBELT];

fn unknown_tool(name: &str) -> String {
    format!("Unknown tool: {}", name)
}

/// Runs the named tool. Never fails: unknown names and handler errors come
/// back as result text so they can be shown to the user or fed to the model.
pub fn use_tool(name: &str, args: &Value) -> String {
    let Some(handler) = TOOL_REGISTRY.get(name) else {
        warn!(tool = name, "Tool not registered");
        return unknown_tool(name);
    };

    match handler(args) {
        Ok(result) => {
            debug!(tool = name, %result, "Tool executed");
            result
        }
        Err(e) => {
            warn!(tool = name, error = %e, "Tool failed");
            format!("Tool '{}' failed: {}", name, e)
        }
    }
}

pub fn get_toolbelts() -> &'static [&'static Toolbelt] {
    TOOLBELTS
}

pub fn get_tools() -> Vec<Tool> {
    TOOL_SCHEMAS.iter().map(|s| s.to_tool()).collect()
}

pub fn get_tool_schemas() -> &'static [ToolSchema] {
    &TOOL_SCHEMAS
}

pub fn get_tool_schema(name: &str) -> Result<&'static ToolSchema> {
    TOOL_SCHEMAS
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| anyhow::anyhow!("Tool schema '{}' not found", name))
}
