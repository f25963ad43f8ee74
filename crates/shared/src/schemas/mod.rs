// crates/shared/src/schemas
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone)]
pub struct Toolbelt {
    pub name: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone)]
pub struct ToolSchema {
    pub name: &'static str,
    /// Name of the toolbelt that registered this tool.
    pub toolbelt: &'static str,
    pub description: &'static str,
    pub parameters: Vec<ParameterSchema>,
}

#[derive(Debug, Clone)]
pub struct ParameterSchema {
    pub name: &'static str,
    pub type_name: &'static str,
    pub description: &'static str,
    pub required: bool,
}

#[derive(Serialize, Clone, Debug)]
pub struct Tool {
    #[serde(rename = "type")]
    pub tool_type: String,
    pub function: FunctionDefinition,
}

#[derive(Serialize, Clone, Debug)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolSchema {
    pub fn to_tool(&self) -> Tool {
        let mut properties = json!({});
        let mut required = vec![];

        for param in &self.parameters {
            properties[param.name] = json!({
                "type": param.type_name,
                "description": param.description
            });
            if param.required {
                required.push(param.name);
            }
        }

        Tool {
            tool_type: "function".to_string(),
            function: FunctionDefinition {
                name: self.name.to_string(),
                description: self.description.to_string(),
                parameters: json!({
                    "type": "object",
                    "properties": properties,
                    "required": required
                }),
            },
        }
    }

    /// One-line summary used when listing tools to the model,
    /// e.g. `get_favorite_number: Returns ... Takes parameter "user_id" (string).`
    pub fn describe(&self) -> String {
        let params: Vec<String> = self
            .parameters
            .iter()
            .map(|p| format!("\"{}\" ({})", p.name, p.type_name))
            .collect();

        match params.len() {
            0 => format!("{}: {}", self.name, self.description),
            1 => format!("{}: {} Takes parameter {}.", self.name, self.description, params[0]),
            _ => format!("{}: {} Takes parameters {}.", self.name, self.description, params.join(", ")),
        }
    }
}

pub type ToolHandler = fn(&Value) -> anyhow::Result<String>;
