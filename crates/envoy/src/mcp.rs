//! MCP tool server over stdio.
//!
//! Speaks newline-delimited JSON-RPC 2.0: one request per line in, one
//! response per line out. Only the tool surface is offered (`initialize`,
//! `ping`, `tools/list` and `tools/call`), backed by the local registry.
//! Messages without an `id` are notifications and get no reply.

use anyhow::Result;
use relay_shared::tools;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "envoy";

const PARSE_ERROR: i32 = -32700;
const INVALID_REQUEST: i32 = -32600;
const METHOD_NOT_FOUND: i32 = -32601;
const INVALID_PARAMS: i32 = -32602;

#[derive(Debug, Deserialize)]
struct RpcRequest {
    #[serde(default)]
    jsonrpc: String,
    method: String,
    #[serde(default)]
    params: Option<Value>,
    #[serde(default)]
    id: Option<Value>,
}

#[derive(Debug, Serialize)]
struct RpcResponse {
    jsonrpc: &'static str,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<RpcError>,
}

#[derive(Debug, Serialize)]
struct RpcError {
    code: i32,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

impl RpcResponse {
    fn success(id: Value, result: Value) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, result: Some(result), error: None }
    }

    fn failure(id: Value, error: RpcError) -> Self {
        Self { jsonrpc: JSONRPC_VERSION, id, result: None, error: Some(error) }
    }
}

impl RpcError {
    fn new(code: i32, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }
}

/// Serves requests from `reader` until it reaches end of input.
pub async fn serve<R, W>(reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("MCP tool server ready on stdio");
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Some(response) = handle_line(line) else {
            continue;
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    info!("MCP input closed");
    Ok(())
}

fn handle_line(line: &str) -> Option<RpcResponse> {
    let value: Value = match serde_json::from_str(line) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Unparseable MCP message");
            return Some(RpcResponse::failure(
                Value::Null,
                RpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
            ));
        }
    };

    let id = value.get("id").cloned().unwrap_or(Value::Null);
    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return Some(RpcResponse::failure(
                id,
                RpcError::new(INVALID_REQUEST, format!("Invalid request: {}", e)),
            ));
        }
    };

    let Some(id) = request.id else {
        debug!(method = %request.method, "MCP notification");
        return None;
    };

    if request.jsonrpc != JSONRPC_VERSION {
        return Some(RpcResponse::failure(
            id,
            RpcError::new(INVALID_REQUEST, "Invalid JSON-RPC version"),
        ));
    }

    Some(match dispatch(&request.method, request.params) {
        Ok(result) => RpcResponse::success(id, result),
        Err(error) => RpcResponse::failure(id, error),
    })
}

fn dispatch(method: &str, params: Option<Value>) -> Result<Value, RpcError> {
    debug!(method, "MCP request");

    match method {
        "initialize" => Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": {} },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })),
        "ping" => Ok(json!({})),
        "tools/list" => Ok(list_tools()),
        "tools/call" => call_tool(params.unwrap_or(Value::Null)),
        _ => Err(RpcError::new(METHOD_NOT_FOUND, format!("Method not found: {}", method))),
    }
}

fn list_tools() -> Value {
    let tools: Vec<Value> = tools::get_tools()
        .into_iter()
        .map(|tool| {
            json!({
                "name": tool.function.name,
                "description": tool.function.description,
                "inputSchema": tool.function.parameters,
            })
        })
        .collect();

    json!({ "tools": tools })
}

fn call_tool(params: Value) -> Result<Value, RpcError> {
    let params: CallToolParams = serde_json::from_value(params)
        .map_err(|e| RpcError::new(INVALID_PARAMS, format!("Invalid tools/call params: {}", e)))?;

    let arguments = match params.arguments {
        Value::Null => json!({}),
        other => other,
    };

    let registered = tools::get_tool_schema(&params.name).is_ok();
    info!(tool = %params.name, "MCP tool call");
    let text = tools::use_tool(&params.name, &arguments);

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "isError": !registered,
    }))
}
