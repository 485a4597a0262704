use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::{McpError, Result};
use crate::service::{render, QuickSightService};
use crate::tools;
use crate::MAX_TOOL_RESPONSE_SIZE;

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "quicksight-mcp";

const PARSE_ERROR: i32 = -32700;

/// JSON-RPC message types
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Response(JsonRpcResponse),
    Notification(JsonRpcNotification),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    pub id: Value,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
                data: None,
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcNotification {
    pub jsonrpc: String,
    pub method: String,
    pub params: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ToolCall {
    pub name: String,
    #[serde(default)]
    pub arguments: Value,
}

/// MCP server exposing the QuickSight tool catalogue.
pub struct QuickSightMcpServer {
    service: QuickSightService,
}

impl QuickSightMcpServer {
    pub fn new(service: QuickSightService) -> Self {
        Self { service }
    }

    /// Serves requests on stdin/stdout until stdin closes.
    pub async fn run(&self) -> Result<()> {
        self.serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
            .await
    }

    /// Reads one JSON-RPC message per line from `reader` and writes each
    /// response as one line to `writer`.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = Vec::new();

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).await? == 0 {
                break;
            }
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }

            if let Some(response) = self.handle_line(&line).await {
                let mut response_str = serde_json::to_string(&response)?;
                response_str.push('\n');
                writer.write_all(response_str.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        tracing::info!("input closed, shutting down");
        Ok(())
    }

    /// Invalid UTF-8 is reported like any other unparsable line.
    async fn handle_line(&self, line: &[u8]) -> Option<JsonRpcResponse> {
        let value: Value = match serde_json::from_slice(line) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("unparsable message: {}", e);
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        match serde_json::from_value::<JsonRpcMessage>(value) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                let error = McpError::JsonRpc(e.to_string());
                tracing::warn!("{}", error);
                Some(JsonRpcResponse::failure(id, error.code(), error.to_string()))
            }
        }
    }

    pub async fn handle_message(&self, message: JsonRpcMessage) -> Option<JsonRpcResponse> {
        match message {
            JsonRpcMessage::Request(request) => Some(self.handle_request(request).await),
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification);
                None
            }
            JsonRpcMessage::Response(response)
                if response.result.is_none() && response.error.is_none() =>
            {
                let error = McpError::JsonRpc(
                    "message has neither method, result nor error".to_string(),
                );
                tracing::warn!("{}", error);
                Some(JsonRpcResponse::failure(response.id, error.code(), error.to_string()))
            }
            // We never send requests, so responses are not expected
            JsonRpcMessage::Response(_) => None,
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %request.method, id = %request.id, "request");

        let result = match request.method.as_str() {
            "initialize" => Ok(self.handle_initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(self.handle_tools_list()),
            "tools/call" => self.handle_tool_call(request.params).await,
            _ => Err(McpError::NotFound(format!(
                "Method '{}' not found",
                request.method
            ))),
        };

        match result {
            Ok(result) => JsonRpcResponse::success(request.id, result),
            Err(e) => {
                tracing::warn!(method = %request.method, "request rejected: {}", e);
                JsonRpcResponse::failure(request.id, e.code(), e.to_string())
            }
        }
    }

    fn handle_initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {
                    "listChanged": false
                }
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    fn handle_tools_list(&self) -> Value {
        let tools: Vec<Value> = tools::registry().map(|tool| tool.listing()).collect();
        json!({ "tools": tools })
    }

    async fn handle_tool_call(&self, params: Option<Value>) -> Result<Value> {
        let params = params.ok_or_else(|| {
            McpError::InvalidRequest("Missing params for tools/call".to_string())
        })?;
        let tool_call: ToolCall = serde_json::from_value(params)?;

        let spec = tools::find(&tool_call.name)
            .ok_or_else(|| McpError::NotFound(format!("Tool '{}' not found", tool_call.name)))?;
        let call = spec.prepare(&tool_call.arguments, self.service.account_id())?;

        // Generate a human-readable description of the call
        let mut description = Vec::new();
        if let Err(e) = spec.queue_description(&call, &mut description) {
            tracing::warn!("Failed to generate call description: {}", e);
        }

        let outcome = self.service.execute(spec, &call).await;
        let (body, is_error) = render(spec, &call, outcome);
        let body_text = truncate_response(serde_json::to_string_pretty(&body)?);

        Ok(json!({
            "content": [
                {
                    "type": "text",
                    "text": String::from_utf8_lossy(&description),
                },
                {
                    "type": "text",
                    "text": body_text,
                }
            ],
            "isError": is_error,
        }))
    }

    fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "notifications/initialized" => tracing::info!("client initialized"),
            other => tracing::debug!(method = other, "ignoring notification"),
        }
    }
}

/// Caps `text` at [`MAX_TOOL_RESPONSE_SIZE`] bytes, cutting on a character
/// boundary.
fn truncate_response(mut text: String) -> String {
    if text.len() <= MAX_TOOL_RESPONSE_SIZE {
        return text;
    }
    let mut end = MAX_TOOL_RESPONSE_SIZE;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
    text.push_str(" ... truncated");
    text
}
